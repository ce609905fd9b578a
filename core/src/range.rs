// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// An inclusive range of 1-based lesson slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeRaw", into = "RangeRaw")]
pub struct Range {
    start: u8,
    end: u8,
}

impl Range {
    /// The first slot of the day.
    pub const FIRST: Range = Range { start: 1, end: 1 };

    /// Creates a range, rejecting slot 0 and reversed bounds.
    pub fn new(start: u8, end: u8) -> Result<Self, ValidationError> {
        if start == 0 || start > end {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range of one slot.
    pub fn single(lesson: u8) -> Result<Self, ValidationError> {
        Self::new(lesson, lesson)
    }

    /// The first slot.
    pub fn start(&self) -> u8 {
        self.start
    }

    /// The last slot, inclusive.
    pub fn end(&self) -> u8 {
        self.end
    }

    /// Number of slots covered.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u8 {
        self.end - self.start + 1
    }

    pub fn contains(&self, lesson: u8) -> bool {
        self.start <= lesson && lesson <= self.end
    }

    /// Whether both ranges share at least one slot.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether the range fits in a day of `lesson_count` lessons.
    pub fn fits(&self, lesson_count: u8) -> bool {
        self.end <= lesson_count
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + use<> {
        self.start..=self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start == self.end {
            true => write!(f, "{}", self.start),
            false => write!(f, "{}-{}", self.start, self.end),
        }
    }
}

impl FromStr for Range {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<u8>()
                .map_err(|e| ValidationError::Parse(format!("Invalid lesson '{v}': {e}")))
        };

        match s.split_once('-') {
            Some((start, end)) => Range::new(parse(start)?, parse(end)?),
            None => Range::single(parse(s)?),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RangeRaw {
    start: u8,
    end: u8,
}

impl TryFrom<RangeRaw> for Range {
    type Error = ValidationError;

    fn try_from(raw: RangeRaw) -> Result<Self, Self::Error> {
        Range::new(raw.start, raw.end)
    }
}

impl From<Range> for RangeRaw {
    fn from(range: Range) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
