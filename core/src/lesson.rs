// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use jiff::SignedDuration;
use jiff::civil::{Time, time};
use serde::{Deserialize, Serialize};

use crate::{Range, ValidationError};

/// Wall-clock span of one lesson slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub start: Time,
    pub end: Time,
}

impl Lesson {
    pub fn new(start: Time, end: Time) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidLessonTimes(format!(
                "lesson ends at {} before it starts at {}",
                end.strftime("%H:%M"),
                start.strftime("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}~{}",
            self.start.strftime("%H:%M"),
            self.end.strftime("%H:%M")
        )
    }
}

/// The part of the day a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Morning => write!(f, "Morning"),
            Period::Afternoon => write!(f, "Afternoon"),
            Period::Evening => write!(f, "Evening"),
        }
    }
}

/// Generator for the lessons of one period: `count` lessons starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonTimePeriodInfo {
    pub start: Time,
    pub lesson_minutes: u16,
    pub break_minutes: u16,
    pub count: u8,
}

impl LessonTimePeriodInfo {
    pub const fn new(start: Time, lesson_minutes: u16, break_minutes: u16, count: u8) -> Self {
        Self {
            start,
            lesson_minutes,
            break_minutes,
            count,
        }
    }

    /// Generates the lessons of this period.
    pub fn generate(&self) -> Result<Vec<Lesson>, ValidationError> {
        if self.lesson_minutes == 0 && self.count > 0 {
            return Err(ValidationError::InvalidLessonTimes(
                "lesson duration must be positive".to_string(),
            ));
        }

        let lesson = SignedDuration::from_mins(i64::from(self.lesson_minutes));
        let gap = SignedDuration::from_mins(i64::from(self.break_minutes));
        let overflow = || {
            ValidationError::InvalidLessonTimes(format!(
                "{} lessons from {} would run past midnight",
                self.count,
                self.start.strftime("%H:%M")
            ))
        };

        let mut lessons = Vec::with_capacity(self.count as usize);
        let mut start = self.start;
        for i in 0..self.count {
            let end = start.checked_add(lesson).map_err(|_| overflow())?;
            lessons.push(Lesson::new(start, end)?);
            if i + 1 < self.count {
                start = end.checked_add(gap).map_err(|_| overflow())?;
            }
        }
        Ok(lessons)
    }
}

/// The lesson slots of a day, split into periods.
///
/// Slots are numbered from 1 across all periods: the morning comes first,
/// then the afternoon, then the evening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonsPerDay {
    #[serde(default)]
    pub morning: Vec<Lesson>,
    #[serde(default)]
    pub afternoon: Vec<Lesson>,
    #[serde(default)]
    pub evening: Vec<Lesson>,
}

impl Default for LessonsPerDay {
    fn default() -> Self {
        let (morning, afternoon, evening) = DEFAULT_PERIODS;
        // the default generators are fixed and known to fit in a day
        Self::from_periods(&morning, &afternoon, &evening).unwrap_or_else(|_| Self {
            morning: Vec::new(),
            afternoon: Vec::new(),
            evening: Vec::new(),
        })
    }
}

/// Default period generators for new schedules.
pub const DEFAULT_PERIODS: (
    LessonTimePeriodInfo,
    LessonTimePeriodInfo,
    LessonTimePeriodInfo,
) = (
    LessonTimePeriodInfo::new(time(8, 0, 0, 0), 45, 10, 4),
    LessonTimePeriodInfo::new(time(14, 0, 0, 0), 45, 10, 4),
    LessonTimePeriodInfo::new(time(19, 0, 0, 0), 45, 10, 2),
);

impl LessonsPerDay {
    /// Generates and validates the lessons of each period.
    pub fn from_periods(
        morning: &LessonTimePeriodInfo,
        afternoon: &LessonTimePeriodInfo,
        evening: &LessonTimePeriodInfo,
    ) -> Result<Self, ValidationError> {
        let lessons = Self {
            morning: morning.generate()?,
            afternoon: afternoon.generate()?,
            evening: evening.generate()?,
        };
        lessons.validate()?;
        Ok(lessons)
    }

    /// Total number of lesson slots in a day.
    pub fn lesson_count(&self) -> u8 {
        let n = self.morning.len() + self.afternoon.len() + self.evening.len();
        u8::try_from(n).unwrap_or(u8::MAX)
    }

    /// All slots in order, with their 1-based index and period.
    pub fn lessons(&self) -> impl Iterator<Item = (u8, Period, &Lesson)> + '_ {
        let morning = self.morning.iter().map(|a| (Period::Morning, a));
        let afternoon = self.afternoon.iter().map(|a| (Period::Afternoon, a));
        let evening = self.evening.iter().map(|a| (Period::Evening, a));
        morning
            .chain(afternoon)
            .chain(evening)
            .zip(1..=u8::MAX)
            .map(|((period, lesson), i)| (i, period, lesson))
    }

    /// The lesson in the given 1-based slot.
    pub fn get(&self, index: u8) -> Option<&Lesson> {
        self.lessons()
            .find(|(i, _, _)| *i == index)
            .map(|(_, _, lesson)| lesson)
    }

    pub fn period_of(&self, index: u8) -> Option<Period> {
        self.lessons()
            .find(|(i, _, _)| *i == index)
            .map(|(_, period, _)| period)
    }

    /// Wall-clock span covered by a range of slots.
    pub fn span(&self, range: &Range) -> Option<Lesson> {
        let start = self.get(range.start())?;
        let end = self.get(range.end())?;
        Some(Lesson {
            start: start.start,
            end: end.end,
        })
    }

    /// Checks that every lesson starts before it ends and that lessons are
    /// strictly increasing and non-overlapping, within and across periods.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lesson_count() == 0 {
            return Err(ValidationError::InvalidLessonTimes(
                "at least one lesson is required".to_string(),
            ));
        }

        let mut prev: Option<(u8, &Lesson)> = None;
        for (i, _, lesson) in self.lessons() {
            if lesson.start >= lesson.end {
                return Err(ValidationError::InvalidLessonTimes(format!(
                    "lesson {i} ({lesson}) does not end after it starts"
                )));
            }
            if let Some((j, p)) = prev
                && p.end > lesson.start
            {
                return Err(ValidationError::InvalidLessonTimes(format!(
                    "lesson {i} ({lesson}) overlaps or precedes lesson {j} ({p})"
                )));
            }
            prev = Some((i, lesson));
        }
        Ok(())
    }
}
