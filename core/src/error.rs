// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::table::Conflict;

/// Errors raised when a draft or patch would produce invalid domain state.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name that must not be blank is blank.
    BlankName,

    /// A lesson range with `start == 0` or `start > end`.
    InvalidRange { start: u8, end: u8 },

    /// A lesson range that reaches beyond the configured lesson count.
    RangeOutOfBounds { end: u8, lesson_count: u8 },

    /// A course without any week.
    EmptyWeeks,

    /// A week outside of the term.
    WeekOutOfBounds { week: u16, total_weeks: u16 },

    /// Total week count outside `1..=MAX_WEEKS`.
    InvalidTotalWeeks(u16),

    /// Lesson times that are not strictly increasing or that overlap.
    InvalidLessonTimes(String),

    /// The course overlaps other courses on some weeks.
    Conflict(Vec<Conflict>),

    /// A schedule change would leave existing courses out of bounds.
    CoursesOutOfBounds(Vec<String>),

    /// Malformed user input such as a week expression or a colour.
    Parse(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "Name must not be blank"),
            Self::InvalidRange { start, end } => {
                write!(f, "Invalid lesson range: {start}-{end}")
            }
            Self::RangeOutOfBounds { end, lesson_count } => write!(
                f,
                "Lesson {end} is out of bounds, the schedule has {lesson_count} lessons per day"
            ),
            Self::EmptyWeeks => write!(f, "Course must take place in at least one week"),
            Self::WeekOutOfBounds { week, total_weeks } => write!(
                f,
                "Week {week} is out of bounds, the term has {total_weeks} weeks"
            ),
            Self::InvalidTotalWeeks(n) => write!(f, "Invalid total week count: {n}"),
            Self::InvalidLessonTimes(e) => write!(f, "Invalid lesson times: {e}"),
            Self::Conflict(conflicts) => {
                write!(f, "Conflicts with ")?;
                for (i, c) in conflicts.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} in weeks {}", c.name, c.weeks)?;
                }
                Ok(())
            }
            Self::CoursesOutOfBounds(names) => write!(
                f,
                "Existing courses would be out of bounds: {}",
                names.join(", ")
            ),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ValidationError {}
