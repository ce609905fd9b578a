// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::week::MAX_WEEKS;
use crate::{Course, LessonsPerDay, ValidationError, Weekday};

/// Term length of new schedules, in weeks.
pub const DEFAULT_TOTAL_WEEKS: u16 = 16;

/// A named weekly timetable with its term metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub uid: String,
    pub name: String,
    pub term_start: Date,
    pub total_weeks: u16,
    pub display_weekends: bool,
    /// Display courses that do not take place in the displayed week.
    pub show_inactive: bool,
    pub lessons: LessonsPerDay,
    pub deleted: bool,
}

/// Position of a date relative to a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermWeek {
    NotStarted,
    Week(u16),
    Ended,
}

impl TermWeek {
    /// The week number, if the date falls inside the term.
    pub fn week(self) -> Option<u16> {
        match self {
            TermWeek::Week(w) => Some(w),
            _ => None,
        }
    }
}

impl Schedule {
    /// Monday of the first week.
    fn first_monday(&self) -> Date {
        monday_of(self.term_start)
    }

    /// The week of the term `date` falls into. Weeks start on Monday, and the
    /// week containing `term_start` is week 1.
    pub fn week_of(&self, date: Date) -> TermWeek {
        let first = self.first_monday();
        if date < first {
            return TermWeek::NotStarted;
        }

        let days = days_between(first, date);
        let week = days / 7 + 1;
        match u16::try_from(week) {
            Ok(w) if w <= self.total_weeks => TermWeek::Week(w),
            _ => TermWeek::Ended,
        }
    }

    /// The calendar date of a weekday in a week of the term.
    pub fn date_of(&self, week: u16, weekday: Weekday) -> Option<Date> {
        if week == 0 || week > self.total_weeks {
            return None;
        }
        let offset = i64::from(week - 1) * 7 + i64::from(weekday.number() - 1);
        self.first_monday().checked_add(offset.days()).ok()
    }

    /// Sunday of the last week.
    pub fn term_end(&self) -> Option<Date> {
        self.date_of(self.total_weeks, Weekday::Sunday)
    }

    /// Weekdays shown in the week table.
    pub fn visible_weekdays(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|d| self.display_weekends || !d.is_weekend())
            .collect()
    }

    /// The editable fields of this schedule.
    pub fn to_draft(&self) -> ScheduleDraft {
        ScheduleDraft {
            name: self.name.clone(),
            term_start: self.term_start,
            total_weeks: self.total_weeks,
            display_weekends: self.display_weekends,
            show_inactive: self.show_inactive,
            lessons: self.lessons.clone(),
        }
    }

    /// Names of the courses that do not fit in this schedule.
    pub fn courses_out_of_bounds<'a>(&self, courses: &'a [Course]) -> Vec<&'a str> {
        let lesson_count = self.lessons.lesson_count();
        courses
            .iter()
            .filter(|c| {
                !c.range.fits(lesson_count)
                    || c.weeks.last().is_some_and(|w| w > self.total_weeks)
            })
            .map(|c| c.name.as_str())
            .collect()
    }
}

fn monday_of(date: Date) -> Date {
    let offset = i64::from(date.weekday().to_monday_zero_offset());
    date.checked_sub(offset.days()).unwrap_or(date)
}

fn days_between(from: Date, to: Date) -> i64 {
    from.until(to).map(|span| i64::from(span.get_days())).unwrap_or(0)
}

/// The data of a schedule to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub name: String,
    pub term_start: Date,
    pub total_weeks: u16,
    #[serde(default)]
    pub display_weekends: bool,
    #[serde(default = "default_show_inactive")]
    pub show_inactive: bool,
    #[serde(default)]
    pub lessons: LessonsPerDay,
}

fn default_show_inactive() -> bool {
    true
}

impl ScheduleDraft {
    /// A draft with default term length and lesson times.
    pub fn new(name: impl Into<String>, term_start: Date) -> Self {
        Self {
            name: name.into(),
            term_start,
            total_weeks: DEFAULT_TOTAL_WEEKS,
            display_weekends: false,
            show_inactive: true,
            lessons: LessonsPerDay::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.total_weeks == 0 || self.total_weeks > MAX_WEEKS {
            return Err(ValidationError::InvalidTotalWeeks(self.total_weeks));
        }
        self.lessons.validate()
    }

    pub(crate) fn into_schedule(self, uid: String) -> Schedule {
        Schedule {
            uid,
            name: self.name.trim().to_string(),
            term_start: self.term_start,
            total_weeks: self.total_weeks,
            display_weekends: self.display_weekends,
            show_inactive: self.show_inactive,
            lessons: self.lessons,
            deleted: false,
        }
    }
}

/// Partial update of a schedule.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchedulePatch {
    pub name: Option<String>,
    pub term_start: Option<Date>,
    pub total_weeks: Option<u16>,
    pub display_weekends: Option<bool>,
    pub show_inactive: Option<bool>,
    pub lessons: Option<LessonsPerDay>,
}

impl SchedulePatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.term_start.is_none()
            && self.total_weeks.is_none()
            && self.display_weekends.is_none()
            && self.show_inactive.is_none()
            && self.lessons.is_none()
    }

    /// Returns the draft of `schedule` with this patch applied.
    pub fn apply_to(&self, schedule: &Schedule) -> ScheduleDraft {
        let mut draft = schedule.to_draft();
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(term_start) = self.term_start {
            draft.term_start = term_start;
        }
        if let Some(total_weeks) = self.total_weeks {
            draft.total_weeks = total_weeks;
        }
        if let Some(display_weekends) = self.display_weekends {
            draft.display_weekends = display_weekends;
        }
        if let Some(show_inactive) = self.show_inactive {
            draft.show_inactive = show_inactive;
        }
        if let Some(lessons) = &self.lessons {
            draft.lessons = lessons.clone();
        }
        draft
    }
}
