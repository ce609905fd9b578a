// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{Color, Range, Schedule, ValidationError, WeekList, Weekday};

/// A single class entry of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub uid: String,
    pub schedule_uid: String,
    pub name: String,
    pub classroom: String,
    pub teacher: String,
    pub range: Range,
    pub weekday: Weekday,
    pub weeks: WeekList,
    pub color: Color,
    pub note: String,
}

impl Course {
    /// Whether the course takes place in the given week.
    pub fn is_active(&self, week: u16) -> bool {
        self.weeks.contains(week)
    }

    /// The editable fields of this course.
    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            name: self.name.clone(),
            classroom: self.classroom.clone(),
            teacher: self.teacher.clone(),
            range: self.range,
            weekday: self.weekday,
            weeks: self.weeks.clone(),
            color: Some(self.color),
            note: self.note.clone(),
        }
    }
}

/// The data of a course to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    #[serde(default)]
    pub classroom: String,
    #[serde(default)]
    pub teacher: String,
    pub range: Range,
    pub weekday: Weekday,
    pub weeks: WeekList,
    /// Colour of the course, picked from the palette when unset.
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub note: String,
}

impl CourseDraft {
    /// Checks the draft against the schedule it is meant for.
    pub fn validate(&self, schedule: &Schedule) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }

        let lesson_count = schedule.lessons.lesson_count();
        if !self.range.fits(lesson_count) {
            return Err(ValidationError::RangeOutOfBounds {
                end: self.range.end(),
                lesson_count,
            });
        }

        if self.weeks.is_empty() {
            return Err(ValidationError::EmptyWeeks);
        }
        if let Some(week) = self.weeks.iter().find(|w| *w > schedule.total_weeks) {
            return Err(ValidationError::WeekOutOfBounds {
                week,
                total_weeks: schedule.total_weeks,
            });
        }

        Ok(())
    }

    /// Builds the course with the given identifiers.
    pub(crate) fn into_course(self, uid: String, schedule_uid: String) -> Course {
        let name = self.name.trim().to_string();
        let color = self.color.unwrap_or_else(|| Color::for_name(&name));
        Course {
            uid,
            schedule_uid,
            name,
            classroom: self.classroom.trim().to_string(),
            teacher: self.teacher.trim().to_string(),
            range: self.range,
            weekday: self.weekday,
            weeks: self.weeks,
            color,
            note: self.note,
        }
    }
}

/// Partial update of a course.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub classroom: Option<String>,
    pub teacher: Option<String>,
    pub range: Option<Range>,
    pub weekday: Option<Weekday>,
    pub weeks: Option<WeekList>,
    pub color: Option<Color>,
    pub note: Option<String>,
}

impl CoursePatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.classroom.is_none()
            && self.teacher.is_none()
            && self.range.is_none()
            && self.weekday.is_none()
            && self.weeks.is_none()
            && self.color.is_none()
            && self.note.is_none()
    }

    /// Returns the draft of `course` with this patch applied.
    pub fn apply_to(&self, course: &Course) -> CourseDraft {
        let mut draft = course.to_draft();
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(classroom) = &self.classroom {
            draft.classroom = classroom.clone();
        }
        if let Some(teacher) = &self.teacher {
            draft.teacher = teacher.clone();
        }
        if let Some(range) = self.range {
            draft.range = range;
        }
        if let Some(weekday) = self.weekday {
            draft.weekday = weekday;
        }
        if let Some(weeks) = &self.weeks {
            draft.weeks = weeks.clone();
        }
        if let Some(color) = self.color {
            draft.color = Some(color);
        }
        if let Some(note) = &self.note {
            draft.note = note.clone();
        }
        draft
    }
}
