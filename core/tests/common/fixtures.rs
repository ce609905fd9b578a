// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use classtable_core::{
    ClassTable, Config, CourseDraft, DefaultLessons, LessonTimePeriodInfo, ScheduleDraft,
    Weekday,
};
use jiff::civil::{Date, date};

/// Monday of the first week used by the fixtures.
pub const TERM_START: Date = date(2025, 9, 1);

/// Creates a test configuration storing state in `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    TestConfigBuilder::new().with_state_dir(state_dir).build()
}

/// Builder for test configurations.
#[derive(Debug, Default)]
pub struct TestConfigBuilder {
    state_dir: Option<PathBuf>,
    default_total_weeks: Option<u16>,
    default_lessons: Option<DefaultLessons>,
}

impl TestConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state_dir(mut self, state_dir: &Path) -> Self {
        self.state_dir = Some(state_dir.to_path_buf());
        self
    }

    #[must_use]
    pub fn with_total_weeks(mut self, weeks: u16) -> Self {
        self.default_total_weeks = Some(weeks);
        self
    }

    #[must_use]
    pub fn with_evening(mut self, evening: LessonTimePeriodInfo) -> Self {
        let mut lessons = self.default_lessons.unwrap_or_default();
        lessons.evening = evening;
        self.default_lessons = Some(lessons);
        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        let defaults = Config::default();
        Config {
            state_dir: self.state_dir,
            default_total_weeks: self
                .default_total_weeks
                .unwrap_or(defaults.default_total_weeks),
            default_lessons: self.default_lessons.unwrap_or(defaults.default_lessons),
        }
    }
}

/// Opens an instance on `state_dir` whose current date is `today`.
pub async fn open_app(state_dir: &Path, today: Date) -> ClassTable {
    let mut app = ClassTable::new(test_config(state_dir))
        .await
        .expect("Failed to open classtable");
    app.set_today(today);
    app
}

/// A schedule draft starting on [`TERM_START`].
#[must_use]
pub fn test_schedule_draft(name: &str) -> ScheduleDraft {
    ScheduleDraft::new(name, TERM_START)
}

/// A course draft, with `range` and `weeks` given as expressions.
#[must_use]
pub fn test_course_draft(name: &str, weekday: Weekday, range: &str, weeks: &str) -> CourseDraft {
    CourseDraft {
        name: name.to_string(),
        classroom: String::new(),
        teacher: String::new(),
        range: range.parse().expect("invalid range"),
        weekday,
        weeks: weeks.parse().expect("invalid weeks"),
        color: None,
        note: String::new(),
    }
}
