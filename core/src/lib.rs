// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the classtable timetable manager: schedules, courses, the weekly
//! grid layout and their SQLite storage.

mod app;
mod config;
mod course;
mod error;
pub mod export;
mod lesson;
mod localdb;
mod range;
mod schedule;
mod settings;
mod short_id;
pub mod table;
mod types;
mod week;

pub use crate::app::ClassTable;
pub use crate::config::{APP_NAME, Config, DefaultLessons, expand_path, get_config_dir};
pub use crate::course::{Course, CourseDraft, CoursePatch};
pub use crate::error::ValidationError;
pub use crate::lesson::{DEFAULT_PERIODS, Lesson, LessonTimePeriodInfo, LessonsPerDay, Period};
pub use crate::range::Range;
pub use crate::schedule::{DEFAULT_TOTAL_WEEKS, Schedule, ScheduleDraft, SchedulePatch, TermWeek};
pub use crate::settings::{Settings, SettingsPatch, ThemeMode};
pub use crate::short_id::WithShortId;
pub use crate::table::{Conflict, DayColumn, PlacedCell, WeekTable};
pub use crate::types::{Color, Id, Kind, PALETTE, Weekday};
pub use crate::week::{MAX_WEEKS, WeekList, WeekPattern};
