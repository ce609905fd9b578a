// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! How configuration affects new schedules and the datastore location.

use classtable_core::{ClassTable, Config, LessonTimePeriodInfo, MAX_WEEKS};
use jiff::civil::{date, time};

use crate::common::{TestConfigBuilder, setup_temp_dirs};

#[tokio::test]
async fn config_defaults_shape_new_schedules() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_total_weeks(20)
        .with_evening(LessonTimePeriodInfo::new(time(18, 30, 0, 0), 40, 5, 3))
        .build();

    let mut app = ClassTable::new(config).await.unwrap();
    app.set_today(date(2025, 9, 10));

    let draft = app.default_schedule_draft("Fall");
    assert_eq!(draft.total_weeks, 20);
    assert_eq!(draft.lessons.lesson_count(), 11);
    assert_eq!(draft.lessons.evening[0].start, time(18, 30, 0, 0));
    assert_eq!(draft.lessons.evening[2].end, time(20, 40, 0, 0));

    app.new_schedule(draft).await.unwrap();
    assert!(temp_dirs.state_dir.join("classtable.db").exists());
}

#[tokio::test]
async fn config_creates_missing_state_dir() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let nested = temp_dirs.state_dir.join("deeper").join("state");
    let config = TestConfigBuilder::new().with_state_dir(&nested).build();

    let app = ClassTable::new(config).await.unwrap();
    assert!(nested.is_dir());
    app.close().await.unwrap();
}

#[tokio::test]
async fn config_rejects_invalid_defaults() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = TestConfigBuilder::new()
        .with_state_dir(&temp_dirs.state_dir)
        .with_total_weeks(MAX_WEEKS + 1)
        .build();
    assert!(ClassTable::new(config).await.is_err());
}

#[test]
fn config_parses_from_toml() {
    let toml_str = r#"
state_dir = "/tmp/classtable-state"
default_total_weeks = 18

[default_lessons]
morning = { start = "08:30:00", lesson_minutes = 40, break_minutes = 10, count = 5 }
afternoon = { start = "14:00:00", lesson_minutes = 45, break_minutes = 10, count = 4 }
evening = { start = "19:00:00", lesson_minutes = 45, break_minutes = 5, count = 0 }
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.default_total_weeks, 18);
    assert_eq!(config.default_lessons.morning.count, 5);
    assert_eq!(config.default_lessons.generate().unwrap().lesson_count(), 9);

    let empty: Config = toml::from_str("").unwrap();
    assert!(empty.state_dir.is_none());
}
