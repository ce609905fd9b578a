// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Verifies that common test utilities work correctly.

mod common;

use classtable_core::Weekday;

use common::{setup_temp_dirs, test_config, test_course_draft, test_schedule_draft};

#[tokio::test]
async fn common_module_temp_dirs_work() {
    let dirs = setup_temp_dirs().await.unwrap();
    assert!(dirs.state_dir.exists());
    assert!(dirs.export_dir.exists());
}

#[tokio::test]
async fn common_module_fixtures_work() {
    let dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&dirs.state_dir);
    assert_eq!(config.state_dir.as_deref(), Some(dirs.state_dir.as_path()));

    let schedule = test_schedule_draft("Fall");
    assert_eq!(schedule.validate(), Ok(()));

    let course = test_course_draft("Math", Weekday::Monday, "1-2", "1-16 odd");
    assert_eq!(course.weeks.len(), 8);
}
