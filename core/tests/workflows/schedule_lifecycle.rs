// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule lifecycle: create, select, edit, trash, restore and purge.

use classtable_core::{Id, SchedulePatch, TermWeek, Weekday};
use jiff::civil::date;

use crate::common::{open_app, setup_temp_dirs, test_course_draft, test_schedule_draft};

#[tokio::test]
async fn schedule_lifecycle_survives_reopen() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let today = date(2025, 9, 10);

    let fall_uid = {
        let app = open_app(&temp_dirs.state_dir, today).await;
        let fall = app.new_schedule(test_schedule_draft("Fall")).await.unwrap();
        app.new_course(
            &Id::Uid(fall.uid.clone()),
            test_course_draft("Math", Weekday::Wednesday, "1-2", "1-16"),
        )
        .await
        .unwrap();
        let uid = fall.uid.clone();
        app.close().await.unwrap();
        uid
    };

    let app = open_app(&temp_dirs.state_dir, today).await;
    let selected = app.selected_schedule().await.unwrap().unwrap();
    assert_eq!(selected.uid, fall_uid);

    let (week, courses) = app
        .courses_on(&Id::Uid(fall_uid.clone()), today)
        .await
        .unwrap();
    assert_eq!(week, TermWeek::Week(2));
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name, "Math");
}

#[tokio::test]
async fn schedule_lifecycle_trash_and_purge() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let app = open_app(&temp_dirs.state_dir, date(2025, 9, 10)).await;

    let fall = app.new_schedule(test_schedule_draft("Fall")).await.unwrap();
    let spring = app.new_schedule(test_schedule_draft("Spring")).await.unwrap();
    let fall_id = Id::ShortIdOrUid(fall.short_id.to_string());

    let patch = SchedulePatch {
        name: Some("Autumn".to_string()),
        ..Default::default()
    };
    let renamed = app.update_schedule(&fall_id, patch).await.unwrap();
    assert_eq!(renamed.name, "Autumn");
    assert_eq!(renamed.short_id, fall.short_id);

    app.delete_schedule(&fall_id).await.unwrap();
    assert_eq!(
        app.selected_schedule().await.unwrap().map(|s| s.uid.clone()),
        Some(spring.uid.clone())
    );

    // a deleted schedule cannot be edited or selected
    let patch = SchedulePatch {
        total_weeks: Some(18),
        ..Default::default()
    };
    assert!(app.update_schedule(&fall_id, patch).await.is_err());
    assert!(app.select_schedule(&fall_id).await.is_err());

    let trash: Vec<_> = app
        .list_schedules(true)
        .await
        .unwrap()
        .into_iter()
        .filter(|s| s.deleted)
        .collect();
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].uid, fall.uid);

    app.purge_schedule(&fall_id).await.unwrap();
    assert_eq!(app.list_schedules(true).await.unwrap().len(), 1);
}
