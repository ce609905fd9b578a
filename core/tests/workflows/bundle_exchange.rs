// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Exporting a schedule from one datastore and importing it into another.

use classtable_core::{Id, Weekday};
use jiff::civil::date;

use crate::common::{open_app, setup_temp_dirs, test_course_draft, test_schedule_draft};

#[tokio::test]
async fn bundle_exchange_between_datastores() {
    let source_dirs = setup_temp_dirs().await.unwrap();
    let target_dirs = setup_temp_dirs().await.unwrap();
    let path = source_dirs.export_dir.join("fall.ctb");
    let today = date(2025, 9, 10);

    let source = open_app(&source_dirs.state_dir, today).await;
    let fall = source.new_schedule(test_schedule_draft("Fall")).await.unwrap();
    let fid = Id::Uid(fall.uid.clone());
    for (name, weekday, range, weeks) in [
        ("Math", Weekday::Monday, "1-2", "1-16"),
        ("Physics", Weekday::Monday, "3-4", "1-15 odd"),
        ("Art", Weekday::Thursday, "9-10", "4, 6, 8"),
    ] {
        source
            .new_course(&fid, test_course_draft(name, weekday, range, weeks))
            .await
            .unwrap();
    }
    source.export_schedule(&fid, &path).await.unwrap();

    let target = open_app(&target_dirs.state_dir, today).await;
    let imported = target.import_schedule(&path).await.unwrap();
    assert_eq!(imported.name, "Fall");
    assert_eq!(imported.term_start, fall.term_start);

    // the first schedule of an empty datastore is selected
    let selected = target.selected_schedule().await.unwrap().unwrap();
    assert_eq!(selected.uid, imported.uid);

    let source_courses = source.list_courses(&fid).await.unwrap();
    let target_courses = target
        .list_courses(&Id::Uid(imported.uid.clone()))
        .await
        .unwrap();
    assert_eq!(source_courses.len(), target_courses.len());
    for (a, b) in source_courses.iter().zip(&target_courses) {
        assert_ne!(a.uid, b.uid);
        assert_eq!(a.to_draft(), b.to_draft());
    }
}

#[tokio::test]
async fn bundle_exchange_rejects_garbage() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.export_dir.join("garbage.ctb");
    tokio::fs::write(&path, b"definitely not a zip").await.unwrap();

    let app = open_app(&temp_dirs.state_dir, date(2025, 9, 10)).await;
    assert!(app.import_schedule(&path).await.is_err());
    assert!(app.import_schedule(&temp_dirs.export_dir.join("missing.ctb")).await.is_err());
    assert!(app.list_schedules(true).await.unwrap().is_empty());
}
