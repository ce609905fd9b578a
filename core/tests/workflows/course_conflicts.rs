// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Courses sharing slots: conflicts, valid weeks and the weekly grid.

use classtable_core::{CourseDraft, CoursePatch, Id, ValidationError, Weekday};
use jiff::civil::date;

use crate::common::{open_app, setup_temp_dirs, test_course_draft, test_schedule_draft};

#[tokio::test]
async fn course_conflicts_alternate_weeks_share_a_slot() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let app = open_app(&temp_dirs.state_dir, date(2025, 9, 10)).await;
    let s = app.new_schedule(test_schedule_draft("Fall")).await.unwrap();
    let sid = Id::Uid(s.uid.clone());

    app.new_course(&sid, test_course_draft("Math", Weekday::Tuesday, "3-4", "1-16 odd"))
        .await
        .unwrap();
    app.new_course(&sid, test_course_draft("Lab", Weekday::Tuesday, "3-4", "2-16 even"))
        .await
        .unwrap();

    let odd = app.week_table(&sid, 3).await.unwrap();
    let cell = odd.cell(Weekday::Tuesday, 3).unwrap();
    assert_eq!(cell.course.name, "Math");
    assert!(cell.active);
    // the inactive course behind the active one is not shown
    assert_eq!(odd.day(Weekday::Tuesday).unwrap().cells.len(), 1);

    let even = app.week_table(&sid, 4).await.unwrap();
    assert_eq!(even.cell(Weekday::Tuesday, 4).unwrap().course.name, "Lab");
}

#[tokio::test]
async fn course_conflicts_trimmed_to_valid_weeks() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let app = open_app(&temp_dirs.state_dir, date(2025, 9, 10)).await;
    let s = app.new_schedule(test_schedule_draft("Fall")).await.unwrap();
    let sid = Id::Uid(s.uid.clone());

    app.new_course(&sid, test_course_draft("Math", Weekday::Friday, "1-2", "1-8"))
        .await
        .unwrap();

    let draft = test_course_draft("Chemistry", Weekday::Friday, "2-3", "1-16");
    let err = app.new_course(&sid, draft.clone()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::Conflict(c)) if c.len() == 1
    ));

    let weeks = app.valid_weeks(&sid, &draft, None).await.unwrap();
    assert_eq!(weeks, "9-16".parse().unwrap());
    let chemistry = app
        .new_course(&sid, CourseDraft { weeks, ..draft })
        .await
        .unwrap();

    // moving Math onto Chemistry's weeks is refused, keeping it alone is fine
    let math = app.list_courses(&sid).await.unwrap().remove(0);
    let patch = CoursePatch {
        weeks: Some("1-10".parse().unwrap()),
        ..Default::default()
    };
    assert!(app.update_course(&Id::Uid(math.uid.clone()), patch).await.is_err());

    let patch = CoursePatch {
        teacher: Some("Dr. Chen".to_string()),
        ..Default::default()
    };
    let math = app.update_course(&Id::Uid(math.uid.clone()), patch).await.unwrap();
    assert_eq!(math.teacher, "Dr. Chen");

    let excluded = app
        .valid_weeks(
            &sid,
            &chemistry.to_draft(),
            Some(&Id::ShortIdOrUid(chemistry.short_id.to_string())),
        )
        .await
        .unwrap();
    assert_eq!(excluded, chemistry.weeks);
}
