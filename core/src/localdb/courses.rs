// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use sqlx::{SqliteExecutor, SqlitePool};

use crate::{Course, Range, Weekday};

#[derive(Debug, Clone)]
pub struct Courses {
    pool: SqlitePool,
}

impl Courses {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, course: &CourseRecord) -> Result<(), sqlx::Error> {
        Self::upsert_with(&self.pool, course).await
    }

    pub async fn upsert_with<'e>(
        executor: impl SqliteExecutor<'e>,
        course: &CourseRecord,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO courses (uid, schedule_uid, name, classroom, teacher, range_start, range_end, weekday, weeks, color, note)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(uid) DO UPDATE SET
    schedule_uid = excluded.schedule_uid,
    name         = excluded.name,
    classroom    = excluded.classroom,
    teacher      = excluded.teacher,
    range_start  = excluded.range_start,
    range_end    = excluded.range_end,
    weekday      = excluded.weekday,
    weeks        = excluded.weeks,
    color        = excluded.color,
    note         = excluded.note;
";

        sqlx::query(SQL)
            .bind(&course.uid)
            .bind(&course.schedule_uid)
            .bind(&course.name)
            .bind(&course.classroom)
            .bind(&course.teacher)
            .bind(course.range_start)
            .bind(course.range_end)
            .bind(course.weekday)
            .bind(&course.weeks)
            .bind(&course.color)
            .bind(&course.note)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn get(&self, uid: &str) -> Result<Option<CourseRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT uid, schedule_uid, name, classroom, teacher, range_start, range_end, weekday, weeks, color, note
FROM courses
WHERE uid = ?;
";

        sqlx::query_as(SQL)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
    }

    /// Lists the courses of a schedule, ordered by weekday then start slot.
    pub async fn list(&self, schedule_uid: &str) -> Result<Vec<CourseRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT uid, schedule_uid, name, classroom, teacher, range_start, range_end, weekday, weeks, color, note
FROM courses
WHERE schedule_uid = ?
ORDER BY weekday, range_start, range_end, name;
";

        sqlx::query_as(SQL)
            .bind(schedule_uid)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn delete(&self, uid: &str) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM courses WHERE uid = ?;")
            .bind(uid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM short_ids WHERE uid = ?;")
            .bind(uid)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRecord {
    uid: String,
    schedule_uid: String,
    name: String,
    classroom: String,
    teacher: String,
    range_start: i64,
    range_end: i64,
    weekday: i64,
    /// Week expression, such as `1-15 odd`
    weeks: String,
    color: String,
    note: String,
}

impl CourseRecord {
    pub fn from(course: &Course) -> Self {
        Self {
            uid: course.uid.clone(),
            schedule_uid: course.schedule_uid.clone(),
            name: course.name.clone(),
            classroom: course.classroom.clone(),
            teacher: course.teacher.clone(),
            range_start: i64::from(course.range.start()),
            range_end: i64::from(course.range.end()),
            weekday: i64::from(course.weekday.number()),
            weeks: course.weeks.to_string(),
            color: course.color.to_string(),
            note: course.note.clone(),
        }
    }
}

impl TryFrom<CourseRecord> for Course {
    type Error = Box<dyn Error>;

    fn try_from(record: CourseRecord) -> Result<Self, Self::Error> {
        let uid = record.uid;
        let invalid = |what: &str| format!("Invalid {what} of course {uid}");

        let start = u8::try_from(record.range_start).map_err(|_| invalid("range"))?;
        let end = u8::try_from(record.range_end).map_err(|_| invalid("range"))?;
        let range = Range::new(start, end).map_err(|e| format!("{}: {e}", invalid("range")))?;

        let weekday = u8::try_from(record.weekday)
            .ok()
            .and_then(Weekday::from_number)
            .ok_or_else(|| invalid("weekday"))?;
        let weeks = record
            .weeks
            .parse()
            .map_err(|e| format!("{}: {e}", invalid("weeks")))?;
        let color = record
            .color
            .parse()
            .map_err(|e| format!("{}: {e}", invalid("colour")))?;

        Ok(Course {
            uid,
            schedule_uid: record.schedule_uid,
            name: record.name,
            classroom: record.classroom,
            teacher: record.teacher,
            range,
            weekday,
            weeks,
            color,
            note: record.note,
        })
    }
}
