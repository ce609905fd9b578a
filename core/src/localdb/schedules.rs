// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use sqlx::{SqliteExecutor, SqlitePool};

use crate::{LessonsPerDay, Schedule};

#[derive(Debug, Clone)]
pub struct Schedules {
    pool: SqlitePool,
}

impl Schedules {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, schedule: &ScheduleRecord) -> Result<(), sqlx::Error> {
        Self::upsert_with(&self.pool, schedule).await
    }

    pub async fn upsert_with<'e>(
        executor: impl SqliteExecutor<'e>,
        schedule: &ScheduleRecord,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO schedules (uid, name, term_start, total_weeks, display_weekends, show_inactive, lessons, deleted)
VALUES (?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(uid) DO UPDATE SET
    name             = excluded.name,
    term_start       = excluded.term_start,
    total_weeks      = excluded.total_weeks,
    display_weekends = excluded.display_weekends,
    show_inactive    = excluded.show_inactive,
    lessons          = excluded.lessons,
    deleted          = excluded.deleted;
";

        sqlx::query(SQL)
            .bind(&schedule.uid)
            .bind(&schedule.name)
            .bind(&schedule.term_start)
            .bind(schedule.total_weeks)
            .bind(schedule.display_weekends)
            .bind(schedule.show_inactive)
            .bind(&schedule.lessons)
            .bind(schedule.deleted)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn get(&self, uid: &str) -> Result<Option<ScheduleRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT uid, name, term_start, total_weeks, display_weekends, show_inactive, lessons, deleted
FROM schedules
WHERE uid = ?;
";

        sqlx::query_as(SQL)
            .bind(uid)
            .fetch_optional(&self.pool)
            .await
    }

    /// Lists schedules in creation order.
    pub async fn list(&self, include_deleted: bool) -> Result<Vec<ScheduleRecord>, sqlx::Error> {
        let mut sql = "\
SELECT uid, name, term_start, total_weeks, display_weekends, show_inactive, lessons, deleted
FROM schedules
"
        .to_string();
        if !include_deleted {
            sql += "WHERE deleted = 0 ";
        }
        sql += "ORDER BY rowid;";

        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    pub async fn set_deleted(&self, uid: &str, deleted: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE schedules SET deleted = ? WHERE uid = ?;")
            .bind(deleted)
            .bind(uid)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes the schedule together with its courses and their short ids.
    pub async fn purge(&self, uid: &str) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM short_ids WHERE uid IN (SELECT uid FROM courses WHERE schedule_uid = ?);",
        )
        .bind(uid)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM courses WHERE schedule_uid = ?;")
            .bind(uid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM short_ids WHERE uid = ?;")
            .bind(uid)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM schedules WHERE uid = ?;")
            .bind(uid)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScheduleRecord {
    uid: String,
    name: String,
    term_start: String,
    total_weeks: i64,
    display_weekends: bool,
    show_inactive: bool,
    /// Lesson times as JSON.
    lessons: String,
    deleted: bool,
}

impl ScheduleRecord {
    pub fn from(schedule: &Schedule) -> Result<Self, Box<dyn Error>> {
        let lessons = serde_json::to_string(&schedule.lessons)
            .map_err(|e| format!("Failed to serialize lesson times: {e}"))?;

        Ok(Self {
            uid: schedule.uid.clone(),
            name: schedule.name.clone(),
            term_start: schedule.term_start.to_string(),
            total_weeks: i64::from(schedule.total_weeks),
            display_weekends: schedule.display_weekends,
            show_inactive: schedule.show_inactive,
            lessons,
            deleted: schedule.deleted,
        })
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl TryFrom<ScheduleRecord> for Schedule {
    type Error = Box<dyn Error>;

    fn try_from(record: ScheduleRecord) -> Result<Self, Self::Error> {
        let term_start = record
            .term_start
            .parse()
            .map_err(|e| format!("Invalid term start of schedule {}: {e}", record.uid))?;
        let total_weeks = u16::try_from(record.total_weeks)
            .map_err(|e| format!("Invalid total weeks of schedule {}: {e}", record.uid))?;
        let lessons: LessonsPerDay = serde_json::from_str(&record.lessons)
            .map_err(|e| format!("Invalid lesson times of schedule {}: {e}", record.uid))?;

        Ok(Schedule {
            uid: record.uid,
            name: record.name,
            term_start,
            total_weeks,
            display_weekends: record.display_weekends,
            show_inactive: record.show_inactive,
            lessons,
            deleted: record.deleted,
        })
    }
}
