// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use sqlx::SqlitePool;

use crate::Kind;

#[derive(Debug, Clone)]
pub struct ShortIds {
    pool: SqlitePool,
}

impl ShortIds {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The uid and kind behind a short id.
    pub async fn get_by_short_id(
        &self,
        short_id: NonZeroU32,
    ) -> Result<Option<(String, Kind)>, sqlx::Error> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT uid, kind FROM short_ids WHERE short_id = ?;")
                .bind(i64::from(short_id.get()))
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(uid, kind)| match kind_from_str(&kind) {
            Some(kind) => Some((uid, kind)),
            None => {
                tracing::warn!(%uid, %kind, "unknown short id kind");
                None
            }
        }))
    }

    pub async fn get_or_assign_short_id(
        &self,
        uid: &str,
        kind: Kind,
    ) -> Result<NonZeroU32, sqlx::Error> {
        const SQL: &str = "
INSERT INTO short_ids (uid, kind) VALUES (?, ?)
ON CONFLICT(uid) DO NOTHING
RETURNING short_id;
";

        if let Some((short_id,)) = sqlx::query_as::<_, (NonZeroU32,)>(SQL)
            .bind(uid)
            .bind(kind_to_str(kind))
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(short_id);
        }

        // the uid already has a short id
        let (short_id,): (NonZeroU32,) =
            sqlx::query_as("SELECT short_id FROM short_ids WHERE uid = ?;")
                .bind(uid)
                .fetch_one(&self.pool)
                .await?;

        Ok(short_id)
    }
}

fn kind_to_str(kind: Kind) -> &'static str {
    match kind {
        Kind::Schedule => "schedule",
        Kind::Course => "course",
    }
}

fn kind_from_str(kind: &str) -> Option<Kind> {
    match kind {
        "schedule" => Some(Kind::Schedule),
        "course" => Some(Kind::Course),
        _ => None,
    }
}
