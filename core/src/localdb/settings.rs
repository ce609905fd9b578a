// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::{SqliteExecutor, SqlitePool};

/// Key/value store of JSON encoded settings.
#[derive(Debug, Clone)]
pub struct SettingsTable {
    pool: SqlitePool,
}

impl SettingsTable {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<(String, String)>, sqlx::Error> {
        sqlx::query_as("SELECT key, value FROM settings ORDER BY key;")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        Self::set_with(&self.pool, key, value).await
    }

    pub async fn set_with<'e>(
        executor: impl SqliteExecutor<'e>,
        key: &str,
        value: &str,
    ) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO settings (key, value) VALUES (?, ?)
ON CONFLICT(key) DO UPDATE SET value = excluded.value;
";

        sqlx::query(SQL)
            .bind(key)
            .bind(value)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<(), sqlx::Error> {
        Self::remove_with(&self.pool, key).await
    }

    pub async fn remove_with<'e>(
        executor: impl SqliteExecutor<'e>,
        key: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM settings WHERE key = ?;")
            .bind(key)
            .execute(executor)
            .await?;
        Ok(())
    }
}
