// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

pub mod courses;
pub mod schedules;
pub mod settings;
pub mod short_ids;


use std::error::Error;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::Settings;
use crate::localdb::courses::{CourseRecord, Courses};
use crate::localdb::schedules::{ScheduleRecord, Schedules};
use crate::localdb::settings::SettingsTable;
use crate::localdb::short_ids::ShortIds;

/// Names distinct in-memory databases within one process.
pub(crate) static IN_MEMORY_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

const DB_NAME: &str = "classtable.db";

const KEY_THEME: &str = "theme";
const KEY_ACCENT: &str = "accent";
const KEY_SELECTED_SCHEDULE: &str = "selected_schedule";

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub schedules: Schedules,
    pub courses: Courses,
    pub short_ids: ShortIds,
    pub settings: SettingsTable,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `state_dir` is `None`, it opens an in-memory database.
    #[tracing::instrument]
    pub async fn open(state_dir: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let (options, pool_options) = match state_dir {
            Some(dir) => {
                let path = dir.join(DB_NAME);
                tracing::info!(path = %path.display(), "connecting to SQLite database");
                let options = SqliteConnectOptions::new()
                    .filename(path.to_str().ok_or("Invalid path encoding")?)
                    .create_if_missing(true);
                (options, SqlitePoolOptions::new())
            }
            None => {
                tracing::info!("connecting to in-memory SQLite database");
                let db_id = IN_MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
                let options = SqliteConnectOptions::new()
                    .filename(format!("file:memdb_{db_id}:?mode=memory&cache=shared"))
                    .in_memory(true)
                    .create_if_missing(true);
                // the database lives as long as one connection is open
                let pool_options = SqlitePoolOptions::new()
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
                (options, pool_options)
            }
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        Ok(LocalDb {
            schedules: Schedules::new(pool.clone()),
            courses: Courses::new(pool.clone()),
            short_ids: ShortIds::new(pool.clone()),
            settings: SettingsTable::new(pool.clone()),
            pool,
        })
    }

    /// Loads the settings, falling back to defaults for missing or unreadable keys.
    pub async fn load_settings(&self) -> Result<Settings, Box<dyn Error>> {
        let rows = self
            .settings
            .list()
            .await
            .map_err(|e| format!("Failed to load settings: {e}"))?;

        let mut settings = Settings::default();
        for (key, value) in rows {
            let parsed = match key.as_str() {
                KEY_THEME => serde_json::from_str(&value).map(|v| settings.theme = v),
                KEY_ACCENT => serde_json::from_str(&value).map(|v| settings.accent = v),
                KEY_SELECTED_SCHEDULE => {
                    serde_json::from_str(&value).map(|v| settings.selected_schedule = v)
                }
                _ => {
                    tracing::warn!(%key, "ignoring unknown settings key");
                    Ok(())
                }
            };
            if let Err(e) = parsed {
                tracing::warn!(%key, err = %e, "ignoring unreadable setting");
            }
        }
        Ok(settings)
    }

    /// Writes every settings key in one transaction.
    pub async fn save_settings(&self, settings: &Settings) -> Result<(), Box<dyn Error>> {
        let encode = |e: serde_json::Error| format!("Failed to encode settings: {e}");
        let theme = serde_json::to_string(&settings.theme).map_err(encode)?;
        let accent = serde_json::to_string(&settings.accent).map_err(encode)?;
        let selected = match &settings.selected_schedule {
            Some(uid) => Some(serde_json::to_string(uid).map_err(encode)?),
            None => None,
        };

        self.write_settings(&theme, &accent, selected.as_deref())
            .await
            .map_err(|e| format!("Failed to save settings: {e}").into())
    }

    async fn write_settings(
        &self,
        theme: &str,
        accent: &str,
        selected: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        SettingsTable::set_with(&mut *tx, KEY_THEME, theme).await?;
        SettingsTable::set_with(&mut *tx, KEY_ACCENT, accent).await?;
        if let Some(selected) = selected {
            SettingsTable::set_with(&mut *tx, KEY_SELECTED_SCHEDULE, selected).await?;
        } else {
            SettingsTable::remove_with(&mut *tx, KEY_SELECTED_SCHEDULE).await?;
        }
        tx.commit().await
    }

    /// Inserts a schedule together with its courses, all or nothing.
    pub async fn insert_schedule_with_courses(
        &self,
        schedule: &ScheduleRecord,
        courses: &[CourseRecord],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        Schedules::upsert_with(&mut *tx, schedule).await?;
        for course in courses {
            Courses::upsert_with(&mut *tx, course).await?;
        }
        tx.commit().await
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}
