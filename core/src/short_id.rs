// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::num::NonZeroU32;
use std::ops::Deref;

use serde::Serialize;

use crate::localdb::LocalDb;
use crate::{Course, Id, Kind, Schedule};

/// An item together with the short id it is displayed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithShortId<T> {
    pub short_id: NonZeroU32,
    #[serde(flatten)]
    pub inner: T,
}

impl<T> WithShortId<T> {
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for WithShortId<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Maps short ids to uids, assigning new short ids on first display.
#[derive(Debug, Clone)]
pub struct ShortIds {
    db: LocalDb,
}

impl ShortIds {
    pub fn new(db: LocalDb) -> Self {
        Self { db }
    }

    /// Resolves an id to a uid. A short id of another kind is an error.
    pub async fn get_uid(&self, id: &Id, kind: Kind) -> Result<String, Box<dyn Error>> {
        if let Some(short_id) = id.maybe_short_id()
            && let Some((uid, found)) = self
                .db
                .short_ids
                .get_by_short_id(short_id)
                .await
                .map_err(|e| format!("Failed to look up short id: {e}"))?
        {
            if found != kind {
                return Err(format!("Id {id} refers to a {found}, not a {kind}").into());
            }
            return Ok(uid);
        }

        Ok(id.as_uid().to_string())
    }

    pub async fn schedule(
        &self,
        schedule: Schedule,
    ) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        let short_id = self.assign(&schedule.uid, Kind::Schedule).await?;
        Ok(WithShortId {
            short_id,
            inner: schedule,
        })
    }

    pub async fn schedules(
        &self,
        schedules: Vec<Schedule>,
    ) -> Result<Vec<WithShortId<Schedule>>, Box<dyn Error>> {
        let mut with_short_ids = Vec::with_capacity(schedules.len());
        for schedule in schedules {
            with_short_ids.push(self.schedule(schedule).await?);
        }
        Ok(with_short_ids)
    }

    pub async fn course(&self, course: Course) -> Result<WithShortId<Course>, Box<dyn Error>> {
        let short_id = self.assign(&course.uid, Kind::Course).await?;
        Ok(WithShortId {
            short_id,
            inner: course,
        })
    }

    pub async fn courses(
        &self,
        courses: Vec<Course>,
    ) -> Result<Vec<WithShortId<Course>>, Box<dyn Error>> {
        let mut with_short_ids = Vec::with_capacity(courses.len());
        for course in courses {
            with_short_ids.push(self.course(course).await?);
        }
        Ok(with_short_ids)
    }

    async fn assign(&self, uid: &str, kind: Kind) -> Result<NonZeroU32, Box<dyn Error>> {
        self.db
            .short_ids
            .get_or_assign_short_id(uid, kind)
            .await
            .map_err(|e| format!("Failed to assign short id: {e}").into())
    }
}
