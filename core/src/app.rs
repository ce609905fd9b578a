// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::Path;

use jiff::civil::Date;
use jiff::{Timestamp, Zoned};
use tokio::fs;
use uuid::Uuid;

use crate::export::{self, ScheduleBundle};
use crate::localdb::LocalDb;
use crate::localdb::courses::CourseRecord;
use crate::localdb::schedules::ScheduleRecord;
use crate::short_id::{ShortIds, WithShortId};
use crate::table::{self, WeekTable};
use crate::{
    Config, Course, CourseDraft, CoursePatch, Id, Kind, Range, Schedule, ScheduleDraft,
    SchedulePatch, Settings, SettingsPatch, TermWeek, ValidationError, WeekList, WeekPattern,
    Weekday,
};

/// Class timetable application core.
#[derive(Debug, Clone)]
pub struct ClassTable {
    today: Date,
    config: Config,
    db: LocalDb,
    short_ids: ShortIds,
}

impl ClassTable {
    /// Creates a new instance with the given configuration.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        prepare(&config).await?;

        let db = LocalDb::open(config.state_dir.as_deref())
            .await
            .map_err(|e| format!("Failed to initialize db: {e}"))?;

        Ok(Self::with_db(config, db))
    }

    fn with_db(config: Config, db: LocalDb) -> Self {
        Self {
            today: Zoned::now().date(),
            config,
            short_ids: ShortIds::new(db.clone()),
            db,
        }
    }

    /// The current date of this instance.
    pub fn today(&self) -> Date {
        self.today
    }

    /// Refresh the current date to today.
    pub fn refresh_today(&mut self) {
        self.today = Zoned::now().date();
    }

    /// Pretend the current date is `date`.
    pub fn set_today(&mut self, date: Date) {
        self.today = date;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A schedule draft starting this week, with the configured defaults.
    pub fn default_schedule_draft(&self, name: impl Into<String>) -> ScheduleDraft {
        let mut draft = ScheduleDraft::new(name, self.today);
        draft.total_weeks = self.config.default_total_weeks;
        match self.config.default_lessons.generate() {
            Ok(lessons) => draft.lessons = lessons,
            Err(e) => tracing::warn!(err = %e, "invalid default lessons, using built-in times"),
        }
        draft
    }

    /// Add a new schedule from the given draft.
    pub async fn new_schedule(
        &self,
        draft: ScheduleDraft,
    ) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        draft.validate()?;
        let uid = self.generate_uid().await?;
        let schedule = draft.into_schedule(uid);
        self.upsert_schedule(&schedule).await?;
        tracing::debug!(uid = %schedule.uid, "schedule created");

        let mut settings = self.settings().await?;
        if settings.selected_schedule.is_none() {
            settings.selected_schedule = Some(schedule.uid.clone());
            self.db.save_settings(&settings).await?;
        }

        self.short_ids.schedule(schedule).await
    }

    /// Get a schedule by its id, deleted or not.
    pub async fn get_schedule(&self, id: &Id) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        let schedule = self.find_schedule(id).await?;
        self.short_ids.schedule(schedule).await
    }

    /// List schedules in creation order.
    pub async fn list_schedules(
        &self,
        include_deleted: bool,
    ) -> Result<Vec<WithShortId<Schedule>>, Box<dyn Error>> {
        let schedules = self.load_schedules(include_deleted).await?;
        self.short_ids.schedules(schedules).await
    }

    /// Update a live schedule. Changes leaving courses outside of the term
    /// or the lesson slots are rejected.
    pub async fn update_schedule(
        &self,
        id: &Id,
        patch: SchedulePatch,
    ) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        let schedule = self.find_live_schedule(id).await?;
        let draft = patch.apply_to(&schedule);
        draft.validate()?;

        let mut updated = draft.into_schedule(schedule.uid.clone());
        updated.deleted = schedule.deleted;

        let courses = self.load_courses(&updated.uid).await?;
        let out_of_bounds = updated.courses_out_of_bounds(&courses);
        if !out_of_bounds.is_empty() {
            let names = out_of_bounds.into_iter().map(str::to_string).collect();
            return Err(ValidationError::CoursesOutOfBounds(names).into());
        }

        self.upsert_schedule(&updated).await?;
        self.short_ids.schedule(updated).await
    }

    /// Move a schedule to the trash. The selection moves to the first
    /// remaining live schedule.
    pub async fn delete_schedule(&self, id: &Id) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        let mut schedule = self.find_live_schedule(id).await?;
        self.set_deleted(&schedule.uid, true).await?;
        schedule.deleted = true;
        tracing::debug!(uid = %schedule.uid, "schedule moved to trash");

        let mut settings = self.settings().await?;
        if settings.selected_schedule.as_deref() == Some(schedule.uid.as_str()) {
            settings.selected_schedule = self.first_live_schedule().await?.map(|s| s.uid);
            self.db.save_settings(&settings).await?;
        }

        self.short_ids.schedule(schedule).await
    }

    /// Restore a schedule from the trash.
    pub async fn restore_schedule(
        &self,
        id: &Id,
    ) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        let mut schedule = self.find_schedule(id).await?;
        if !schedule.deleted {
            return Err(format!("Schedule {} is not deleted", schedule.name).into());
        }
        self.set_deleted(&schedule.uid, false).await?;
        schedule.deleted = false;

        let mut settings = self.settings().await?;
        if settings.selected_schedule.is_none() {
            settings.selected_schedule = Some(schedule.uid.clone());
            self.db.save_settings(&settings).await?;
        }

        self.short_ids.schedule(schedule).await
    }

    /// Permanently remove a schedule in the trash, together with its courses.
    pub async fn purge_schedule(&self, id: &Id) -> Result<Schedule, Box<dyn Error>> {
        let schedule = self.find_schedule(id).await?;
        if !schedule.deleted {
            return Err(format!(
                "Schedule {} must be deleted before it can be purged",
                schedule.name
            )
            .into());
        }

        self.db
            .schedules
            .purge(&schedule.uid)
            .await
            .map_err(|e| format!("Failed to purge schedule: {e}"))?;
        tracing::debug!(uid = %schedule.uid, "schedule purged");
        Ok(schedule)
    }

    /// Make a live schedule the one shown by default.
    pub async fn select_schedule(&self, id: &Id) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        let schedule = self.find_live_schedule(id).await?;
        let mut settings = self.settings().await?;
        settings.selected_schedule = Some(schedule.uid.clone());
        self.db.save_settings(&settings).await?;
        self.short_ids.schedule(schedule).await
    }

    /// The selected schedule, or the first live one when the selection is
    /// unset or no longer live.
    pub async fn selected_schedule(&self) -> Result<Option<WithShortId<Schedule>>, Box<dyn Error>> {
        let settings = self.settings().await?;
        if let Some(uid) = &settings.selected_schedule {
            let loaded = self.load_schedule(uid).await?;
            if let Some(schedule) = loaded.filter(|a| !a.deleted) {
                return Ok(Some(self.short_ids.schedule(schedule).await?));
            }
            tracing::warn!(%uid, "selected schedule is gone, falling back");
        }

        let first = self.first_live_schedule().await?;
        match first {
            Some(schedule) => Ok(Some(self.short_ids.schedule(schedule).await?)),
            None => Ok(None),
        }
    }

    /// A course draft for the schedule: the first two slots of Monday in every week.
    pub fn default_course_draft(&self, schedule: &Schedule) -> CourseDraft {
        let lesson_count = schedule.lessons.lesson_count();
        let range = Range::new(1, lesson_count.clamp(1, 2)).unwrap_or(Range::FIRST);
        CourseDraft {
            name: String::new(),
            classroom: String::new(),
            teacher: String::new(),
            range,
            weekday: Weekday::Monday,
            weeks: WeekList::from_pattern(WeekPattern::All, schedule.total_weeks),
            color: None,
            note: String::new(),
        }
    }

    /// Add a new course to a live schedule.
    pub async fn new_course(
        &self,
        schedule_id: &Id,
        draft: CourseDraft,
    ) -> Result<WithShortId<Course>, Box<dyn Error>> {
        let schedule = self.find_live_schedule(schedule_id).await?;
        let courses = self.load_courses(&schedule.uid).await?;
        check_course(&draft, &schedule, None, &courses)?;

        let uid = self.generate_uid().await?;
        let course = draft.into_course(uid, schedule.uid);
        self.upsert_course(&course).await?;
        tracing::debug!(uid = %course.uid, "course created");
        self.short_ids.course(course).await
    }

    pub async fn get_course(&self, id: &Id) -> Result<WithShortId<Course>, Box<dyn Error>> {
        let course = self.find_course(id).await?;
        self.short_ids.course(course).await
    }

    /// List the courses of a schedule, ordered by weekday and start slot.
    pub async fn list_courses(
        &self,
        schedule_id: &Id,
    ) -> Result<Vec<WithShortId<Course>>, Box<dyn Error>> {
        let schedule = self.find_schedule(schedule_id).await?;
        let courses = self.load_courses(&schedule.uid).await?;
        self.short_ids.courses(courses).await
    }

    pub async fn update_course(
        &self,
        id: &Id,
        patch: CoursePatch,
    ) -> Result<WithShortId<Course>, Box<dyn Error>> {
        let course = self.find_course(id).await?;
        let schedule = self.live_schedule_of(&course).await?;
        let draft = patch.apply_to(&course);

        let courses = self.load_courses(&schedule.uid).await?;
        check_course(&draft, &schedule, Some(&course.uid), &courses)?;

        let updated = draft.into_course(course.uid, course.schedule_uid);
        self.upsert_course(&updated).await?;
        self.short_ids.course(updated).await
    }

    pub async fn delete_course(&self, id: &Id) -> Result<Course, Box<dyn Error>> {
        let course = self.find_course(id).await?;
        self.live_schedule_of(&course).await?;
        self.db
            .courses
            .delete(&course.uid)
            .await
            .map_err(|e| format!("Failed to delete course: {e}"))?;
        Ok(course)
    }

    /// The weeks the draft can take in the schedule without conflicts.
    pub async fn valid_weeks(
        &self,
        schedule_id: &Id,
        draft: &CourseDraft,
        exclude: Option<&Id>,
    ) -> Result<WeekList, Box<dyn Error>> {
        let schedule = self.find_schedule(schedule_id).await?;
        let courses = self.load_courses(&schedule.uid).await?;
        let exclude = match exclude {
            Some(id) => Some(self.short_ids.get_uid(id, Kind::Course).await?),
            None => None,
        };
        Ok(table::valid_weeks(draft, exclude.as_deref(), &courses))
    }

    /// The laid-out courses of a week of the schedule.
    pub async fn week_table(&self, schedule_id: &Id, week: u16) -> Result<WeekTable, Box<dyn Error>> {
        let schedule = self.find_schedule(schedule_id).await?;
        if week == 0 || week > schedule.total_weeks {
            return Err(ValidationError::WeekOutOfBounds {
                week,
                total_weeks: schedule.total_weeks,
            }
            .into());
        }
        let courses = self.load_courses(&schedule.uid).await?;
        Ok(WeekTable::build(&schedule, &courses, week))
    }

    /// The courses taking place on a date, in slot order.
    pub async fn courses_on(
        &self,
        schedule_id: &Id,
        date: Date,
    ) -> Result<(TermWeek, Vec<WithShortId<Course>>), Box<dyn Error>> {
        let schedule = self.find_schedule(schedule_id).await?;
        let term_week = schedule.week_of(date);
        let Some(week) = term_week.week() else {
            return Ok((term_week, Vec::new()));
        };

        let weekday = Weekday::from(date.weekday());
        let mut courses: Vec<Course> = self
            .load_courses(&schedule.uid)
            .await?
            .into_iter()
            .filter(|c| c.weekday == weekday && c.is_active(week))
            .collect();
        courses.sort_by_key(|c| (c.range.start(), c.range.end()));
        Ok((term_week, self.short_ids.courses(courses).await?))
    }

    pub async fn settings(&self) -> Result<Settings, Box<dyn Error>> {
        self.db.load_settings().await
    }

    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, Box<dyn Error>> {
        let settings = patch.apply_to(&self.settings().await?);
        self.db.save_settings(&settings).await?;
        Ok(settings)
    }

    /// Write a schedule and its courses to a bundle file.
    #[tracing::instrument(skip(self))]
    pub async fn export_schedule(&self, id: &Id, path: &Path) -> Result<(), Box<dyn Error>> {
        let schedule = self.find_schedule(id).await?;
        let courses = self.load_courses(&schedule.uid).await?;
        let bundle = ScheduleBundle::new(&schedule, &courses);
        let bytes = export::encode(&bundle, Timestamp::now())?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
        }
        fs::write(path, bytes)
            .await
            .map_err(|e| format!("Failed to write bundle {}: {e}", path.display()))?;

        tracing::debug!(courses = courses.len(), "schedule exported");
        Ok(())
    }

    /// Create a new schedule from a bundle file. Nothing is written unless
    /// the schedule and every course are valid.
    #[tracing::instrument(skip(self))]
    pub async fn import_schedule(&self, path: &Path) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| format!("Failed to read bundle {}: {e}", path.display()))?;
        let (manifest, bundle) = export::decode(&bytes)?;
        tracing::debug!(app_version = %manifest.app_version, "importing schedule bundle");

        bundle.schedule.validate()?;
        let schedule = bundle.schedule.into_schedule(self.generate_uid().await?);

        let mut courses: Vec<Course> = Vec::with_capacity(bundle.courses.len());
        for draft in bundle.courses {
            check_course(&draft, &schedule, None, &courses)?;
            let uid = self.generate_uid().await?;
            courses.push(draft.into_course(uid, schedule.uid.clone()));
        }

        let schedule_record = ScheduleRecord::from(&schedule)?;
        let course_records: Vec<CourseRecord> = courses.iter().map(CourseRecord::from).collect();
        self.db
            .insert_schedule_with_courses(&schedule_record, &course_records)
            .await
            .map_err(|e| format!("Failed to import schedule: {e}"))?;

        let mut settings = self.settings().await?;
        if settings.selected_schedule.is_none() {
            settings.selected_schedule = Some(schedule.uid.clone());
            self.db.save_settings(&settings).await?;
        }

        self.short_ids.schedule(schedule).await
    }

    /// Close the instance, releasing the datastore.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        self.db.close().await
    }

    async fn find_schedule(&self, id: &Id) -> Result<Schedule, Box<dyn Error>> {
        let uid = self.short_ids.get_uid(id, Kind::Schedule).await?;
        self.load_schedule(&uid)
            .await?
            .ok_or_else(|| format!("Schedule not found: {id}").into())
    }

    async fn find_live_schedule(&self, id: &Id) -> Result<Schedule, Box<dyn Error>> {
        let schedule = self.find_schedule(id).await?;
        if schedule.deleted {
            return Err(format!("Schedule {} is deleted, restore it first", schedule.name).into());
        }
        Ok(schedule)
    }

    async fn live_schedule_of(&self, course: &Course) -> Result<Schedule, Box<dyn Error>> {
        self.find_live_schedule(&Id::Uid(course.schedule_uid.clone()))
            .await
    }

    async fn find_course(&self, id: &Id) -> Result<Course, Box<dyn Error>> {
        let uid = self.short_ids.get_uid(id, Kind::Course).await?;
        match self.db.courses.get(&uid).await {
            Ok(Some(record)) => Course::try_from(record),
            Ok(None) => Err(format!("Course not found: {id}").into()),
            Err(e) => Err(format!("Failed to get course: {e}").into()),
        }
    }

    async fn load_schedule(&self, uid: &str) -> Result<Option<Schedule>, Box<dyn Error>> {
        match self.db.schedules.get(uid).await {
            Ok(Some(record)) => Ok(Some(Schedule::try_from(record)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(format!("Failed to get schedule: {e}").into()),
        }
    }

    async fn load_schedules(&self, include_deleted: bool) -> Result<Vec<Schedule>, Box<dyn Error>> {
        self.db
            .schedules
            .list(include_deleted)
            .await
            .map_err(|e| format!("Failed to list schedules: {e}"))?
            .into_iter()
            .map(Schedule::try_from)
            .collect()
    }

    async fn first_live_schedule(&self) -> Result<Option<Schedule>, Box<dyn Error>> {
        Ok(self.load_schedules(false).await?.into_iter().next())
    }

    async fn load_courses(&self, schedule_uid: &str) -> Result<Vec<Course>, Box<dyn Error>> {
        self.db
            .courses
            .list(schedule_uid)
            .await
            .map_err(|e| format!("Failed to list courses: {e}"))?
            .into_iter()
            .map(Course::try_from)
            .collect()
    }

    async fn upsert_schedule(&self, schedule: &Schedule) -> Result<(), Box<dyn Error>> {
        let record = ScheduleRecord::from(schedule)?;
        self.db
            .schedules
            .upsert(&record)
            .await
            .map_err(|e| format!("Failed to upsert schedule: {e}").into())
    }

    async fn set_deleted(&self, uid: &str, deleted: bool) -> Result<(), Box<dyn Error>> {
        self.db
            .schedules
            .set_deleted(uid, deleted)
            .await
            .map_err(|e| format!("Failed to update schedule: {e}"))?;
        Ok(())
    }

    async fn upsert_course(&self, course: &Course) -> Result<(), Box<dyn Error>> {
        self.db
            .courses
            .upsert(&CourseRecord::from(course))
            .await
            .map_err(|e| format!("Failed to upsert course: {e}").into())
    }

    async fn generate_uid(&self) -> Result<String, Box<dyn Error>> {
        for _ in 0..16 {
            let uid = Uuid::new_v4().to_string();
            if self.db.schedules.get(&uid).await?.is_some()
                || self.db.courses.get(&uid).await?.is_some()
            {
                continue;
            }
            return Ok(uid);
        }

        Err("Failed to generate a unique UID after multiple attempts".into())
    }
}

/// Validates a course draft and rejects conflicts with `others`.
fn check_course(
    draft: &CourseDraft,
    schedule: &Schedule,
    exclude: Option<&str>,
    others: &[Course],
) -> Result<(), ValidationError> {
    draft.validate(schedule)?;
    let conflicts = table::conflicts(draft, exclude, others);
    if !conflicts.is_empty() {
        return Err(ValidationError::Conflict(conflicts));
    }
    Ok(())
}

async fn prepare(config: &Config) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = &config.state_dir {
        tracing::debug!(path = %dir.display(), "ensuring state directory exists");
        fs::create_dir_all(dir)
            .await
            .map_err(|e| format!("Failed to create state directory: {e}"))?;
    }
    Ok(())
}
