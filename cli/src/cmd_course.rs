// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use classtable_core::{
    ClassTable, Color, Course, CourseDraft, CoursePatch, Id, Kind, Range, Schedule, WeekList,
    Weekday, WithShortId,
};
use clap::{Arg, ArgMatches, Command, arg};
use colored::Colorize;

use crate::arg::{CommonArgs, CourseArgs, IdArgs};
use crate::cmd_schedule::resolve_schedule;
use crate::course_formatter::{CourseColumn, CourseFormatter};
use crate::util::OutputFormat;

const COURSE_ID: IdArgs = IdArgs::new(Kind::Course);

#[derive(Debug, Clone)]
pub struct CmdCourseList {
    pub schedule: Option<Id>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdCourseList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the courses of a schedule")
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(schedule = ?self.schedule, "listing courses...");
        let schedule = resolve_schedule(app, self.schedule.as_ref()).await?;
        let courses = app.list_courses(&Id::Uid(schedule.uid.clone())).await?;
        if courses.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", format!("No courses in {}", schedule.name).italic());
            return Ok(());
        }

        print_courses(&schedule, &courses, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCourseNew {
    pub name: String,
    pub weekday: Option<Weekday>,
    pub range: Option<Range>,
    pub weeks: Option<WeekList>,
    pub classroom: Option<String>,
    pub teacher: Option<String>,
    pub color: Option<Color>,
    pub note: Option<String>,
    pub trim_conflicts: bool,
    pub schedule: Option<Id>,
    pub output_format: OutputFormat,
}

impl CmdCourseNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a course to a schedule")
            .arg(CourseArgs::name(true))
            .arg(CourseArgs::weekday())
            .arg(CourseArgs::range())
            .arg(CourseArgs::weeks())
            .arg(CourseArgs::classroom())
            .arg(CourseArgs::teacher())
            .arg(CourseArgs::color())
            .arg(CourseArgs::note())
            .arg(arg_trim_conflicts())
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: CourseArgs::get_name(matches).unwrap_or_default(),
            weekday: CourseArgs::get_weekday(matches),
            range: CourseArgs::get_range(matches),
            weeks: CourseArgs::get_weeks(matches),
            classroom: CourseArgs::get_classroom(matches),
            teacher: CourseArgs::get_teacher(matches),
            color: CourseArgs::get_color(matches),
            note: CourseArgs::get_note(matches),
            trim_conflicts: get_trim_conflicts(matches),
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    /// Fills the default draft of the schedule with the given fields.
    pub fn draft(&self, app: &ClassTable, schedule: &Schedule) -> CourseDraft {
        let mut draft = app.default_course_draft(schedule);
        draft.name = self.name.clone();
        if let Some(weekday) = self.weekday {
            draft.weekday = weekday;
        }
        if let Some(range) = self.range {
            draft.range = range;
        }
        if let Some(weeks) = &self.weeks {
            draft.weeks = weeks.clone();
        }
        if let Some(classroom) = &self.classroom {
            draft.classroom = classroom.clone();
        }
        if let Some(teacher) = &self.teacher {
            draft.teacher = teacher.clone();
        }
        if let Some(note) = &self.note {
            draft.note = note.clone();
        }
        draft.color = self.color;
        draft
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(name = %self.name, "adding course...");
        let schedule = resolve_schedule(app, self.schedule.as_ref()).await?;
        let schedule_id = Id::Uid(schedule.uid.clone());

        let mut draft = self.draft(app, &schedule);
        if self.trim_conflicts {
            let valid = app.valid_weeks(&schedule_id, &draft, None).await?;
            draft.weeks = trim_weeks(&draft, valid)?;
        }

        let course = app.new_course(&schedule_id, draft).await?;
        print_courses(&schedule, &[course], self.output_format, false);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCourseEdit {
    pub id: Id,
    pub patch: CoursePatch,
    pub trim_conflicts: bool,
    pub output_format: OutputFormat,
}

impl CmdCourseEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a course")
            .arg(COURSE_ID.id("edit"))
            .arg(CourseArgs::name(false))
            .arg(CourseArgs::weekday())
            .arg(CourseArgs::range())
            .arg(CourseArgs::weeks())
            .arg(CourseArgs::classroom())
            .arg(CourseArgs::teacher())
            .arg(CourseArgs::color())
            .arg(CourseArgs::note())
            .arg(arg_trim_conflicts())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let patch = CoursePatch {
            name: CourseArgs::get_name(matches),
            classroom: CourseArgs::get_classroom(matches),
            teacher: CourseArgs::get_teacher(matches),
            range: CourseArgs::get_range(matches),
            weekday: CourseArgs::get_weekday(matches),
            weeks: CourseArgs::get_weeks(matches),
            color: CourseArgs::get_color(matches),
            note: CourseArgs::get_note(matches),
        };
        if patch.is_empty() {
            return Err("Nothing to change, pass at least one field to edit".into());
        }

        Ok(Self {
            id: IdArgs::get_id(matches),
            patch,
            trim_conflicts: get_trim_conflicts(matches),
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "editing course...");
        let course = app.get_course(&self.id).await?;
        let schedule_id = Id::Uid(course.schedule_uid.clone());
        let schedule = app.get_schedule(&schedule_id).await?;

        let mut patch = self.patch;
        if self.trim_conflicts {
            let draft = patch.apply_to(&course);
            let exclude = Id::Uid(course.uid.clone());
            let valid = app.valid_weeks(&schedule_id, &draft, Some(&exclude)).await?;
            patch.weeks = Some(trim_weeks(&draft, valid)?);
        }

        let course = app.update_course(&Id::Uid(course.uid.clone()), patch).await?;
        print_courses(&schedule, &[course], self.output_format, false);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCourseDelete {
    pub id: Id,
}

impl CmdCourseDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete a course")
            .arg(COURSE_ID.id("delete"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "deleting course...");
        let course = app.delete_course(&self.id).await?;
        println!("Deleted course {}", course.name.bold());
        Ok(())
    }
}

fn arg_trim_conflicts() -> Arg {
    arg!(--"trim-conflicts" "Drop the weeks that clash with other courses instead of failing")
}

fn get_trim_conflicts(matches: &ArgMatches) -> bool {
    matches.get_flag("trim-conflicts")
}

/// The weeks left to the draft once the clashing ones are dropped.
fn trim_weeks(draft: &CourseDraft, valid: WeekList) -> Result<WeekList, Box<dyn Error>> {
    if valid.is_empty() {
        return Err(format!("Every week of {} clashes with other courses", draft.name.trim()).into());
    }

    let dropped = draft.weeks.difference(&valid);
    if !dropped.is_empty() {
        tracing::info!(%dropped, "dropping clashing weeks");
        println!("Dropped clashing weeks: {dropped}");
    }
    Ok(valid)
}

fn print_courses(
    schedule: &Schedule,
    courses: &[WithShortId<Course>],
    output_format: OutputFormat,
    verbose: bool,
) {
    let mut columns = vec![
        CourseColumn::Id,
        CourseColumn::Weekday,
        CourseColumn::Lessons,
        CourseColumn::TimeSpan(schedule.lessons.clone()),
        CourseColumn::Name,
        CourseColumn::Weeks {
            total_weeks: schedule.total_weeks,
        },
        CourseColumn::Classroom,
        CourseColumn::Teacher,
    ];
    if verbose {
        columns.push(CourseColumn::Color);
        columns.push(CourseColumn::Note);
        columns.push(CourseColumn::Uid);
    }

    let formatter = CourseFormatter::new(columns, output_format);
    print!("{}", formatter.format(courses));
}
