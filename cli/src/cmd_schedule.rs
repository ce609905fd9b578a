// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use classtable_core::{APP_NAME, ClassTable, Id, Kind, Schedule, SchedulePatch, WithShortId};
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;

use crate::arg::{CommonArgs, IdArgs, ScheduleArgs};
use crate::schedule_formatter::{ScheduleColumn, ScheduleFormatter};
use crate::util::{OutputFormat, parse_date};

const SCHEDULE_ID: IdArgs = IdArgs::new(Kind::Schedule);

/// The schedule given on the command line, or the selected one.
pub async fn resolve_schedule(
    app: &ClassTable,
    id: Option<&Id>,
) -> Result<WithShortId<Schedule>, Box<dyn Error>> {
    if let Some(id) = id {
        return app.get_schedule(id).await;
    }

    match app.selected_schedule().await? {
        Some(schedule) => Ok(schedule),
        None => Err(format!(
            "No schedule selected, create one with `{APP_NAME} schedule new <NAME>`"
        )
        .into()),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdScheduleList {
    pub all: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdScheduleList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List schedules")
            .arg(arg!(-a --all "Include deleted schedules"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            all: matches.get_flag("all"),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(all = self.all, "listing schedules...");
        let schedules = app.list_schedules(self.all).await?;
        if schedules.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No schedules found".italic());
            return Ok(());
        }

        let selected = app.settings().await?.selected_schedule;
        print_schedules(app, selected, &schedules, self.output_format, self.verbose || self.all);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleNew {
    pub name: String,
    pub term_start: Option<String>,
    pub total_weeks: Option<u16>,
    pub display_weekends: Option<bool>,
    pub show_inactive: Option<bool>,
    pub output_format: OutputFormat,
}

impl CmdScheduleNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a new schedule")
            .arg(ScheduleArgs::name(true))
            .arg(ScheduleArgs::term_start())
            .arg(ScheduleArgs::total_weeks())
            .arg(ScheduleArgs::display_weekends())
            .arg(ScheduleArgs::show_inactive())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: ScheduleArgs::get_name(matches).unwrap_or_default(),
            term_start: ScheduleArgs::get_term_start(matches),
            total_weeks: ScheduleArgs::get_total_weeks(matches),
            display_weekends: ScheduleArgs::get_display_weekends(matches),
            show_inactive: ScheduleArgs::get_show_inactive(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(name = %self.name, "creating schedule...");
        let mut draft = app.default_schedule_draft(self.name);
        if let Some(term_start) = &self.term_start {
            draft.term_start = parse_date(app.today(), term_start)?;
        }
        if let Some(total_weeks) = self.total_weeks {
            draft.total_weeks = total_weeks;
        }
        if let Some(display_weekends) = self.display_weekends {
            draft.display_weekends = display_weekends;
        }
        if let Some(show_inactive) = self.show_inactive {
            draft.show_inactive = show_inactive;
        }

        let schedule = app.new_schedule(draft).await?;
        let selected = app.settings().await?.selected_schedule;
        print_schedules(app, selected, &[schedule], self.output_format, false);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleEdit {
    pub id: Id,
    pub patch: SchedulePatch,
    /// Resolved against today when running.
    pub term_start: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdScheduleEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a schedule")
            .arg(SCHEDULE_ID.id("edit"))
            .arg(ScheduleArgs::name(false))
            .arg(ScheduleArgs::term_start())
            .arg(ScheduleArgs::total_weeks())
            .arg(ScheduleArgs::display_weekends())
            .arg(ScheduleArgs::show_inactive())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let term_start = ScheduleArgs::get_term_start(matches);
        let patch = SchedulePatch {
            name: ScheduleArgs::get_name(matches),
            term_start: None,
            total_weeks: ScheduleArgs::get_total_weeks(matches),
            display_weekends: ScheduleArgs::get_display_weekends(matches),
            show_inactive: ScheduleArgs::get_show_inactive(matches),
            lessons: None,
        };
        if patch.is_empty() && term_start.is_none() {
            return Err("Nothing to change, pass at least one field to edit".into());
        }

        Ok(Self {
            id: IdArgs::get_id(matches),
            patch,
            term_start,
            output_format: CommonArgs::get_output_format(matches),
        })
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "editing schedule...");
        let mut patch = self.patch;
        if let Some(term_start) = &self.term_start {
            patch.term_start = Some(parse_date(app.today(), term_start)?);
        }

        let schedule = app.update_schedule(&self.id, patch).await?;
        let selected = app.settings().await?.selected_schedule;
        print_schedules(app, selected, &[schedule], self.output_format, false);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleDelete {
    pub id: Id,
}

impl CmdScheduleDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Move a schedule to the trash")
            .arg(SCHEDULE_ID.id("delete"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "deleting schedule...");
        let schedule = app.delete_schedule(&self.id).await?;
        println!(
            "Deleted schedule {}, restore it with `{APP_NAME} schedule restore {}`",
            schedule.name.bold(),
            schedule.short_id
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleRestore {
    pub id: Id,
}

impl CmdScheduleRestore {
    pub const NAME: &str = "restore";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Restore a deleted schedule")
            .arg(SCHEDULE_ID.id("restore"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "restoring schedule...");
        let schedule = app.restore_schedule(&self.id).await?;
        println!("Restored schedule {}", schedule.name.bold());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdSchedulePurge {
    pub id: Id,
}

impl CmdSchedulePurge {
    pub const NAME: &str = "purge";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Permanently remove a deleted schedule and its courses")
            .arg(SCHEDULE_ID.id("purge"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "purging schedule...");
        let schedule = app.purge_schedule(&self.id).await?;
        println!("Purged schedule {}", schedule.name.bold());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleSelect {
    pub id: Id,
}

impl CmdScheduleSelect {
    pub const NAME: &str = "select";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("use")
            .about("Select the schedule shown by default")
            .arg(SCHEDULE_ID.id("select"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, "selecting schedule...");
        let schedule = app.select_schedule(&self.id).await?;
        println!("Selected schedule {}", schedule.name.bold());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleExport {
    pub id: Id,
    pub path: PathBuf,
}

impl CmdScheduleExport {
    pub const NAME: &str = "export";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Export a schedule and its courses to a file")
            .arg(SCHEDULE_ID.id("export"))
            .arg(
                arg!(path: <PATH> "Path of the bundle file to write")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
            path: get_path(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, path = %self.path.display(), "exporting schedule...");
        app.export_schedule(&self.id, &self.path).await?;
        println!("Exported schedule to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdScheduleImport {
    pub path: PathBuf,
    pub output_format: OutputFormat,
}

impl CmdScheduleImport {
    pub const NAME: &str = "import";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Import a schedule from a bundle file as a new schedule")
            .arg(
                arg!(path: <PATH> "Path of the bundle file to read")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            path: get_path(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(path = %self.path.display(), "importing schedule...");
        let schedule = app.import_schedule(&self.path).await?;
        let selected = app.settings().await?.selected_schedule;
        print_schedules(app, selected, &[schedule], self.output_format, false);
        Ok(())
    }
}

fn get_path(matches: &ArgMatches) -> PathBuf {
    match matches.get_one::<PathBuf>("path") {
        Some(path) => path.clone(),
        None => unreachable!("path is required"),
    }
}

fn print_schedules(
    app: &ClassTable,
    selected: Option<String>,
    schedules: &[WithShortId<Schedule>],
    output_format: OutputFormat,
    verbose: bool,
) {
    let mut columns = vec![
        ScheduleColumn::Selected(selected),
        ScheduleColumn::Id,
        ScheduleColumn::Name,
        ScheduleColumn::TermStart,
        ScheduleColumn::TotalWeeks,
        ScheduleColumn::CurrentWeek { today: app.today() },
    ];
    if verbose {
        columns.push(ScheduleColumn::Lessons);
        columns.push(ScheduleColumn::Status);
        columns.push(ScheduleColumn::Uid);
    }

    let formatter = ScheduleFormatter::new(columns, output_format);
    print!("{}", formatter.format(schedules));
}
