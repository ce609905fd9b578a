// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use classtable_core::{ClassTable, Id, Schedule, TermWeek, Weekday};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use jiff::civil::Date;

use crate::arg::CommonArgs;
use crate::cmd_schedule::resolve_schedule;
use crate::config::Config;
use crate::course_formatter::{CourseColumn, CourseFormatter};
use crate::schedule_formatter::format_term_week;
use crate::util::{OutputFormat, parse_date};

#[derive(Debug, Clone)]
pub struct CmdToday {
    pub date: Option<String>,
    pub schedule: Option<Id>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl Default for CmdToday {
    fn default() -> Self {
        Self {
            date: None,
            schedule: None,
            output_format: OutputFormat::Table,
            verbose: false,
        }
    }
}

impl CmdToday {
    pub const NAME: &str = "today";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the courses of today, or of another date")
            .arg(arg!(--date <DATE> "The date to show (YYYY-MM-DD, 'yesterday' or 'tomorrow')"))
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one("date").cloned(),
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &mut ClassTable, _config: Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(date = ?self.date, "showing courses of the day...");
        let date = match &self.date {
            Some(date) => parse_date(app.today(), date)?,
            None => app.today(),
        };

        let schedule = resolve_schedule(app, self.schedule.as_ref()).await?;
        let (week, courses) = app
            .courses_on(&Id::Uid(schedule.uid.clone()), date)
            .await?;

        if self.output_format == OutputFormat::Table {
            println!("{}", header(&schedule, date, week).bold());
            if courses.is_empty() {
                println!("{}", "No classes".italic());
                return Ok(());
            }
        }

        let mut columns = vec![
            CourseColumn::Id,
            CourseColumn::Lessons,
            CourseColumn::TimeSpan(schedule.lessons.clone()),
            CourseColumn::Name,
            CourseColumn::Classroom,
        ];
        if self.verbose {
            columns.push(CourseColumn::Teacher);
            columns.push(CourseColumn::Note);
        }
        let formatter = CourseFormatter::new(columns, self.output_format);
        print!("{}", formatter.format(&courses));
        Ok(())
    }
}

/// `Fall 2025 · 2025-09-02 Tuesday · week 1`
fn header(schedule: &Schedule, date: Date, week: TermWeek) -> String {
    let weekday = Weekday::from(date.weekday());
    format!("{} · {date} {weekday} · {}", schedule.name, format_term_week(week))
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtable_core::LessonsPerDay;
    use jiff::civil::date;

    #[test]
    fn test_parse_today() {
        let cmd = Command::new("test").subcommand(CmdToday::command());
        let matches = cmd
            .try_get_matches_from(["test", "today", "--date", "tomorrow", "-v"])
            .unwrap();
        let parsed = CmdToday::from(matches.subcommand_matches("today").unwrap());
        assert_eq!(parsed.date.as_deref(), Some("tomorrow"));
        assert_eq!(parsed.schedule, None);
        assert!(parsed.verbose);
    }

    #[test]
    fn test_header() {
        let schedule = Schedule {
            uid: "s1".to_string(),
            name: "Fall 2025".to_string(),
            term_start: date(2025, 9, 1),
            total_weeks: 16,
            display_weekends: false,
            show_inactive: true,
            lessons: LessonsPerDay::default(),
            deleted: false,
        };

        let day = date(2025, 9, 2);
        assert_eq!(
            header(&schedule, day, schedule.week_of(day)),
            "Fall 2025 · 2025-09-02 Tuesday · week 1"
        );

        let day = date(2025, 8, 30);
        assert_eq!(
            header(&schedule, day, schedule.week_of(day)),
            "Fall 2025 · 2025-08-30 Saturday · not started"
        );
    }
}
