// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use classtable_core::{Color, Id, Kind, MAX_WEEKS, Range, WeekList, Weekday};
use clap::{Arg, ArgMatches, arg, value_parser};
use clap_num::number_range;

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    /// The schedule to work on, the selected one by default.
    pub fn schedule() -> Arg {
        arg!(-s --schedule <SCHEDULE> "The short id or uid of the schedule, defaults to the selected one")
    }

    pub fn get_schedule(matches: &ArgMatches) -> Option<Id> {
        matches
            .get_one::<String>("schedule")
            .map(|a| Id::ShortIdOrUid(a.clone()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IdArgs {
    kind: Kind,
}

impl IdArgs {
    pub const fn new(kind: Kind) -> Self {
        Self { kind }
    }

    pub fn id(self, action: &str) -> Arg {
        let help = format!("The short id or uid of the {} to {action}", self.kind);
        arg!(id: <ID>).help(help)
    }

    pub fn get_id(matches: &ArgMatches) -> Id {
        match matches.get_one::<String>("id") {
            Some(id) => Id::ShortIdOrUid(id.clone()),
            None => unreachable!("id is required"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleArgs;

impl ScheduleArgs {
    pub fn name(positional: bool) -> Arg {
        if positional {
            arg!(name: <NAME> "Name of the schedule")
        } else {
            arg!(name: -n --name <NAME> "Name of the schedule")
        }
    }

    pub fn get_name(matches: &ArgMatches) -> Option<String> {
        matches.get_one("name").cloned()
    }

    pub fn term_start() -> Arg {
        arg!(--"term-start" <DATE> "First day of the term (YYYY-MM-DD or 'today')")
    }

    pub fn get_term_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("term-start").cloned()
    }

    pub fn total_weeks() -> Arg {
        fn from_1_to_max(s: &str) -> Result<u16, String> {
            number_range(s, 1, MAX_WEEKS)
        }

        arg!(--weeks <WEEKS> "Number of weeks in the term").value_parser(from_1_to_max)
    }

    pub fn get_total_weeks(matches: &ArgMatches) -> Option<u16> {
        matches.get_one("weeks").copied()
    }

    pub fn display_weekends() -> Arg {
        arg!(--weekends <BOOL> "Show Saturday and Sunday in the table")
            .value_parser(value_parser!(bool))
    }

    pub fn get_display_weekends(matches: &ArgMatches) -> Option<bool> {
        matches.get_one("weekends").copied()
    }

    pub fn show_inactive() -> Arg {
        arg!(--"show-inactive" <BOOL> "Show courses that do not take place in the displayed week")
            .value_parser(value_parser!(bool))
    }

    pub fn get_show_inactive(matches: &ArgMatches) -> Option<bool> {
        matches.get_one("show-inactive").copied()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CourseArgs;

impl CourseArgs {
    pub fn name(positional: bool) -> Arg {
        if positional {
            arg!(name: <NAME> "Name of the course")
        } else {
            arg!(name: -n --name <NAME> "Name of the course")
        }
    }

    pub fn get_name(matches: &ArgMatches) -> Option<String> {
        matches.get_one("name").cloned()
    }

    pub fn weekday() -> Arg {
        arg!(-d --day <WEEKDAY> "Day of the week").value_parser(value_parser!(Weekday))
    }

    pub fn get_weekday(matches: &ArgMatches) -> Option<Weekday> {
        matches.get_one("day").copied()
    }

    pub fn range() -> Arg {
        arg!(-l --lessons <LESSONS> "Lesson slots, such as '3' or '1-2'")
            .value_parser(|s: &str| s.parse::<Range>().map_err(|e| e.to_string()))
    }

    pub fn get_range(matches: &ArgMatches) -> Option<Range> {
        matches.get_one("lessons").copied()
    }

    pub fn weeks() -> Arg {
        arg!(-w --weeks <WEEKS> "Weeks of the course, such as '1-16', '1-15 odd' or '2-8 even, 10'")
            .value_parser(|s: &str| s.parse::<WeekList>().map_err(|e| e.to_string()))
    }

    pub fn get_weeks(matches: &ArgMatches) -> Option<WeekList> {
        matches.get_one("weeks").cloned()
    }

    pub fn classroom() -> Arg {
        arg!(--classroom <CLASSROOM> "Where the course takes place")
    }

    pub fn get_classroom(matches: &ArgMatches) -> Option<String> {
        matches.get_one("classroom").cloned()
    }

    pub fn teacher() -> Arg {
        arg!(--teacher <TEACHER> "Who teaches the course")
    }

    pub fn get_teacher(matches: &ArgMatches) -> Option<String> {
        matches.get_one("teacher").cloned()
    }

    pub fn color() -> Arg {
        arg!(--color <COLOR> "Colour of the course as #RRGGBB")
            .value_parser(|s: &str| s.parse::<Color>().map_err(|e| e.to_string()))
    }

    pub fn get_color(matches: &ArgMatches) -> Option<Color> {
        matches.get_one("color").copied()
    }

    pub fn note() -> Arg {
        arg!(--note <NOTE> "Free-form note")
    }

    pub fn get_note(matches: &ArgMatches) -> Option<String> {
        matches.get_one("note").cloned()
    }
}
