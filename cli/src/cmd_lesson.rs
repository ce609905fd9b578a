// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, error::Error};

use classtable_core::{
    ClassTable, DEFAULT_PERIODS, Id, Lesson, LessonTimePeriodInfo, LessonsPerDay, Period,
    SchedulePatch,
};
use clap::{ArgMatches, Command, arg, value_parser};
use clap_num::number_range;
use jiff::civil::Time;

use crate::arg::CommonArgs;
use crate::cmd_schedule::resolve_schedule;
use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, format_time, parse_time};

#[derive(Debug, Clone)]
pub struct CmdLessonShow {
    pub schedule: Option<Id>,
    pub output_format: OutputFormat,
}

impl CmdLessonShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("Show the lesson times of a schedule")
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(schedule = ?self.schedule, "showing lesson times...");
        let schedule = resolve_schedule(app, self.schedule.as_ref()).await?;
        print_lessons(&schedule.lessons, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdLessonSet {
    pub schedule: Option<Id>,
    pub period: Period,
    pub start: Option<Time>,
    pub lesson_minutes: Option<u16>,
    pub break_minutes: Option<u16>,
    pub count: Option<u8>,
    pub output_format: OutputFormat,
}

impl CmdLessonSet {
    pub const NAME: &str = "set";

    pub fn command() -> Command {
        fn from_1_to_240(s: &str) -> Result<u16, String> {
            number_range(s, 1, 240)
        }

        fn from_0_to_120(s: &str) -> Result<u16, String> {
            number_range(s, 0, 120)
        }

        fn from_0_to_16(s: &str) -> Result<u8, String> {
            number_range(s, 0, 16)
        }

        Command::new(Self::NAME)
            .about("Regenerate the lesson times of one period of the day")
            .arg(
                arg!(-p --period <PERIOD> "The period to regenerate")
                    .value_parser(value_parser!(Period))
                    .required(true),
            )
            .arg(
                arg!(--start <TIME> "Start of the first lesson, as HH:MM")
                    .value_parser(parse_time),
            )
            .arg(
                arg!(--minutes <MINUTES> "Length of a lesson in minutes")
                    .value_parser(from_1_to_240),
            )
            .arg(
                arg!(--"break" <MINUTES> "Break between two lessons in minutes")
                    .value_parser(from_0_to_120),
            )
            .arg(
                arg!(--count <COUNT> "Number of lessons in the period")
                    .value_parser(from_0_to_16),
            )
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let period = match matches.get_one::<Period>("period") {
            Some(period) => *period,
            None => unreachable!("period is required"),
        };

        let cmd = Self {
            schedule: CommonArgs::get_schedule(matches),
            period,
            start: matches.get_one("start").copied(),
            lesson_minutes: matches.get_one("minutes").copied(),
            break_minutes: matches.get_one("break").copied(),
            count: matches.get_one("count").copied(),
            output_format: CommonArgs::get_output_format(matches),
        };
        if cmd.start.is_none()
            && cmd.lesson_minutes.is_none()
            && cmd.break_minutes.is_none()
            && cmd.count.is_none()
        {
            return Err(
                "Nothing to change, pass at least one of --start, --minutes, --break or --count"
                    .into(),
            );
        }
        Ok(cmd)
    }

    /// The generator of the period with the given overrides applied.
    pub fn apply(&self, current: LessonTimePeriodInfo) -> LessonTimePeriodInfo {
        LessonTimePeriodInfo {
            start: self.start.unwrap_or(current.start),
            lesson_minutes: self.lesson_minutes.unwrap_or(current.lesson_minutes),
            break_minutes: self.break_minutes.unwrap_or(current.break_minutes),
            count: self.count.unwrap_or(current.count),
        }
    }

    pub async fn run(self, app: &ClassTable) -> Result<(), Box<dyn Error>> {
        tracing::debug!(period = %self.period, "setting lesson times...");
        let schedule = resolve_schedule(app, self.schedule.as_ref()).await?;

        let mut lessons = schedule.lessons.clone();
        let period = period_lessons(&mut lessons, self.period);
        let info = self.apply(infer_period(period, default_period(self.period)));
        *period = info.generate()?;

        let patch = SchedulePatch {
            lessons: Some(lessons),
            ..Default::default()
        };
        let schedule = app
            .update_schedule(&Id::Uid(schedule.uid.clone()), patch)
            .await?;
        print_lessons(&schedule.lessons, self.output_format);
        Ok(())
    }
}

fn period_lessons(lessons: &mut LessonsPerDay, period: Period) -> &mut Vec<Lesson> {
    match period {
        Period::Morning => &mut lessons.morning,
        Period::Afternoon => &mut lessons.afternoon,
        Period::Evening => &mut lessons.evening,
    }
}

fn default_period(period: Period) -> LessonTimePeriodInfo {
    let (morning, afternoon, evening) = DEFAULT_PERIODS;
    match period {
        Period::Morning => morning,
        Period::Afternoon => afternoon,
        Period::Evening => evening,
    }
}

/// Recovers the generator of a period from its first two lessons.
fn infer_period(lessons: &[Lesson], fallback: LessonTimePeriodInfo) -> LessonTimePeriodInfo {
    let Some(first) = lessons.first() else {
        return LessonTimePeriodInfo { count: 0, ..fallback };
    };

    let minutes = |from: Time, to: Time| u16::try_from(from.duration_until(to).as_mins()).ok();
    let lesson_minutes = minutes(first.start, first.end).unwrap_or(fallback.lesson_minutes);
    let break_minutes = match lessons.get(1) {
        Some(second) => minutes(first.end, second.start).unwrap_or(fallback.break_minutes),
        None => fallback.break_minutes,
    };

    LessonTimePeriodInfo {
        start: first.start,
        lesson_minutes,
        break_minutes,
        count: u8::try_from(lessons.len()).unwrap_or(u8::MAX),
    }
}

#[derive(Debug, Clone, Copy)]
struct LessonRow {
    index: u8,
    period: Period,
    lesson: Lesson,
}

#[derive(Debug, Clone, Copy)]
enum LessonColumn {
    Index,
    Period,
    Start,
    End,
}

impl TableColumn<LessonRow> for LessonColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Index => "lesson",
            Self::Period => "period",
            Self::Start => "start",
            Self::End => "end",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a LessonRow) -> Cow<'a, str> {
        match self {
            Self::Index => data.index.to_string().into(),
            Self::Period => data.period.to_string().into(),
            Self::Start => format_time(data.lesson.start).into(),
            Self::End => format_time(data.lesson.end).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Index => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

fn print_lessons(lessons: &LessonsPerDay, output_format: OutputFormat) {
    let rows: Vec<LessonRow> = lessons
        .lessons()
        .map(|(index, period, lesson)| LessonRow {
            index,
            period,
            lesson: *lesson,
        })
        .collect();
    let columns = [
        LessonColumn::Index,
        LessonColumn::Period,
        LessonColumn::Start,
        LessonColumn::End,
    ];
    print!("{}", Table::new(output_format, &columns, &rows));
}
