// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use classtable_core::{Schedule, TermWeek, WithShortId};
use colored::Color;
use jiff::civil::Date;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct ScheduleFormatter {
    columns: Vec<ScheduleColumn>,
    format: OutputFormat,
}

impl ScheduleFormatter {
    pub fn new(columns: Vec<ScheduleColumn>, format: OutputFormat) -> Self {
        Self { columns, format }
    }

    pub fn format<'a>(&'a self, schedules: &'a [WithShortId<Schedule>]) -> impl fmt::Display + 'a {
        Table::new(self.format, &self.columns, schedules)
    }
}

#[derive(Debug, Clone)]
pub enum ScheduleColumn {
    Id,
    Uid,
    /// `*` in front of the selected schedule.
    Selected(Option<String>),
    Name,
    TermStart,
    TotalWeeks,
    CurrentWeek { today: Date },
    Lessons,
    Status,
}

impl TableColumn<WithShortId<Schedule>> for ScheduleColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "id",
            Self::Uid => "uid",
            Self::Selected(_) => "selected",
            Self::Name => "name",
            Self::TermStart => "term_start",
            Self::TotalWeeks => "total_weeks",
            Self::CurrentWeek { .. } => "current_week",
            Self::Lessons => "lessons",
            Self::Status => "status",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a WithShortId<Schedule>) -> Cow<'a, str> {
        match self {
            Self::Id => data.short_id.to_string().into(),
            Self::Uid => data.uid.as_str().into(),
            Self::Selected(selected) => match selected.as_deref() == Some(data.uid.as_str()) {
                true => "*".into(),
                false => "".into(),
            },
            Self::Name => data.name.as_str().into(),
            Self::TermStart => data.term_start.to_string().into(),
            Self::TotalWeeks => format!("{} weeks", data.total_weeks).into(),
            Self::CurrentWeek { today } => format_term_week(data.week_of(*today)).into(),
            Self::Lessons => format!("{} lessons", data.lessons.lesson_count()).into(),
            Self::Status => match data.deleted {
                true => "deleted".into(),
                false => "".into(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id | Self::TotalWeeks | Self::Lessons => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &WithShortId<Schedule>) -> Option<Color> {
        match self {
            Self::Selected(_) => Some(Color::Green),
            Self::Status | Self::Name if data.deleted => Some(Color::BrightBlack),
            _ => None,
        }
    }
}

pub fn format_term_week(week: TermWeek) -> String {
    match week {
        TermWeek::NotStarted => "not started".to_string(),
        TermWeek::Week(w) => format!("week {w}"),
        TermWeek::Ended => "ended".to_string(),
    }
}
