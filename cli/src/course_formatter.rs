// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use classtable_core::{Course, LessonsPerDay, WithShortId};
use colored::Color;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, format_time};

#[derive(Debug)]
pub struct CourseFormatter {
    columns: Vec<CourseColumn>,
    format: OutputFormat,
}

impl CourseFormatter {
    pub fn new(columns: Vec<CourseColumn>, format: OutputFormat) -> Self {
        Self { columns, format }
    }

    pub fn format<'a>(&'a self, courses: &'a [WithShortId<Course>]) -> impl fmt::Display + 'a {
        Table::new(self.format, &self.columns, courses)
    }
}

#[derive(Debug, Clone)]
pub enum CourseColumn {
    Id,
    Uid,
    Name,
    Weekday,
    Lessons,
    /// Wall clock span of the lessons, resolved against the schedule's lesson times.
    TimeSpan(LessonsPerDay),
    Weeks { total_weeks: u16 },
    Classroom,
    Teacher,
    Color,
    Note,
}

impl TableColumn<WithShortId<Course>> for CourseColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "id",
            Self::Uid => "uid",
            Self::Name => "name",
            Self::Weekday => "weekday",
            Self::Lessons => "lessons",
            Self::TimeSpan(_) => "time",
            Self::Weeks { .. } => "weeks",
            Self::Classroom => "classroom",
            Self::Teacher => "teacher",
            Self::Color => "color",
            Self::Note => "note",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a WithShortId<Course>) -> Cow<'a, str> {
        match self {
            Self::Id => data.short_id.to_string().into(),
            Self::Uid => data.uid.as_str().into(),
            Self::Name => data.name.as_str().into(),
            Self::Weekday => data.weekday.short_name().into(),
            Self::Lessons => data.range.to_string().into(),
            Self::TimeSpan(lessons) => match lessons.span(&data.range) {
                Some(span) => format!("{}~{}", format_time(span.start), format_time(span.end)).into(),
                None => "".into(),
            },
            Self::Weeks { total_weeks } => match data.weeks.pattern(*total_weeks) {
                Some(pattern) => pattern.to_string().into(),
                None => data.weeks.to_string().into(),
            },
            Self::Classroom => data.classroom.as_str().into(),
            Self::Teacher => data.teacher.as_str().into(),
            Self::Color => data.color.to_string().into(),
            Self::Note => data.note.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id | Self::Lessons => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &WithShortId<Course>) -> Option<Color> {
        match self {
            Self::Name | Self::Color => Some(Color::TrueColor {
                r: data.color.r,
                g: data.color.g,
                b: data.color.b,
            }),
            _ => None,
        }
    }
}
