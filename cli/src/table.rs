// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::util::OutputFormat;

pub trait TableColumn<T> {
    /// Key of the column in JSON output.
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    format: OutputFormat,
    separator: &'a str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(format: OutputFormat, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            format,
            separator: " ",
        }
    }

    fn fmt_basic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|item| self.columns.iter().map(|col| col.format(item)).collect())
            .collect();

        let widths = column_widths(self.columns.len(), &rows);
        let last = self.columns.len().saturating_sub(1);
        for (item, row) in self.data.iter().zip(&rows) {
            for (i, (col, cell)) in self.columns.iter().zip(row).enumerate() {
                let fill = widths[i].saturating_sub(cell.width());
                let cell = match col.padding_direction() {
                    // the last column is not padded on the right
                    PaddingDirection::Left if i == last => cell.to_string(),
                    PaddingDirection::Left => format!("{cell}{}", " ".repeat(fill)),
                    PaddingDirection::Right => format!("{}{cell}", " ".repeat(fill)),
                };
                match col.get_color(item) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                if i < last {
                    write!(f, "{}", self.separator)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn fmt_json(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<serde_json::Value> = self
            .data
            .iter()
            .map(|item| {
                let map = self
                    .columns
                    .iter()
                    .map(|col| {
                        let value = serde_json::Value::String(col.format(item).into_owned());
                        (col.name().into_owned(), value)
                    })
                    .collect();
                serde_json::Value::Object(map)
            })
            .collect();

        let json = serde_json::to_string_pretty(&items).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}

impl<T, C: TableColumn<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            OutputFormat::Table => self.fmt_basic(f),
            OutputFormat::Json => self.fmt_json(f),
        }
    }
}

fn column_widths(n: usize, rows: &[Vec<Cow<'_, str>>]) -> Vec<usize> {
    let mut widths = vec![0; n];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    widths
}
