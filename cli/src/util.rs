// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, Time};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Parses a `YYYY-MM-DD` date, or one of `today`, `yesterday` and `tomorrow`.
pub fn parse_date(today: Date, s: &str) -> Result<Date, String> {
    match s.trim() {
        "today" => Ok(today),
        "yesterday" => today
            .yesterday()
            .map_err(|e| format!("Failed to resolve yesterday: {e}")),
        "tomorrow" => today
            .tomorrow()
            .map_err(|e| format!("Failed to resolve tomorrow: {e}")),
        s => s
            .parse()
            .map_err(|e| format!("Invalid date '{s}', expected YYYY-MM-DD: {e}")),
    }
}

/// Parses a `HH:MM` wall clock time.
pub fn parse_time(s: &str) -> Result<Time, String> {
    let s = s.trim();
    let (hour, minute) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid time '{s}', expected HH:MM"))?;
    let parse = |v: &str| {
        v.parse::<i8>()
            .map_err(|e| format!("Invalid time '{s}', expected HH:MM: {e}"))
    };
    Time::new(parse(hour)?, parse(minute)?, 0, 0)
        .map_err(|e| format!("Invalid time '{s}': {e}"))
}

pub fn format_time(time: Time) -> String {
    time.strftime("%H:%M").to_string()
}

/// Cuts `s` down to at most `width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    } else if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w + 1 > width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

/// Pads `s` with spaces on the right to exactly `width` columns, truncating if needed.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let s = truncate_to_width(s, width);
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Centers `s` in `width` columns.
pub fn center_to_width(s: &str, width: usize) -> String {
    let s = truncate_to_width(s, width);
    let fill = width.saturating_sub(s.width());
    let left = fill / 2;
    format!("{}{s}{}", " ".repeat(left), " ".repeat(fill - left))
}
