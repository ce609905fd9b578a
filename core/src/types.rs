// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Identifier given on the command line, either a short id or a uid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Id {
    /// A uid.
    Uid(String),

    /// A short id, or a uid when no short id matches.
    ShortIdOrUid(String),
}

impl Id {
    /// The raw string, interpreted as a uid.
    pub fn as_uid(&self) -> &str {
        match self {
            Id::Uid(uid) => uid,
            Id::ShortIdOrUid(s) => s,
        }
    }

    /// The short id, if the string is a positive number.
    pub fn maybe_short_id(&self) -> Option<std::num::NonZeroU32> {
        match self {
            Id::Uid(_) => None,
            Id::ShortIdOrUid(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_uid())
    }
}

/// Kind of an item addressed by an [`Id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Schedule,
    Course,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Schedule => write!(f, "schedule"),
            Kind::Course => write!(f, "course"),
        }
    }
}

/// Day of the week, numbered from Monday = 1 to Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    #[cfg_attr(feature = "clap", clap(alias = "mon", alias = "1"))]
    Monday,
    #[cfg_attr(feature = "clap", clap(alias = "tue", alias = "2"))]
    Tuesday,
    #[cfg_attr(feature = "clap", clap(alias = "wed", alias = "3"))]
    Wednesday,
    #[cfg_attr(feature = "clap", clap(alias = "thu", alias = "4"))]
    Thursday,
    #[cfg_attr(feature = "clap", clap(alias = "fri", alias = "5"))]
    Friday,
    #[cfg_attr(feature = "clap", clap(alias = "sat", alias = "6"))]
    Saturday,
    #[cfg_attr(feature = "clap", clap(alias = "sun", alias = "7"))]
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 1 for Monday, 7 for Sunday.
    pub fn number(self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
            Weekday::Sunday => 7,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Three-letter abbreviation.
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(value: jiff::civil::Weekday) -> Self {
        use jiff::civil::Weekday as W;
        match value {
            W::Monday => Weekday::Monday,
            W::Tuesday => Weekday::Tuesday,
            W::Wednesday => Weekday::Wednesday,
            W::Thursday => Weekday::Thursday,
            W::Friday => Weekday::Friday,
            W::Saturday => Weekday::Saturday,
            W::Sunday => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

/// An RGB colour, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Colours handed out to new courses.
pub const PALETTE: [Color; 10] = [
    Color::rgb(0xE5, 0x73, 0x73),
    Color::rgb(0xF0, 0x62, 0x92),
    Color::rgb(0xBA, 0x68, 0xC8),
    Color::rgb(0x79, 0x86, 0xCB),
    Color::rgb(0x4F, 0xC3, 0xF7),
    Color::rgb(0x4D, 0xB6, 0xAC),
    Color::rgb(0x81, 0xC7, 0x84),
    Color::rgb(0xDC, 0xE7, 0x75),
    Color::rgb(0xFF, 0xB7, 0x4D),
    Color::rgb(0xA1, 0x88, 0x7F),
];

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A palette colour picked from the name, so the same name keeps its colour.
    pub fn for_name(name: &str) -> Self {
        let hash = name
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
        PALETTE[(hash as usize) % PALETTE.len()]
    }
}

impl Default for Color {
    fn default() -> Self {
        PALETTE[3]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::Parse(format!("Invalid colour '{s}', expected #RRGGBB"));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
