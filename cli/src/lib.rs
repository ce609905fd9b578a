// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of classtable.

mod arg;
mod cli;
mod cmd_about;
mod cmd_course;
mod cmd_generate_completion;
mod cmd_lesson;
mod cmd_schedule;
mod cmd_settings;
mod cmd_table;
mod cmd_today;
mod config;
mod course_formatter;
mod schedule_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::Config;
