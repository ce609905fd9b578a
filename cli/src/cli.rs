// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use classtable_core::{APP_NAME, ClassTable};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_about::CmdAbout;
use crate::cmd_course::{CmdCourseDelete, CmdCourseEdit, CmdCourseList, CmdCourseNew};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_lesson::{CmdLessonSet, CmdLessonShow};
use crate::cmd_schedule::{
    CmdScheduleDelete, CmdScheduleEdit, CmdScheduleExport, CmdScheduleImport, CmdScheduleList,
    CmdScheduleNew, CmdSchedulePurge, CmdScheduleRestore, CmdScheduleSelect,
};
use crate::cmd_settings::{CmdSettingsSet, CmdSettingsShow};
use crate::cmd_table::CmdTable;
use crate::cmd_today::CmdToday;
use crate::config::{Config, parse_config};

/// Run the classtable command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Keep your weekly class schedule in the terminal.")
            .author("Classtable Developers")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to today
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/classtable/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/classtable/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdToday::command())
            .subcommand(CmdTable::command())
            .subcommand(
                Command::new("schedule")
                    .alias("s")
                    .about("Manage your schedules")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdScheduleList::command())
                    .subcommand(CmdScheduleNew::command())
                    .subcommand(CmdScheduleEdit::command())
                    .subcommand(CmdScheduleDelete::command())
                    .subcommand(CmdScheduleRestore::command())
                    .subcommand(CmdSchedulePurge::command())
                    .subcommand(CmdScheduleSelect::command())
                    .subcommand(CmdScheduleExport::command())
                    .subcommand(CmdScheduleImport::command()),
            )
            .subcommand(
                Command::new("course")
                    .alias("c")
                    .about("Manage the courses of a schedule")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdCourseList::command())
                    .subcommand(CmdCourseNew::command())
                    .subcommand(CmdCourseEdit::command())
                    .subcommand(CmdCourseDelete::command()),
            )
            .subcommand(
                Command::new("lesson")
                    .about("Manage the lesson times of a schedule")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdLessonShow::command())
                    .subcommand(CmdLessonSet::command()),
            )
            .subcommand(
                Command::new("settings")
                    .about("Manage application preferences")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdSettingsShow::command())
                    .subcommand(CmdSettingsSet::command()),
            )
            .subcommand(CmdAbout::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdToday::NAME, matches)) => Today(CmdToday::from(matches)),
            Some((CmdTable::NAME, matches)) => Table(CmdTable::from(matches)),
            Some(("schedule", matches)) => match matches.subcommand() {
                Some((CmdScheduleList::NAME, matches)) => {
                    ScheduleList(CmdScheduleList::from(matches))
                }
                Some((CmdScheduleNew::NAME, matches)) => ScheduleNew(CmdScheduleNew::from(matches)),
                Some((CmdScheduleEdit::NAME, matches)) => {
                    ScheduleEdit(CmdScheduleEdit::from(matches)?)
                }
                Some((CmdScheduleDelete::NAME, matches)) => {
                    ScheduleDelete(CmdScheduleDelete::from(matches))
                }
                Some((CmdScheduleRestore::NAME, matches)) => {
                    ScheduleRestore(CmdScheduleRestore::from(matches))
                }
                Some((CmdSchedulePurge::NAME, matches)) => {
                    SchedulePurge(CmdSchedulePurge::from(matches))
                }
                Some((CmdScheduleSelect::NAME, matches)) => {
                    ScheduleSelect(CmdScheduleSelect::from(matches))
                }
                Some((CmdScheduleExport::NAME, matches)) => {
                    ScheduleExport(CmdScheduleExport::from(matches))
                }
                Some((CmdScheduleImport::NAME, matches)) => {
                    ScheduleImport(CmdScheduleImport::from(matches))
                }
                _ => unreachable!(),
            },
            Some(("course", matches)) => match matches.subcommand() {
                Some((CmdCourseList::NAME, matches)) => CourseList(CmdCourseList::from(matches)),
                Some((CmdCourseNew::NAME, matches)) => CourseNew(CmdCourseNew::from(matches)),
                Some((CmdCourseEdit::NAME, matches)) => CourseEdit(CmdCourseEdit::from(matches)?),
                Some((CmdCourseDelete::NAME, matches)) => {
                    CourseDelete(CmdCourseDelete::from(matches))
                }
                _ => unreachable!(),
            },
            Some(("lesson", matches)) => match matches.subcommand() {
                Some((CmdLessonShow::NAME, matches)) => LessonShow(CmdLessonShow::from(matches)),
                Some((CmdLessonSet::NAME, matches)) => LessonSet(CmdLessonSet::from(matches)?),
                _ => unreachable!(),
            },
            Some(("settings", matches)) => match matches.subcommand() {
                Some((CmdSettingsShow::NAME, matches)) => {
                    SettingsShow(CmdSettingsShow::from(matches))
                }
                Some((CmdSettingsSet::NAME, matches)) => {
                    SettingsSet(CmdSettingsSet::from(matches)?)
                }
                _ => unreachable!(),
            },
            Some((CmdAbout::NAME, matches)) => About(CmdAbout::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Today(CmdToday::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the courses of today
    Today(CmdToday),

    /// Show the week table
    Table(CmdTable),

    /// List schedules
    ScheduleList(CmdScheduleList),

    /// Add a new schedule
    ScheduleNew(CmdScheduleNew),

    /// Edit a schedule
    ScheduleEdit(CmdScheduleEdit),

    /// Move a schedule to the trash
    ScheduleDelete(CmdScheduleDelete),

    /// Bring a schedule back from the trash
    ScheduleRestore(CmdScheduleRestore),

    /// Remove a trashed schedule for good
    SchedulePurge(CmdSchedulePurge),

    /// Select the schedule shown by default
    ScheduleSelect(CmdScheduleSelect),

    /// Export a schedule to a bundle file
    ScheduleExport(CmdScheduleExport),

    /// Import a schedule from a bundle file
    ScheduleImport(CmdScheduleImport),

    /// List courses
    CourseList(CmdCourseList),

    /// Add a new course
    CourseNew(CmdCourseNew),

    /// Edit a course
    CourseEdit(CmdCourseEdit),

    /// Delete a course
    CourseDelete(CmdCourseDelete),

    /// Show the lesson times
    LessonShow(CmdLessonShow),

    /// Regenerate the lesson times
    LessonSet(CmdLessonSet),

    /// Show the settings
    SettingsShow(CmdSettingsShow),

    /// Change the settings
    SettingsSet(CmdSettingsSet),

    /// Show version and license information
    About(CmdAbout),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Today(a)           => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            Table(a)           => Self::run_with(config, |x, c| a.run(x, c).boxed()).await,
            ScheduleList(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ScheduleNew(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ScheduleEdit(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ScheduleDelete(a)  => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ScheduleRestore(a) => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            SchedulePurge(a)   => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ScheduleSelect(a)  => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ScheduleExport(a)  => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            ScheduleImport(a)  => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            CourseList(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            CourseNew(a)       => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            CourseEdit(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            CourseDelete(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            LessonShow(a)      => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            LessonSet(a)       => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            SettingsShow(a)    => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            SettingsSet(a)     => Self::run_with(config, |x, _| a.run(x).boxed()).await,
            About(a)           => a.run(),
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut ClassTable, Config) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, config) = parse_config(config).await?;
        let mut app = ClassTable::new(core_config).await?;

        let result = f(&mut app, config).await;

        app.close().await?;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_generate_completion::Shell;
    use crate::util::OutputFormat;
    use classtable_core::{Id, ThemeMode, Weekday};
    use jiff::civil::time;

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from(vec!["test", "-c", "/tmp/config.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Today(_)));
    }

    #[test]
    fn test_parse_default_today() {
        let cli = Cli::try_parse_from(vec!["test"]).unwrap();
        match cli.command {
            Commands::Today(cmd) => assert_eq!(cmd.date, None),
            _ => panic!("Expected Today command"),
        }
    }

    #[test]
    fn test_parse_today_with_date() {
        let cli = Cli::try_parse_from(vec!["test", "today", "--date", "2025-09-02"]).unwrap();
        match cli.command {
            Commands::Today(cmd) => assert_eq!(cmd.date, Some("2025-09-02".to_string())),
            _ => panic!("Expected Today command"),
        }
    }

    #[test]
    fn test_parse_table() {
        let args = vec!["test", "table", "--week", "3", "--schedule", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Table(cmd) => {
                assert_eq!(cmd.week, Some(3));
                assert_eq!(cmd.schedule, Some(Id::ShortIdOrUid("2".to_string())));
            }
            _ => panic!("Expected Table command"),
        }
    }

    #[test]
    fn test_parse_schedule_list() {
        let args = vec!["test", "schedule", "list", "--all", "--output-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::ScheduleList(cmd) => {
                assert!(cmd.all);
                assert_eq!(cmd.output_format, OutputFormat::Json);
            }
            _ => panic!("Expected ScheduleList command"),
        }
    }

    #[test]
    fn test_parse_schedule_alias() {
        let cli = Cli::try_parse_from(vec!["test", "s", "select", "1"]).unwrap();
        match cli.command {
            Commands::ScheduleSelect(cmd) => {
                assert_eq!(cmd.id, Id::ShortIdOrUid("1".to_string()));
            }
            _ => panic!("Expected ScheduleSelect command"),
        }
    }

    #[test]
    fn test_parse_schedule_new() {
        let args = vec![
            "test", "schedule", "new", "Fall 2025", "--term-start", "2025-09-01", "--weeks", "18",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::ScheduleNew(cmd) => {
                assert_eq!(cmd.name, "Fall 2025");
                assert_eq!(cmd.term_start, Some("2025-09-01".to_string()));
                assert_eq!(cmd.total_weeks, Some(18));
            }
            _ => panic!("Expected ScheduleNew command"),
        }
    }

    #[test]
    fn test_parse_schedule_new_rejects_too_many_weeks() {
        let args = vec!["test", "schedule", "new", "Long", "--weeks", "31"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_schedule_trash() {
        let cli = Cli::try_parse_from(vec!["test", "schedule", "delete", "1"]).unwrap();
        assert!(matches!(cli.command, Commands::ScheduleDelete(_)));

        let cli = Cli::try_parse_from(vec!["test", "schedule", "restore", "1"]).unwrap();
        assert!(matches!(cli.command, Commands::ScheduleRestore(_)));

        let cli = Cli::try_parse_from(vec!["test", "schedule", "purge", "1"]).unwrap();
        assert!(matches!(cli.command, Commands::SchedulePurge(_)));
    }

    #[test]
    fn test_parse_schedule_export_import() {
        let args = vec!["test", "schedule", "export", "1", "/tmp/fall.ctb"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::ScheduleExport(cmd) => {
                assert_eq!(cmd.id, Id::ShortIdOrUid("1".to_string()));
                assert_eq!(cmd.path, PathBuf::from("/tmp/fall.ctb"));
            }
            _ => panic!("Expected ScheduleExport command"),
        }

        let cli = Cli::try_parse_from(vec!["test", "schedule", "import", "/tmp/fall.ctb"]).unwrap();
        match cli.command {
            Commands::ScheduleImport(cmd) => assert_eq!(cmd.path, PathBuf::from("/tmp/fall.ctb")),
            _ => panic!("Expected ScheduleImport command"),
        }
    }

    #[test]
    fn test_parse_course_new() {
        let args = vec![
            "test",
            "course",
            "new",
            "Calculus",
            "--day",
            "tue",
            "--lessons",
            "3-4",
            "--weeks",
            "1-15 odd",
            "--trim-conflicts",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::CourseNew(cmd) => {
                assert_eq!(cmd.name, "Calculus");
                assert_eq!(cmd.weekday, Some(Weekday::Tuesday));
                assert_eq!(cmd.range.map(|r| (r.start(), r.end())), Some((3, 4)));
                assert_eq!(cmd.weeks.map(|w| w.to_string()), Some("1-15 odd".to_string()));
                assert!(cmd.trim_conflicts);
            }
            _ => panic!("Expected CourseNew command"),
        }
    }

    #[test]
    fn test_parse_course_new_rejects_bad_weeks() {
        let args = vec!["test", "course", "new", "Calculus", "--weeks", "3-1"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_course_edit() {
        let args = vec!["test", "c", "edit", "5", "--classroom", "B202"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::CourseEdit(cmd) => {
                assert_eq!(cmd.id, Id::ShortIdOrUid("5".to_string()));
                assert_eq!(cmd.patch.classroom, Some("B202".to_string()));
                assert!(cmd.patch.name.is_none());
            }
            _ => panic!("Expected CourseEdit command"),
        }
    }

    #[test]
    fn test_parse_course_edit_without_changes() {
        let args = vec!["test", "course", "edit", "5"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_course_delete() {
        let cli = Cli::try_parse_from(vec!["test", "course", "delete", "5"]).unwrap();
        assert!(matches!(cli.command, Commands::CourseDelete(_)));
    }

    #[test]
    fn test_parse_lesson_set() {
        let args = vec![
            "test", "lesson", "set", "--period", "morning", "--start", "08:30", "--count", "5",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::LessonSet(cmd) => {
                assert_eq!(cmd.start, Some(time(8, 30, 0, 0)));
                assert_eq!(cmd.count, Some(5));
            }
            _ => panic!("Expected LessonSet command"),
        }
    }

    #[test]
    fn test_parse_settings_set() {
        let args = vec!["test", "settings", "set", "--theme", "dark"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::SettingsSet(cmd) => assert_eq!(cmd.patch.theme, Some(ThemeMode::Dark)),
            _ => panic!("Expected SettingsSet command"),
        }
    }

    #[test]
    fn test_parse_about() {
        let cli = Cli::try_parse_from(vec!["test", "about"]).unwrap();
        assert!(matches!(cli.command, Commands::About(_)));
    }

    #[test]
    fn test_parse_generate_completions() {
        let args = vec!["test", "generate-completion", "zsh"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => {
                assert_eq!(cmd.shell, Shell::Zsh);
            }
            _ => panic!("Expected GenerateCompletion command"),
        }
    }
}
