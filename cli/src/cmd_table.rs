// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt};

use classtable_core::{ClassTable, Id, Period, PlacedCell, Schedule, TermWeek, WeekTable, Weekday};
use clap::{ArgMatches, Command, arg};
use colored::{Color, ColoredString, Colorize};
use jiff::civil::Date;

use crate::arg::CommonArgs;
use crate::cmd_schedule::resolve_schedule;
use crate::config::Config;
use crate::util::{OutputFormat, center_to_width, format_time, pad_to_width};

const LABEL_WIDTH: usize = 8;

#[derive(Debug, Clone)]
pub struct CmdTable {
    pub week: Option<u16>,
    pub schedule: Option<Id>,
    pub output_format: OutputFormat,
}

impl CmdTable {
    pub const NAME: &str = "table";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("t")
            .about("Show the week table of a schedule")
            .arg(
                arg!(-w --week <WEEK> "The week to show, defaults to the current one")
                    .value_parser(clap::value_parser!(u16).range(1..)),
            )
            .arg(CommonArgs::schedule())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            week: matches.get_one("week").copied(),
            schedule: CommonArgs::get_schedule(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut ClassTable, config: Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing week table...");
        let schedule = resolve_schedule(app, self.schedule.as_ref()).await?;
        let week = match self.week {
            Some(week) => week,
            None => match schedule.week_of(app.today()) {
                TermWeek::NotStarted => 1,
                TermWeek::Week(w) => w,
                TermWeek::Ended => schedule.total_weeks,
            },
        };

        let table = app
            .week_table(&Id::Uid(schedule.uid.clone()), week)
            .await?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
            OutputFormat::Table => {
                let grid = WeekGrid::new(&schedule, &table, app.today(), config.cell_width);
                print!("{grid}");
            }
        }
        Ok(())
    }
}

/// A week table drawn as a text grid: one row per lesson, one column per day.
pub struct WeekGrid<'a> {
    schedule: &'a Schedule,
    table: &'a WeekTable,
    today: Date,
    cell_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub text: String,
    pub color: Option<Color>,
    pub highlight: bool,
}

impl GridCell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            highlight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridRow {
    /// Boundary between two periods of the day.
    Separator,
    /// One slot per day, each split into the lanes of its overlapping cells.
    Lesson {
        label: String,
        slots: Vec<Vec<GridCell>>,
    },
}

impl<'a> WeekGrid<'a> {
    pub fn new(schedule: &'a Schedule, table: &'a WeekTable, today: Date, cell_width: usize) -> Self {
        Self {
            schedule,
            table,
            today,
            cell_width: cell_width.max(4),
        }
    }

    pub fn title(&self) -> String {
        let mut title = format!(
            "{} · week {}/{}",
            self.schedule.name, self.table.week, self.schedule.total_weeks
        );
        let first = self.table.days.first().and_then(|d| d.date);
        let last = self.table.days.last().and_then(|d| d.date);
        if let (Some(first), Some(last)) = (first, last) {
            title.push_str(&format!(" · {first} ~ {last}"));
        }
        title
    }

    pub fn header(&self) -> Vec<GridCell> {
        self.table
            .days
            .iter()
            .map(|day| {
                let text = match day.date {
                    Some(date) => format!("{} {}", day.weekday.short_name(), date.strftime("%m-%d")),
                    None => day.weekday.short_name().to_string(),
                };
                GridCell {
                    text,
                    color: None,
                    highlight: day.date == Some(self.today),
                }
            })
            .collect()
    }

    pub fn rows(&self) -> Vec<GridRow> {
        let mut rows = Vec::new();
        let mut period: Option<Period> = None;
        for (index, current, lesson) in self.schedule.lessons.lessons() {
            if period.is_some_and(|p| p != current) {
                rows.push(GridRow::Separator);
            }
            period = Some(current);

            let label = format!("{index:>2} {}", format_time(lesson.start));
            let slots = self
                .table
                .days
                .iter()
                .map(|day| self.slot(day.weekday, index))
                .collect();
            rows.push(GridRow::Lesson { label, slots });
        }
        rows
    }

    /// The lanes of a day slot. Every cell covering the slot is drawn in its
    /// own lane, so overlapping courses stay side by side.
    fn slot(&self, weekday: Weekday, lesson: u8) -> Vec<GridCell> {
        let Some(primary) = self.table.cell(weekday, lesson) else {
            return vec![GridCell::plain("")];
        };

        let mut lanes = vec![GridCell::plain(""); primary.lanes];
        for placed in self.table.cells_at(weekday, lesson) {
            if let Some(lane) = lanes.get_mut(placed.lane) {
                *lane = lane_cell(placed, lesson);
            }
        }
        lanes
    }
}

fn lane_cell(placed: &PlacedCell, lesson: u8) -> GridCell {
    let course = &placed.course;
    let text = match lesson - course.range.start() {
        0 if placed.active => course.name.clone(),
        0 => format!("({})", course.name),
        1 => course.classroom.clone(),
        _ => String::new(),
    };

    let color = match placed.active {
        true => Color::TrueColor {
            r: course.color.r,
            g: course.color.g,
            b: course.color.b,
        },
        false => Color::BrightBlack,
    };
    GridCell {
        text,
        color: Some(color),
        highlight: false,
    }
}

/// Splits `width` columns into `lanes` lanes separated by one space.
/// The first lanes take the remainder.
fn lane_widths(width: usize, lanes: usize) -> Vec<usize> {
    let lanes = lanes.max(1);
    let usable = width.saturating_sub(lanes - 1);
    let (base, extra) = (usable / lanes, usable % lanes);
    (0..lanes).map(|i| base + usize::from(i < extra)).collect()
}

fn styled(cell: &GridCell, text: String) -> ColoredString {
    match (cell.color, cell.highlight) {
        (_, true) => text.green().bold(),
        (Some(color), false) => text.color(color),
        (None, false) => text.normal(),
    }
}

impl fmt::Display for WeekGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title().bold())?;

        write!(f, "{}", " ".repeat(LABEL_WIDTH))?;
        for cell in self.header() {
            let text = center_to_width(&cell.text, self.cell_width);
            write!(f, " {}", styled(&cell, text))?;
        }
        writeln!(f)?;

        let width = LABEL_WIDTH + self.table.days.len() * (self.cell_width + 1);
        for row in self.rows() {
            match row {
                GridRow::Separator => writeln!(f, "{}", "─".repeat(width).bright_black())?,
                GridRow::Lesson { label, slots } => {
                    write!(f, "{}", pad_to_width(&label, LABEL_WIDTH).bright_black())?;
                    for lanes in &slots {
                        let widths = lane_widths(self.cell_width, lanes.len());
                        for (cell, width) in lanes.iter().zip(widths) {
                            write!(f, " {}", styled(cell, pad_to_width(&cell.text, width)))?;
                        }
                    }
                    writeln!(f)?;
                }
            }
        }

        if self.table.hidden > 0 {
            let note = format!("{} more on hidden weekend days", self.table.hidden);
            writeln!(f, "{}", note.italic())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtable_core::{Color as CourseColor, Course, LessonsPerDay, Range};
    use jiff::civil::date;

    fn schedule(display_weekends: bool) -> Schedule {
        Schedule {
            uid: "s1".to_string(),
            name: "Fall 2025".to_string(),
            term_start: date(2025, 9, 1),
            total_weeks: 16,
            display_weekends,
            show_inactive: true,
            lessons: LessonsPerDay::default(),
            deleted: false,
        }
    }

    fn course(uid: &str, weekday: Weekday, start: u8, end: u8, weeks: &str) -> Course {
        Course {
            uid: uid.to_string(),
            schedule_uid: "s1".to_string(),
            name: uid.to_string(),
            classroom: format!("{uid}-room"),
            teacher: String::new(),
            range: Range::new(start, end).unwrap(),
            weekday,
            weeks: weeks.parse().unwrap(),
            color: CourseColor::default(),
            note: String::new(),
        }
    }

    fn lesson_slots(rows: &[GridRow], index: usize) -> &Vec<Vec<GridCell>> {
        let lessons: Vec<&Vec<Vec<GridCell>>> = rows
            .iter()
            .filter_map(|r| match r {
                GridRow::Lesson { slots, .. } => Some(slots),
                GridRow::Separator => None,
            })
            .collect();
        lessons[index]
    }

    /// Slot texts of a lesson row, lanes joined with `|`.
    fn lesson_cells(rows: &[GridRow], index: usize) -> Vec<String> {
        lesson_slots(rows, index)
            .iter()
            .map(|lanes| {
                let texts: Vec<&str> = lanes.iter().map(|c| c.text.as_str()).collect();
                texts.join("|")
            })
            .collect()
    }

    #[test]
    fn test_parse_table() {
        let cmd = Command::new("test").subcommand(CmdTable::command());
        let matches = cmd
            .try_get_matches_from(["test", "table", "-w", "2", "-s", "1"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("table").unwrap();
        let parsed = CmdTable::from(sub_matches);
        assert_eq!(parsed.week, Some(2));
        assert_eq!(parsed.schedule, Some(Id::ShortIdOrUid("1".to_string())));
        assert_eq!(parsed.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_table_rejects_week_zero() {
        let cmd = Command::new("test").subcommand(CmdTable::command());
        assert!(cmd.try_get_matches_from(["test", "table", "-w", "0"]).is_err());
    }

    #[test]
    fn test_grid_header_and_title() {
        let schedule = schedule(false);
        let table = WeekTable::build(&schedule, &[], 2);
        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 10), 12);

        assert_eq!(grid.title(), "Fall 2025 · week 2/16 · 2025-09-08 ~ 2025-09-12");
        let header = grid.header();
        assert_eq!(header.len(), 5);
        assert_eq!(header[0].text, "Mon 09-08");
        assert!(header[2].highlight);
        assert!(!header[0].highlight);
    }

    #[test]
    fn test_grid_rows_follow_lessons() {
        let schedule = schedule(false);
        let table = WeekTable::build(&schedule, &[], 1);
        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 1), 12);

        let rows = grid.rows();
        // ten lessons plus two period boundaries
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[4], GridRow::Separator);
        assert_eq!(rows[9], GridRow::Separator);
        match &rows[0] {
            GridRow::Lesson { label, slots } => {
                assert_eq!(label, " 1 08:00");
                assert_eq!(slots.len(), 5);
            }
            GridRow::Separator => panic!("Expected a lesson row"),
        }
    }

    #[test]
    fn test_grid_cells_show_name_then_classroom() {
        let schedule = schedule(false);
        let courses = vec![course("math", Weekday::Tuesday, 1, 3, "1-16")];
        let table = WeekTable::build(&schedule, &courses, 1);
        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 1), 12);

        let rows = grid.rows();
        assert_eq!(lesson_cells(&rows, 0), ["", "math", "", "", ""]);
        assert_eq!(lesson_cells(&rows, 1), ["", "math-room", "", "", ""]);
        assert_eq!(lesson_cells(&rows, 2), ["", "", "", "", ""]);
    }

    #[test]
    fn test_grid_marks_inactive_and_overlaps() {
        let schedule = schedule(false);
        let courses = vec![
            course("odd", Weekday::Monday, 1, 2, "1-15 odd"),
            course("even", Weekday::Monday, 1, 2, "2-16 even"),
            course("late", Weekday::Friday, 5, 6, "3-4"),
        ];

        // week 1: the even course is inactive and hidden behind the active one
        let table = WeekTable::build(&schedule, &courses, 1);
        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 1), 12);
        let rows = grid.rows();
        assert_eq!(lesson_cells(&rows, 0)[0], "odd");
        // lesson 5 is after the morning separator
        assert_eq!(lesson_cells(&rows, 4)[4], "(late)");

        let cell = match &rows[5] {
            GridRow::Lesson { slots, .. } => slots[4][0].clone(),
            GridRow::Separator => panic!("Expected a lesson row"),
        };
        assert_eq!(cell.color, Some(Color::BrightBlack));
    }

    #[test]
    fn test_grid_overlapping_cells_take_lanes() {
        let schedule = schedule(false);
        let courses = vec![
            course("alpha", Weekday::Monday, 1, 2, "2-4"),
            course("beta", Weekday::Monday, 2, 3, "5-8"),
        ];

        // neither course takes place in week 1, so both are drawn dimmed side by side
        let table = WeekTable::build(&schedule, &courses, 1);
        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 1), 20);
        let rows = grid.rows();
        assert_eq!(lesson_cells(&rows, 0)[0], "(alpha)|");
        assert_eq!(lesson_cells(&rows, 1)[0], "alpha-room|(beta)");
        assert_eq!(lesson_cells(&rows, 2)[0], "|beta-room");
        assert_eq!(lesson_cells(&rows, 3)[0], "");

        let beta = &lesson_slots(&rows, 1)[0][1];
        assert_eq!(beta.color, Some(Color::BrightBlack));

        let out = grid.to_string();
        assert!(out.contains("(alpha)"));
        assert!(out.contains("(beta)"));
    }

    #[test]
    fn test_grid_active_course_hides_inactive_overlap() {
        let schedule = schedule(false);
        let courses = vec![
            course("alpha", Weekday::Monday, 1, 2, "1-4"),
            course("beta", Weekday::Monday, 2, 3, "5-8"),
        ];

        let table = WeekTable::build(&schedule, &courses, 1);
        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 1), 20);
        let rows = grid.rows();
        assert_eq!(lesson_cells(&rows, 0)[0], "alpha");
        assert_eq!(lesson_cells(&rows, 1)[0], "alpha-room");
        assert_eq!(lesson_cells(&rows, 2)[0], "");
    }

    #[test]
    fn test_lane_widths_fill_the_cell() {
        assert_eq!(lane_widths(12, 1), [12]);
        assert_eq!(lane_widths(12, 2), [6, 5]);
        assert_eq!(lane_widths(13, 3), [4, 4, 3]);
        assert_eq!(lane_widths(4, 0), [4]);
        for lanes in 1..=4 {
            let widths = lane_widths(20, lanes);
            assert_eq!(widths.iter().sum::<usize>() + lanes - 1, 20);
        }
    }

    #[test]
    fn test_grid_counts_hidden_weekend_courses() {
        let schedule = schedule(false);
        let courses = vec![course("lab", Weekday::Saturday, 1, 2, "1-16")];
        let table = WeekTable::build(&schedule, &courses, 1);
        assert_eq!(table.hidden, 1);

        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 1), 12);
        let out = grid.to_string();
        assert!(out.contains("1 more on hidden weekend days"));
        assert!(!out.contains("Sat"));
    }

    #[test]
    fn test_grid_shows_weekends() {
        let schedule = schedule(true);
        let courses = vec![course("lab", Weekday::Saturday, 1, 2, "1-16")];
        let table = WeekTable::build(&schedule, &courses, 1);
        let grid = WeekGrid::new(&schedule, &table, date(2025, 9, 1), 12);

        assert_eq!(grid.header().len(), 7);
        assert_eq!(lesson_cells(&grid.rows(), 0)[5], "lab");
    }
}
