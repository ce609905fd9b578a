// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Placement of courses into the weekly grid.
//!
//! Everything here is pure computation over the courses of one schedule:
//! - conflict detection between a candidate course and existing ones,
//! - the weeks a candidate can take without conflicts,
//! - the per-day layout of (possibly overlapping) course cells.

use jiff::civil::Date;
use serde::Serialize;

use crate::{Course, CourseDraft, Range, Schedule, WeekList, Weekday};

/// Another course sharing the weekday, some lessons and some weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub uid: String,
    pub name: String,
    pub range: Range,
    /// The weeks both courses take place in.
    pub weeks: WeekList,
}

/// Courses on the same weekday with a range overlapping `range`, skipping `exclude`.
fn overlapping<'a>(
    weekday: Weekday,
    range: Range,
    exclude: Option<&'a str>,
    others: &'a [Course],
) -> impl Iterator<Item = &'a Course> + 'a {
    others.iter().filter(move |c| {
        Some(c.uid.as_str()) != exclude && c.weekday == weekday && c.range.overlaps(&range)
    })
}

/// Lists the courses the draft conflicts with. The course with uid `exclude`,
/// usually the one being edited, is ignored.
pub fn conflicts(draft: &CourseDraft, exclude: Option<&str>, others: &[Course]) -> Vec<Conflict> {
    overlapping(draft.weekday, draft.range, exclude, others)
        .filter_map(|c| {
            let weeks = c.weeks.intersection(&draft.weeks);
            (!weeks.is_empty()).then(|| Conflict {
                uid: c.uid.clone(),
                name: c.name.clone(),
                range: c.range,
                weeks,
            })
        })
        .collect()
}

/// The weeks of the draft not taken by an overlapping course.
pub fn valid_weeks(draft: &CourseDraft, exclude: Option<&str>, others: &[Course]) -> WeekList {
    overlapping(draft.weekday, draft.range, exclude, others)
        .fold(draft.weeks.clone(), |weeks, c| weeks.difference(&c.weeks))
}

/// A course cell positioned in a day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedCell {
    pub course: Course,
    /// True when the course takes place in the displayed week.
    pub active: bool,
    /// Zero-based lane among the cells of its overlap cluster.
    pub lane: usize,
    /// Number of lanes of its overlap cluster.
    pub lanes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub weekday: Weekday,
    pub date: Option<Date>,
    pub cells: Vec<PlacedCell>,
}

/// The courses of one week, laid out per visible weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekTable {
    pub week: u16,
    pub lesson_count: u8,
    pub days: Vec<DayColumn>,
    /// Active courses on weekdays that are not displayed.
    pub hidden: usize,
}

impl WeekTable {
    pub fn build(schedule: &Schedule, courses: &[Course], week: u16) -> Self {
        let weekdays = schedule.visible_weekdays();
        let days = weekdays
            .iter()
            .map(|&weekday| {
                let day: Vec<&Course> = courses.iter().filter(|c| c.weekday == weekday).collect();
                let (active, inactive): (Vec<&Course>, Vec<&Course>) =
                    day.into_iter().partition(|c| c.is_active(week));

                let mut cells: Vec<(Course, bool)> =
                    active.iter().map(|c| ((*c).clone(), true)).collect();
                if schedule.show_inactive {
                    cells.extend(
                        inactive
                            .into_iter()
                            .filter(|c| !active.iter().any(|a| a.range.overlaps(&c.range)))
                            .map(|c| (c.clone(), false)),
                    );
                }

                DayColumn {
                    weekday,
                    date: schedule.date_of(week, weekday),
                    cells: layout_day(cells),
                }
            })
            .collect();

        let hidden = courses
            .iter()
            .filter(|c| !weekdays.contains(&c.weekday) && c.is_active(week))
            .count();

        Self {
            week,
            lesson_count: schedule.lessons.lesson_count(),
            days,
            hidden,
        }
    }

    pub fn day(&self, weekday: Weekday) -> Option<&DayColumn> {
        self.days.iter().find(|d| d.weekday == weekday)
    }

    /// The cell shown in a slot, active cells first.
    pub fn cell(&self, weekday: Weekday, lesson: u8) -> Option<&PlacedCell> {
        let cells = self.cells_at(weekday, lesson);
        cells
            .iter()
            .find(|c| c.active)
            .or_else(|| cells.first())
            .copied()
    }

    /// Cells covering a slot, in start order.
    pub fn cells_at(&self, weekday: Weekday, lesson: u8) -> Vec<&PlacedCell> {
        self.day(weekday)
            .map(|d| {
                d.cells
                    .iter()
                    .filter(|c| c.course.range.contains(lesson))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Assigns lanes to the cells of one day.
///
/// Cells are sorted by start slot and grouped into clusters of transitively
/// overlapping ranges. Inside a cluster each cell takes the first lane whose
/// last cell ended before it starts.
pub fn layout_day(mut cells: Vec<(Course, bool)>) -> Vec<PlacedCell> {
    cells.sort_by(|(a, _), (b, _)| {
        (a.range.start(), a.range.end(), &a.name).cmp(&(b.range.start(), b.range.end(), &b.name))
    });

    let mut placed: Vec<PlacedCell> = Vec::with_capacity(cells.len());
    let mut cluster_start = 0;
    let mut cluster_end = 0u8;
    let mut lane_ends: Vec<u8> = Vec::new();

    for (course, active) in cells {
        let range = course.range;
        if !placed.is_empty() && range.start() > cluster_end {
            finish_cluster(&mut placed[cluster_start..], lane_ends.len());
            cluster_start = placed.len();
            lane_ends.clear();
        }

        let lane = match lane_ends.iter().position(|end| *end < range.start()) {
            Some(lane) => {
                lane_ends[lane] = range.end();
                lane
            }
            None => {
                lane_ends.push(range.end());
                lane_ends.len() - 1
            }
        };
        cluster_end = match cluster_start == placed.len() {
            true => range.end(),
            false => cluster_end.max(range.end()),
        };

        placed.push(PlacedCell {
            course,
            active,
            lane,
            lanes: 1,
        });
    }
    let lanes = lane_ends.len();
    finish_cluster(&mut placed[cluster_start..], lanes);
    placed
}

fn finish_cluster(cells: &mut [PlacedCell], lanes: usize) {
    for cell in cells {
        cell.lanes = lanes.max(1);
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{Color, ScheduleDraft};

    fn course(uid: &str, weekday: Weekday, start: u8, end: u8, weeks: &str) -> Course {
        Course {
            uid: uid.to_string(),
            schedule_uid: "s1".to_string(),
            name: uid.to_uppercase(),
            classroom: String::new(),
            teacher: String::new(),
            range: Range::new(start, end).unwrap(),
            weekday,
            weeks: weeks.parse().unwrap(),
            color: Color::default(),
            note: String::new(),
        }
    }

    fn draft(weekday: Weekday, start: u8, end: u8, weeks: &str) -> CourseDraft {
        course("new", weekday, start, end, weeks).to_draft()
    }

    fn schedule() -> Schedule {
        ScheduleDraft::new("Fall", date(2025, 9, 1)).into_schedule("s1".to_string())
    }

    #[test]
    fn conflicts_need_same_day_overlap_and_shared_weeks() {
        let others = vec![
            course("a", Weekday::Monday, 1, 2, "1-16"),
            course("b", Weekday::Monday, 3, 4, "1-16"),
            course("c", Weekday::Tuesday, 1, 2, "1-16"),
            course("d", Weekday::Monday, 2, 3, "2-16 even"),
        ];
        let found = conflicts(&draft(Weekday::Monday, 1, 2, "1-8 odd"), None, &others);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].uid, "a");
        assert_eq!(found[0].weeks, "1-7 odd".parse().unwrap());

        let found = conflicts(&draft(Weekday::Monday, 2, 2, "4"), None, &others);
        let uids: Vec<_> = found.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "d"]);
    }

    #[test]
    fn conflicts_skip_excluded_course() {
        let others = vec![course("a", Weekday::Monday, 1, 2, "1-16")];
        let edited = others[0].to_draft();
        assert!(conflicts(&edited, Some("a"), &others).is_empty());
        assert_eq!(conflicts(&edited, None, &others).len(), 1);
    }

    #[test]
    fn valid_weeks_excludes_conflicting_weeks() {
        let others = vec![
            course("a", Weekday::Monday, 1, 2, "1-16 odd"),
            course("b", Weekday::Monday, 2, 3, "2-6 even"),
            course("c", Weekday::Monday, 5, 6, "1-16"),
        ];
        let d = draft(Weekday::Monday, 1, 3, "1-16");
        let valid = valid_weeks(&d, None, &others);
        assert_eq!(valid, "8-16 even".parse().unwrap());

        // the valid weeks never conflict and stay inside the draft's weeks
        let trimmed = CourseDraft {
            weeks: valid.clone(),
            ..d.clone()
        };
        assert!(conflicts(&trimmed, None, &others).is_empty());
        assert!(valid.is_subset(&d.weeks));
    }

    #[test]
    fn layout_assigns_lanes_per_cluster() {
        let cells = vec![
            (course("a", Weekday::Monday, 1, 3, "1"), true),
            (course("b", Weekday::Monday, 2, 2, "2"), false),
            (course("c", Weekday::Monday, 3, 4, "3"), false),
            (course("d", Weekday::Monday, 6, 7, "1"), true),
        ];
        let placed = layout_day(cells);
        let lanes: Vec<_> = placed
            .iter()
            .map(|c| (c.course.uid.as_str(), c.lane, c.lanes))
            .collect();
        assert_eq!(
            lanes,
            vec![("a", 0, 2), ("b", 1, 2), ("c", 1, 2), ("d", 0, 1)]
        );
    }

    #[test]
    fn layout_of_empty_day() {
        assert!(layout_day(vec![]).is_empty());
    }

    #[test]
    fn week_table_hides_inactive_behind_active() {
        let s = schedule();
        let courses = vec![
            course("a", Weekday::Monday, 1, 2, "1-8"),
            course("b", Weekday::Monday, 1, 2, "9-16"),
            course("c", Weekday::Monday, 5, 6, "9-16"),
            course("d", Weekday::Saturday, 1, 2, "1-16"),
        ];
        let table = WeekTable::build(&s, &courses, 3);
        assert_eq!(table.days.len(), 5);
        assert_eq!(table.hidden, 1);
        assert_eq!(table.lesson_count, 10);

        let monday = table.day(Weekday::Monday).unwrap();
        assert_eq!(monday.date, Some(date(2025, 9, 15)));
        let uids: Vec<_> = monday
            .cells
            .iter()
            .map(|c| (c.course.uid.as_str(), c.active))
            .collect();
        assert_eq!(uids, vec![("a", true), ("c", false)]);
        assert_eq!(table.cells_at(Weekday::Monday, 2).len(), 1);
        assert_eq!(
            table.cell(Weekday::Monday, 5).map(|c| c.course.uid.as_str()),
            Some("c")
        );
        assert!(table.cell(Weekday::Monday, 4).is_none());
        assert!(table.cells_at(Weekday::Tuesday, 1).is_empty());
    }

    #[test]
    fn week_table_without_inactive() {
        let mut s = schedule();
        s.show_inactive = false;
        s.display_weekends = true;
        let courses = vec![
            course("a", Weekday::Monday, 1, 2, "1-8"),
            course("c", Weekday::Monday, 5, 6, "9-16"),
            course("d", Weekday::Saturday, 1, 2, "1-16"),
        ];
        let table = WeekTable::build(&s, &courses, 3);
        assert_eq!(table.days.len(), 7);
        assert_eq!(table.hidden, 0);
        assert_eq!(table.day(Weekday::Monday).unwrap().cells.len(), 1);
        assert_eq!(table.day(Weekday::Saturday).unwrap().cells.len(), 1);
    }

    #[test]
    fn active_same_day_overlap_never_shares_week() {
        // courses accepted one by one only when conflict free
        let candidates = [
            course("a", Weekday::Monday, 1, 2, "1-16"),
            course("b", Weekday::Monday, 2, 3, "1-16 odd"),
            course("c", Weekday::Monday, 3, 4, "2-16 even"),
            course("d", Weekday::Monday, 3, 3, "1-4"),
        ];
        let mut accepted: Vec<Course> = Vec::new();
        for c in candidates {
            if conflicts(&c.to_draft(), None, &accepted).is_empty() {
                accepted.push(c);
            }
        }

        for week in 1..=16 {
            for (i, a) in accepted.iter().enumerate() {
                for b in &accepted[i + 1..] {
                    let clash = a.weekday == b.weekday
                        && a.range.overlaps(&b.range)
                        && a.is_active(week)
                        && b.is_active(week);
                    assert!(!clash, "{} and {} clash in week {week}", a.uid, b.uid);
                }
            }
        }
        let uids: Vec<_> = accepted.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "c"]);
    }
}
