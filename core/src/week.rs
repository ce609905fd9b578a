// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// The longest term supported, in weeks.
pub const MAX_WEEKS: u16 = 30;

/// Describes a week set relative to the term length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WeekPattern {
    /// Every week of the term.
    All,
    /// Weeks 1, 3, 5, ...
    Odd,
    /// Weeks 2, 4, 6, ...
    Even,
}

impl WeekPattern {
    fn matches(self, week: u16) -> bool {
        match self {
            WeekPattern::All => true,
            WeekPattern::Odd => week % 2 == 1,
            WeekPattern::Even => week % 2 == 0,
        }
    }
}

impl fmt::Display for WeekPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekPattern::All => write!(f, "all"),
            WeekPattern::Odd => write!(f, "odd"),
            WeekPattern::Even => write!(f, "even"),
        }
    }
}

/// The set of 1-based week numbers in which a course takes place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekList(BTreeSet<u16>);

impl WeekList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the week set of a pattern for a term of `total_weeks` weeks.
    pub fn from_pattern(pattern: WeekPattern, total_weeks: u16) -> Self {
        Self((1..=total_weeks).filter(|w| pattern.matches(*w)).collect())
    }

    /// Returns the pattern this list is equal to, if any.
    pub fn pattern(&self, total_weeks: u16) -> Option<WeekPattern> {
        [WeekPattern::All, WeekPattern::Odd, WeekPattern::Even]
            .into_iter()
            .find(|p| !self.is_empty() && *self == Self::from_pattern(*p, total_weeks))
    }

    pub fn contains(&self, week: u16) -> bool {
        self.0.contains(&week)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<u16> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    pub fn union(&self, other: &WeekList) -> WeekList {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn intersection(&self, other: &WeekList) -> WeekList {
        Self(self.0.intersection(&other.0).copied().collect())
    }

    pub fn difference(&self, other: &WeekList) -> WeekList {
        Self(self.0.difference(&other.0).copied().collect())
    }

    pub fn is_disjoint(&self, other: &WeekList) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub fn is_subset(&self, other: &WeekList) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Drops weeks outside of `1..=total_weeks`.
    pub fn clamp(&self, total_weeks: u16) -> WeekList {
        Self(self.0.range(1..=total_weeks).copied().collect())
    }

    /// Splits the sorted weeks into display segments.
    fn segments(&self) -> Vec<Segment> {
        let weeks: Vec<u16> = self.iter().collect();
        let mut segments = Vec::new();
        let mut i = 0;
        while i < weeks.len() {
            let run = run_length(&weeks[i..], 1);
            if run >= 2 {
                segments.push(Segment::Range(weeks[i], weeks[i + run - 1]));
                i += run;
                continue;
            }

            let run = run_length(&weeks[i..], 2);
            if run >= 3 {
                let parity = match weeks[i] % 2 {
                    1 => WeekPattern::Odd,
                    _ => WeekPattern::Even,
                };
                segments.push(Segment::Parity(weeks[i], weeks[i + run - 1], parity));
                i += run;
                continue;
            }

            segments.push(Segment::Single(weeks[i]));
            i += 1;
        }
        segments
    }
}

/// Length of the leading run in which each week is `step` after the previous one.
fn run_length(weeks: &[u16], step: u16) -> usize {
    let mut n = 1;
    while n < weeks.len() && weeks[n - 1].checked_add(step) == Some(weeks[n]) {
        n += 1;
    }
    n
}

enum Segment {
    Single(u16),
    Range(u16, u16),
    Parity(u16, u16, WeekPattern),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Single(w) => write!(f, "{w}"),
            Segment::Range(a, b) => write!(f, "{a}-{b}"),
            Segment::Parity(a, b, p) => write!(f, "{a}-{b} {p}"),
        }
    }
}

impl fmt::Display for WeekList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

static WEEK_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*(?:-\s*(\d+))?\s*(odd|even|单|双)?$").expect("valid week item regex")
});

impl FromStr for WeekList {
    type Err = ValidationError;

    /// Parses a week expression such as `1-16`, `1-15 odd` or `2-8 even, 10, 12-14`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weeks = WeekList::new();
        for item in s.split([',', '，']).map(str::trim).filter(|a| !a.is_empty()) {
            let captures = WEEK_ITEM
                .captures(item)
                .ok_or_else(|| ValidationError::Parse(format!("Invalid week expression: {item}")))?;

            let parse = |v: &str| {
                v.parse::<u16>()
                    .map_err(|e| ValidationError::Parse(format!("Invalid week '{v}': {e}")))
            };
            let start = parse(&captures[1])?;
            let end = match captures.get(2) {
                Some(end) => parse(end.as_str())?,
                None => start,
            };
            if start == 0 || start > end {
                return Err(ValidationError::Parse(format!("Invalid week range: {item}")));
            }
            if end > MAX_WEEKS {
                return Err(ValidationError::WeekOutOfBounds {
                    week: end,
                    total_weeks: MAX_WEEKS,
                });
            }

            let pattern = match captures.get(3).map(|a| a.as_str()) {
                Some("odd" | "单") => WeekPattern::Odd,
                Some("even" | "双") => WeekPattern::Even,
                _ => WeekPattern::All,
            };

            let matched: Vec<u16> = (start..=end).filter(|w| pattern.matches(*w)).collect();
            if matched.is_empty() {
                return Err(ValidationError::Parse(format!("No week matches: {item}")));
            }
            weeks.0.extend(matched);
        }
        Ok(weeks)
    }
}

impl TryFrom<String> for WeekList {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekList> for String {
    fn from(weeks: WeekList) -> Self {
        weeks.to_string()
    }
}

impl FromIterator<u16> for WeekList {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weeks(v: &[u16]) -> WeekList {
        v.iter().copied().collect()
    }

    #[test]
    fn all_is_union_of_odd_and_even() {
        for total in 1..=MAX_WEEKS {
            let all = WeekList::from_pattern(WeekPattern::All, total);
            let odd = WeekList::from_pattern(WeekPattern::Odd, total);
            let even = WeekList::from_pattern(WeekPattern::Even, total);
            assert_eq!(all, odd.union(&even), "total weeks {total}");
            assert!(odd.is_disjoint(&even));
            assert_eq!(all.len(), total as usize);
        }
    }

    #[test]
    fn recognizes_patterns() {
        assert_eq!(
            WeekList::from_pattern(WeekPattern::Odd, 16).pattern(16),
            Some(WeekPattern::Odd)
        );
        assert_eq!(weeks(&[1, 2, 3]).pattern(3), Some(WeekPattern::All));
        assert_eq!(weeks(&[1, 2, 3]).pattern(4), None);
        assert_eq!(WeekList::new().pattern(0), None);
    }

    #[test]
    fn set_operations() {
        let a = weeks(&[1, 2, 3, 4]);
        let b = weeks(&[3, 4, 5]);
        assert_eq!(a.intersection(&b), weeks(&[3, 4]));
        assert_eq!(a.difference(&b), weeks(&[1, 2]));
        assert_eq!(a.union(&b), weeks(&[1, 2, 3, 4, 5]));
        assert!(weeks(&[1, 2]).is_subset(&a));
        assert_eq!(b.clamp(4), weeks(&[3, 4]));
    }

    #[test]
    fn parse_expressions() {
        assert_eq!("1-4".parse::<WeekList>().unwrap(), weeks(&[1, 2, 3, 4]));
        assert_eq!("1-7 odd".parse::<WeekList>().unwrap(), weeks(&[1, 3, 5, 7]));
        assert_eq!("2-6双".parse::<WeekList>().unwrap(), weeks(&[2, 4, 6]));
        assert_eq!(
            "2-6 even, 9, 11-12".parse::<WeekList>().unwrap(),
            weeks(&[2, 4, 6, 9, 11, 12])
        );
        assert_eq!("".parse::<WeekList>().unwrap(), WeekList::new());
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!("0".parse::<WeekList>().is_err());
        assert!("5-3".parse::<WeekList>().is_err());
        assert!("abc".parse::<WeekList>().is_err());
        assert!("1-4 weekly".parse::<WeekList>().is_err());
        assert!("3 even".parse::<WeekList>().is_err());
    }

    #[test]
    fn parse_rejects_weeks_past_longest_term() {
        assert_eq!(
            "28-31".parse::<WeekList>(),
            Err(ValidationError::WeekOutOfBounds {
                week: 31,
                total_weeks: MAX_WEEKS
            })
        );
        assert!("65535".parse::<WeekList>().is_err());
        assert_eq!("30".parse::<WeekList>().unwrap(), weeks(&[30]));
    }

    #[test]
    fn display_near_u16_max() {
        assert_eq!(
            weeks(&[65530, 65532, 65534, 65535]).to_string(),
            "65530-65534 even, 65535"
        );
        assert_eq!(weeks(&[65534, 65535]).to_string(), "65534-65535");
    }

    #[test]
    fn display_compact() {
        assert_eq!(weeks(&[1, 2, 3, 4, 6, 8, 9, 10]).to_string(), "1-4, 6, 8-10");
        assert_eq!(
            WeekList::from_pattern(WeekPattern::Odd, 16).to_string(),
            "1-15 odd"
        );
        assert_eq!(weeks(&[2, 4]).to_string(), "2, 4");
        assert_eq!(WeekList::new().to_string(), "");
    }

    #[test]
    fn display_parses_back() {
        let cases = [
            weeks(&[1, 3, 5, 6, 7]),
            weeks(&[2, 4, 6, 8, 9, 11, 13, 15]),
            weeks(&[5]),
            WeekList::from_pattern(WeekPattern::Even, 18),
        ];
        for case in cases {
            let text = case.to_string();
            assert_eq!(text.parse::<WeekList>().unwrap(), case, "{text}");
        }
    }

    #[test]
    fn serde_as_expression() {
        let list = weeks(&[1, 2, 3]);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#""1-3""#);
        let back: WeekList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
