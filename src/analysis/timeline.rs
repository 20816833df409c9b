//! Time-based aggregations: timelines, busiest days/months, activity heatmap.
//!
//! Record sets are chronological, so grouping keys are emitted in calendar
//! order without extra sorting of the input.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{Outcome, UserFilter, frequency};
use crate::record::{Record, WEEKDAYS, period_label};

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    /// Calendar year.
    pub year: i32,
    /// Month number, `1..=12`.
    pub month: u32,
    /// `"January 2024"`
    pub label: String,
    /// Number of messages.
    pub count: usize,
}

/// Messages on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    /// The date.
    pub date: NaiveDate,
    /// Number of messages.
    pub count: usize,
}

/// A weekday or month name with its message count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameCount {
    /// `"Monday"`, `"January"`, ...
    pub name: String,
    /// Number of messages.
    pub count: usize,
}

/// Weekday × hour message counts.
///
/// Rows follow [`WEEKDAYS`] (Monday first); columns are hour buckets
/// `"00-01"` … `"23-00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    /// Row labels.
    pub weekdays: Vec<String>,
    /// Column labels.
    pub periods: Vec<String>,
    /// `cells[weekday][hour]`
    pub cells: Vec<Vec<usize>>,
}

impl Heatmap {
    fn empty() -> Self {
        Self {
            weekdays: WEEKDAYS.iter().map(|d| (*d).to_string()).collect(),
            periods: (0..24).map(period_label).collect(),
            cells: vec![vec![0; 24]; 7],
        }
    }

    /// Count for a weekday index (Monday = 0) and hour.
    pub fn get(&self, weekday: usize, hour: usize) -> usize {
        self.cells
            .get(weekday)
            .and_then(|row| row.get(hour))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    /// Largest cell value.
    pub fn max(&self) -> usize {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Messages per month, chronologically.
pub fn monthly_timeline(filter: &UserFilter, records: &[Record]) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();

    for record in filter.apply(records) {
        months
            .entry((record.year, record.month_num))
            .or_insert_with(|| (format!("{} {}", record.month, record.year), 0))
            .1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (label, count))| MonthlyPoint {
            year,
            month,
            label,
            count,
        })
        .collect()
}

/// Messages per calendar date, chronologically.
pub fn daily_timeline(filter: &UserFilter, records: &[Record]) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for record in filter.apply(records) {
        *days.entry(record.date).or_default() += 1;
    }

    days.into_iter()
        .map(|(date, count)| DailyPoint { date, count })
        .collect()
}

/// Messages per weekday name, busiest first.
pub fn week_activity(filter: &UserFilter, records: &[Record]) -> Vec<NameCount> {
    name_counts(filter.apply(records).map(|r| r.weekday.as_str()))
}

/// Messages per month name, busiest first.
pub fn month_activity(filter: &UserFilter, records: &[Record]) -> Vec<NameCount> {
    name_counts(filter.apply(records).map(|r| r.month.as_str()))
}

fn name_counts<'a>(names: impl Iterator<Item = &'a str>) -> Vec<NameCount> {
    frequency(names)
        .into_iter()
        .map(|(name, count)| NameCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Weekday × hour heatmap.
///
/// Returns [`Outcome::InsufficientData`] when fewer than `min_records`
/// records pass the filter.
pub fn activity_heatmap(
    filter: &UserFilter,
    records: &[Record],
    min_records: usize,
) -> Outcome<Heatmap> {
    let mut heatmap = Heatmap::empty();
    let mut seen = 0usize;

    for record in filter.apply(records) {
        heatmap.cells[record.weekday_index()][record.hour as usize] += 1;
        seen += 1;
    }

    if seen == 0 || seen < min_records {
        return Outcome::insufficient(format!(
            "{seen} messages, at least {} needed for a heatmap",
            min_records.max(1)
        ));
    }

    Outcome::Ready(heatmap)
}
