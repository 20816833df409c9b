//! Parsed chat records.
//!
//! This module provides [`Record`], one parsed line of a chat export, with the
//! calendar fields every aggregation groups by already derived from the
//! timestamp.
//!
//! # Examples
//!
//! ```
//! use chatlens::Record;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(13, 5, 0).unwrap();
//! let record = Record::new(ts, "Alice", "Hello there");
//!
//! assert_eq!(record.weekday, "Monday");
//! assert_eq!(record.month, "January");
//! assert_eq!(record.hour, 13);
//! assert_eq!(record.period(), "13-14");
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Sentinel user assigned to lines without a `sender: ` separator
/// (membership changes, encryption notices, ...).
pub const GROUP_NOTIFICATION: &str = "group_notification";

/// Placeholder WhatsApp writes in place of an omitted attachment.
pub const MEDIA_OMITTED: &str = "<Media omitted>";

/// Weekday names in heatmap row order.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One parsed chat line.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Local time written in the export |
/// | `user` | `String` | Sender, or [`GROUP_NOTIFICATION`] |
/// | `message` | `String` | Body, continuation lines joined with `\n` |
/// | `date` | `NaiveDate` | Calendar date of `timestamp` |
/// | `year` / `month_num` | `i32` / `u32` | Grouping keys for the monthly timeline |
/// | `month` | `String` | English month name |
/// | `weekday` | `String` | English weekday name |
/// | `hour` | `u32` | Hour of day, `0..24` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// When the message was sent, as written in the export (no timezone).
    pub timestamp: NaiveDateTime,

    /// Display name of the sender, or [`GROUP_NOTIFICATION`].
    pub user: String,

    /// Message body.
    pub message: String,

    /// Date part of the timestamp.
    pub date: NaiveDate,

    /// Calendar year.
    pub year: i32,

    /// Month number, `1..=12`.
    pub month_num: u32,

    /// Month name, e.g. `"January"`.
    pub month: String,

    /// Weekday name, e.g. `"Monday"`.
    pub weekday: String,

    /// Hour of day.
    pub hour: u32,
}

impl Record {
    /// Creates a record, deriving the calendar fields from `timestamp`.
    pub fn new(
        timestamp: NaiveDateTime,
        user: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let date = timestamp.date();
        Self {
            timestamp,
            user: user.into(),
            message: message.into(),
            date,
            year: date.year(),
            month_num: date.month(),
            month: timestamp.format("%B").to_string(),
            weekday: timestamp.format("%A").to_string(),
            hour: timestamp.hour(),
        }
    }

    /// Creates a system notification record.
    pub fn notification(timestamp: NaiveDateTime, message: impl Into<String>) -> Self {
        Self::new(timestamp, GROUP_NOTIFICATION, message)
    }

    /// Returns `true` for membership changes and other sender-less lines.
    pub fn is_notification(&self) -> bool {
        self.user == GROUP_NOTIFICATION
    }

    /// Returns `true` if the first line of the body is the media placeholder.
    ///
    /// Lines after it are a caption and belong to the attachment.
    pub fn is_media(&self, placeholder: &str) -> bool {
        self.message.lines().next().map(str::trim) == Some(placeholder)
    }

    /// Zero-based weekday index, Monday = 0.
    pub fn weekday_index(&self) -> usize {
        self.date.weekday().num_days_from_monday() as usize
    }

    /// Hour bucket label, e.g. `"13-14"`, `"23-00"`.
    pub fn period(&self) -> String {
        period_label(self.hour)
    }

    /// Appends a continuation line.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.message.push('\n');
        self.message.push_str(line);
    }
}

/// Hour bucket label for `hour`, wrapping at midnight.
pub fn period_label(hour: u32) -> String {
    format!("{:02}-{:02}", hour, (hour + 1) % 24)
}
