//! WhatsApp line-format utilities.
//!
//! WhatsApp exports vary by platform and locale. Every message starts with a
//! date/time prefix; lines without one continue the previous message.
//!
//! Supported prefixes:
//! - Android: `15/01/2024, 10:30 - Sender: Message`
//! - Android (dots): `15.01.24, 10:30 - Sender: Message`
//! - iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - iOS (dots): `[15.01.24, 10:30:45] Sender: Message`
//!
//! The separator between date and time may be `", "`, `","` or `" "`, and
//! 12-hour times may use `AM`, `am`, `a.m.` and the narrow no-break space
//! newer exports put before the meridiem.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;

// 10:30 | 10:30:45 | 10:30 PM | 10:30 p.m. | 10:30\u{202f}pm
const TIME: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:[\s\u{202f}\u{a0}]*[APap]\.?\s?[Mm]\.?)?";

/// Detected line-prefix variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateFormat {
    /// Android with slashes: `15/01/2024, 10:30 - `
    DashedSlash,
    /// Android with dots: `15.01.24, 10:30 - `
    DashedDot,
    /// iOS with slashes: `[1/15/24, 10:30:45 AM] `
    BracketedSlash,
    /// iOS with dots: `[15.01.24, 10:30:45] `
    BracketedDot,
}

impl DateFormat {
    /// Returns the prefix regex for this format.
    ///
    /// Captures: 1 = date, 2 = time, 3 = everything after the prefix.
    pub fn pattern(self) -> String {
        match self {
            DateFormat::DashedSlash => {
                format!(r"^(\d{{1,2}}/\d{{1,2}}/\d{{2,4}})(?:,\s*|\s+)({TIME})\s+-\s?(.*)$")
            }
            DateFormat::DashedDot => {
                format!(r"^(\d{{1,2}}\.\d{{1,2}}\.\d{{2,4}})(?:,\s*|\s+)({TIME})\s+-\s?(.*)$")
            }
            DateFormat::BracketedSlash => {
                format!(r"^\[(\d{{1,2}}/\d{{1,2}}/\d{{2,4}})(?:,\s*|\s+)({TIME})\]\s?(.*)$")
            }
            DateFormat::BracketedDot => {
                format!(r"^\[(\d{{1,2}}\.\d{{1,2}}\.\d{{2,4}})(?:,\s*|\s+)({TIME})\]\s?(.*)$")
            }
        }
    }

    /// Character separating day, month and year.
    pub fn date_separator(self) -> char {
        match self {
            DateFormat::DashedSlash | DateFormat::BracketedSlash => '/',
            DateFormat::DashedDot | DateFormat::BracketedDot => '.',
        }
    }

    /// Compiles the prefix regex.
    pub fn regex(self) -> Regex {
        Regex::new(&self.pattern()).expect("built-in WhatsApp pattern must compile")
    }

    /// Returns all format variants.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::DashedSlash,
            DateFormat::DashedDot,
            DateFormat::BracketedSlash,
            DateFormat::BracketedDot,
        ]
    }
}

/// Order of the first two date components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateOrder {
    /// `15/01/2024`
    DayFirst,
    /// `01/15/2024`
    MonthFirst,
}

/// Strips the invisible direction marks iOS exports put at line starts.
pub fn clean_line(line: &str) -> &str {
    line.trim_start_matches(['\u{200e}', '\u{200f}', '\u{feff}'])
        .trim_end_matches('\r')
}

/// Auto-detect the line format by analyzing sample lines.
///
/// Returns the format matching the most lines, or `None` if no format
/// matches any line.
pub fn detect_format(lines: &[&str]) -> Option<DateFormat> {
    let detectors: Vec<(DateFormat, Regex)> =
        DateFormat::all().iter().map(|&f| (f, f.regex())).collect();

    let mut scores = vec![0usize; detectors.len()];

    for line in lines {
        let line = clean_line(line);
        for (i, (_, regex)) in detectors.iter().enumerate() {
            if regex.is_match(line) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(detectors[winner_idx].0)
}

/// Detect whether dates are written day-first or month-first.
///
/// Dot-separated dates are always day-first. For slashes, a first component
/// above 12 proves day-first, a second component above 12 proves
/// month-first; without evidence `fallback` wins.
pub fn detect_date_order<'a>(
    dates: impl IntoIterator<Item = &'a str>,
    format: DateFormat,
    fallback: DateOrder,
) -> DateOrder {
    let sep = format.date_separator();
    if sep == '.' {
        return DateOrder::DayFirst;
    }

    for date in dates {
        let mut parts = date.split(sep).map(|p| p.parse::<u32>().unwrap_or(0));
        let first = parts.next().unwrap_or(0);
        let second = parts.next().unwrap_or(0);
        if first > 12 {
            return DateOrder::DayFirst;
        }
        if second > 12 {
            return DateOrder::MonthFirst;
        }
    }

    fallback
}

/// Parse a date such as `15/01/24` or `1/15/2024`.
///
/// Two-digit years pivot like chrono's `%y`: `00..=68` is 20xx, `69..=99` is 19xx.
pub fn parse_date(date_str: &str, format: DateFormat, order: DateOrder) -> Option<NaiveDate> {
    let parts: Vec<&str> = date_str.split(format.date_separator()).collect();
    let [a, b, y] = parts.as_slice() else {
        return None;
    };

    let a: u32 = a.parse().ok()?;
    let b: u32 = b.parse().ok()?;
    let year: i32 = match y.len() {
        2 => {
            let short: i32 = y.parse().ok()?;
            if short <= 68 { 2000 + short } else { 1900 + short }
        }
        4 => y.parse().ok()?,
        _ => return None,
    };

    let (day, month) = match order {
        DateOrder::DayFirst => (a, b),
        DateOrder::MonthFirst => (b, a),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a time such as `10:30`, `22:15:07`, `9:05 pm` or `9:05\u{202f}p.m.`.
pub fn parse_time(time_str: &str) -> Option<NaiveTime> {
    let normalized: String = time_str
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect::<String>()
        .to_uppercase();

    let formats: &[&str] = if normalized.ends_with('M') {
        &["%I:%M%p", "%I:%M:%S%p"]
    } else {
        &["%H:%M", "%H:%M:%S"]
    };

    formats
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(&normalized, f).ok())
}

/// Parse timestamp from date and time strings.
pub fn parse_timestamp(
    date_str: &str,
    time_str: &str,
    format: DateFormat,
    order: DateOrder,
) -> Option<NaiveDateTime> {
    let date = parse_date(date_str, format, order)?;
    let time = parse_time(time_str)?;
    Some(date.and_time(time))
}

/// Split the text after the prefix into sender and body.
///
/// Returns `None` for the sender when there is no `"sender: "` separator,
/// which marks a system notification.
pub fn split_sender(rest: &str) -> (Option<&str>, &str) {
    match rest.split_once(": ") {
        Some((sender, body)) if !sender.trim().is_empty() => (Some(sender.trim()), body),
        _ => (None, rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_detect_format_android_slash() {
        let lines = vec![
            "01/01/24, 10:00 - Alice: Hello there",
            "01/01/24, 10:05 - Bob: <Media omitted>",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::DashedSlash));
    }

    #[test]
    fn test_detect_format_android_dot() {
        let lines = vec![
            "26.10.2025, 20:40 - Alice: Hello",
            "26.10.2025, 20:41 - Bob: Hi there",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::DashedDot));
    }

    #[test]
    fn test_detect_format_ios() {
        let lines = vec![
            "[1/15/24, 10:30:45 AM] Alice: Hello",
            "\u{200e}[1/15/24, 10:31:00 AM] Bob: Hi there",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::BracketedSlash));
    }

    #[test]
    fn test_detect_format_ios_dot() {
        let lines = vec!["[15.01.24, 10:30:45] Alice: Hello"];
        assert_eq!(detect_format(&lines), Some(DateFormat::BracketedDot));
    }

    #[test]
    fn test_detect_format_variant_separators() {
        let lines = vec![
            "1/2/24 9:15 pm - Alice: Hi",
            "1/2/24,9:16\u{202f}pm - Bob: Hey",
        ];
        assert_eq!(detect_format(&lines), Some(DateFormat::DashedSlash));
    }

    #[test]
    fn test_detect_format_none() {
        let lines = vec!["just some text", "more text"];
        assert_eq!(detect_format(&lines), None);
    }

    #[test]
    fn test_detect_date_order() {
        let f = DateFormat::DashedSlash;
        assert_eq!(
            detect_date_order(["01/02/24", "25/02/24"], f, DateOrder::MonthFirst),
            DateOrder::DayFirst
        );
        assert_eq!(
            detect_date_order(["01/02/24", "1/15/24"], f, DateOrder::DayFirst),
            DateOrder::MonthFirst
        );
        assert_eq!(
            detect_date_order(["01/02/24"], f, DateOrder::MonthFirst),
            DateOrder::MonthFirst
        );
        assert_eq!(
            detect_date_order(["01.15.24"], DateFormat::DashedDot, DateOrder::MonthFirst),
            DateOrder::DayFirst
        );
    }

    #[test]
    fn test_parse_date_years() {
        let f = DateFormat::DashedSlash;
        assert_eq!(
            parse_date("01/02/24", f, DateOrder::DayFirst),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(
            parse_date("01/02/2024", f, DateOrder::MonthFirst),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(
            parse_date("31/12/99", f, DateOrder::DayFirst),
            NaiveDate::from_ymd_opt(1999, 12, 31)
        );
        assert_eq!(parse_date("31/02/24", f, DateOrder::DayFirst), None);
        assert_eq!(parse_date("1/2/123", f, DateOrder::DayFirst), None);
    }

    #[test]
    fn test_parse_time_variants() {
        assert_eq!(parse_time("10:00").unwrap().hour(), 10);
        assert_eq!(parse_time("22:15:07").unwrap().second(), 7);
        assert_eq!(parse_time("9:05 pm").unwrap().hour(), 21);
        assert_eq!(parse_time("9:05\u{202f}p.m.").unwrap().hour(), 21);
        assert_eq!(parse_time("12:30 AM").unwrap().hour(), 0);
        assert!(parse_time("25:00").is_none());
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp(
            "15.01.24",
            "10:30:45",
            DateFormat::BracketedDot,
            DateOrder::DayFirst,
        )
        .unwrap();
        assert_eq!(ts.to_string(), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_split_sender() {
        assert_eq!(split_sender("Alice: Hello"), (Some("Alice"), "Hello"));
        assert_eq!(
            split_sender("Alice: note: two colons"),
            (Some("Alice"), "note: two colons")
        );
        assert_eq!(
            split_sender("Alice added Bob"),
            (None, "Alice added Bob")
        );
        assert_eq!(split_sender(": no sender"), (None, ": no sender"));
    }

    #[test]
    fn test_prefix_captures() {
        let regex = DateFormat::DashedSlash.regex();
        let caps = regex.captures("01/01/24, 10:00 - Alice: Hello there").unwrap();
        assert_eq!(&caps[1], "01/01/24");
        assert_eq!(&caps[2], "10:00");
        assert_eq!(&caps[3], "Alice: Hello there");
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("\u{200e}[1/1/24, 1:00 AM] A: b\r"), "[1/1/24, 1:00 AM] A: b");
    }
}
