//! Chat export parsing.
//!
//! [`WhatsAppParser`] turns a WhatsApp TXT export into an ordered record set.
//! Parsing never aborts on a single bad line: malformed lines are skipped and
//! listed in the [`ParseReport`].
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::{Parser, WhatsAppParser};
//!
//! let export = "01/01/24, 10:00 - Alice: Hello there\n\
//!               01/01/24, 10:05 - Bob: <Media omitted>\n\
//!               01/01/24, 10:06 - Alice added Carol";
//!
//! let parsed = WhatsAppParser::new().parse_str(export)?;
//! assert_eq!(parsed.records.len(), 3);
//! assert!(parsed.records[2].is_notification());
//! assert!(parsed.report.is_clean());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::Record;
use crate::config::ParserConfig;
use crate::error::{ChatlensError, ParseErrorKind};
use crate::parsing::whatsapp::{
    DateFormat, DateOrder, clean_line, detect_date_order, detect_format, parse_timestamp,
    split_sender,
};

/// Common interface of chat export parsers.
pub trait Parser {
    /// Human-readable parser name.
    fn name(&self) -> &'static str;

    /// Parses an export file. The file must be UTF-8.
    fn parse(&self, path: &Path) -> Result<ParsedExport, ChatlensError> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parses export content held in memory.
    fn parse_str(&self, content: &str) -> Result<ParsedExport, ChatlensError>;
}

/// A line the parser dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the export.
    pub line: usize,
    /// Why the line was dropped.
    pub reason: ParseErrorKind,
}

impl SkippedLine {
    /// Converts the skip into the error it stands for.
    pub fn to_error(&self) -> ChatlensError {
        ChatlensError::whatsapp_parse(self.reason.clone(), self.line)
    }
}

/// Lines skipped while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Skipped lines in file order.
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Returns `true` if no line was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, line: usize, reason: ParseErrorKind) {
        debug!(line, %reason, "skipping line");
        self.skipped.push(SkippedLine { line, reason });
    }
}

/// Result of parsing one export.
#[derive(Debug, Clone, Default)]
pub struct ParsedExport {
    /// Records in file order; timestamps are non-decreasing.
    pub records: Vec<Record>,
    /// Skipped lines.
    pub report: ParseReport,
    /// Detected line format, `None` for an empty export.
    pub format: Option<DateFormat>,
}

/// Parser for WhatsApp TXT exports.
///
/// The line format is auto-detected from the first
/// [`sample_lines`](ParserConfig::sample_lines) non-empty lines.
#[derive(Debug, Clone, Default)]
pub struct WhatsAppParser {
    config: ParserConfig,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn parse_content(&self, content: &str) -> Result<ParsedExport, ChatlensError> {
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, clean_line(line)))
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return Ok(ParsedExport::default());
        }

        // Step 1: Auto-detect format from the first lines
        let sample: Vec<&str> = lines
            .iter()
            .take(self.config.sample_lines)
            .map(|(_, line)| *line)
            .collect();
        let format = detect_format(&sample).ok_or_else(|| {
            ChatlensError::invalid_format(
                "WhatsApp",
                "Could not detect WhatsApp export format. \
                 Make sure the file is a valid WhatsApp chat export.",
            )
        })?;
        let regex = format.regex();

        // Step 2: Resolve day/month order from every prefixed line
        let fallback = if self.config.day_first {
            DateOrder::DayFirst
        } else {
            DateOrder::MonthFirst
        };
        let order = detect_date_order(
            lines
                .iter()
                .filter_map(|(_, line)| regex.captures(line))
                .filter_map(|caps| caps.get(1).map(|m| m.as_str())),
            format,
            fallback,
        );
        debug!(?format, ?order, lines = lines.len(), "detected WhatsApp format");

        // Step 3: Parse all lines
        let mut records: Vec<Record> = Vec::new();
        let mut report = ParseReport::default();
        // False after a dropped message, so its continuation lines are dropped too
        let mut accepting = false;

        for &(number, line) in &lines {
            let Some(caps) = regex.captures(line) else {
                match records.last_mut() {
                    Some(last) if accepting => last.push_line(line),
                    _ => report.skip(number, ParseErrorKind::Orphan),
                }
                continue;
            };

            let date_str = caps.get(1).map_or("", |m| m.as_str());
            let time_str = caps.get(2).map_or("", |m| m.as_str());
            let rest = caps.get(3).map_or("", |m| m.as_str());

            let Some(timestamp) = parse_timestamp(date_str, time_str, format, order) else {
                report.skip(number, ParseErrorKind::Date(format!("{date_str}, {time_str}")));
                accepting = false;
                continue;
            };

            if records.last().is_some_and(|last| timestamp < last.timestamp) {
                report.skip(number, ParseErrorKind::OutOfOrder(timestamp.to_string()));
                accepting = false;
                continue;
            }

            let record = match split_sender(rest) {
                (Some(sender), body) => Record::new(timestamp, sender, body),
                (None, body) => Record::notification(timestamp, body),
            };
            records.push(record);
            accepting = true;
        }

        if !report.is_clean() {
            warn!(
                skipped = report.skipped.len(),
                parsed = records.len(),
                "some lines of the export could not be parsed"
            );
        }

        Ok(ParsedExport {
            records,
            report,
            format: Some(format),
        })
    }
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn parse_str(&self, content: &str) -> Result<ParsedExport, ChatlensError> {
        self.parse_content(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(content: &str) -> ParsedExport {
        WhatsAppParser::new().parse_str(content).unwrap()
    }

    #[test]
    fn test_parser_name() {
        assert_eq!(WhatsAppParser::new().name(), "WhatsApp");
    }

    #[test]
    fn test_basic_android_export() {
        let parsed = parse(
            "01/01/24, 10:00 - Alice: Hello there\n\
             01/01/24, 10:05 - Bob: <Media omitted>",
        );
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].user, "Alice");
        assert_eq!(parsed.records[0].message, "Hello there");
        assert_eq!(parsed.records[1].user, "Bob");
        assert_eq!(
            parsed.records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(parsed.format, Some(DateFormat::DashedSlash));
    }

    #[test]
    fn test_multiline_message() {
        let parsed = parse(
            "01/01/24, 10:00 - Alice: first line\n\
             second line\n\
             third line\n\
             01/01/24, 10:01 - Bob: ok",
        );
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].message, "first line\nsecond line\nthird line");
    }

    #[test]
    fn test_system_notification() {
        let parsed = parse(
            "01/01/24, 09:59 - Messages and calls are end-to-end encrypted.\n\
             01/01/24, 10:00 - Alice: hi",
        );
        assert!(parsed.records[0].is_notification());
        assert_eq!(parsed.records[0].user, "group_notification");
        assert!(!parsed.records[1].is_notification());
    }

    #[test]
    fn test_malformed_date_is_skipped() {
        let parsed = parse(
            "01/01/24, 10:00 - Alice: hi\n\
             45/13/24, 10:01 - Bob: broken date\n\
             continuation of the broken one\n\
             02/01/24, 10:02 - Bob: fine",
        );
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].message, "hi");
        assert_eq!(parsed.report.skipped.len(), 2);
        assert!(matches!(
            parsed.report.skipped[0].reason,
            ParseErrorKind::Date(_)
        ));
        assert_eq!(parsed.report.skipped[0].line, 2);
        assert_eq!(parsed.report.skipped[1].reason, ParseErrorKind::Orphan);
        assert!(parsed.report.skipped[0].to_error().is_parse());
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let parsed = parse(
            "02/01/24, 10:00 - Alice: later\n\
             01/01/24, 10:00 - Bob: earlier\n\
             02/01/24, 10:00 - Bob: same time is fine",
        );
        assert_eq!(parsed.records.len(), 2);
        assert!(matches!(
            parsed.report.skipped[0].reason,
            ParseErrorKind::OutOfOrder(_)
        ));
        assert!(parsed
            .records
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_leading_orphan_line() {
        let parsed = parse("header junk\n01/01/24, 10:00 - Alice: hi");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.report.skipped[0].line, 1);
    }

    #[test]
    fn test_month_first_detected() {
        let parsed = parse(
            "1/15/24, 9:00 AM - Alice: hi\n\
             1/16/24, 9:30 PM - Bob: hey",
        );
        assert_eq!(
            parsed.records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(parsed.records[1].hour, 21);
    }

    #[test]
    fn test_ios_export() {
        let parsed = parse(
            "[15.01.24, 10:30:45] Alice: Привет\n\
             \u{200e}[15.01.24, 10:31:00] Bob: Hi",
        );
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].user, "Bob");
        assert_eq!(parsed.format, Some(DateFormat::BracketedDot));
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse("");
        assert!(parsed.records.is_empty());
        assert!(parsed.format.is_none());

        let parsed = parse("\n\n   \n");
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn test_unrecognized_format() {
        let err = WhatsAppParser::new()
            .parse_str("this is not\na chat export")
            .unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("01/01/24, 10:00 - Alice: hi\r\n01/01/24, 10:01 - Bob: yo\r\n");
        assert_eq!(parsed.records[0].message, "hi");
        assert_eq!(parsed.records[1].message, "yo");
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.txt");
        std::fs::write(&path, "01/01/24, 10:00 - Alice: hi").unwrap();
        let parsed = WhatsAppParser::new().parse(&path).unwrap();
        assert_eq!(parsed.records.len(), 1);

        let missing = WhatsAppParser::new().parse(&dir.path().join("missing.txt"));
        assert!(missing.unwrap_err().is_io());
    }
}
