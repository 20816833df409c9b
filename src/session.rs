//! Analysis context for one uploaded export.
//!
//! A [`Session`] is created from an upload (or a file on disk), owns the
//! parsed record set together with analyzers built from an
//! [`AnalysisConfig`], and recomputes the [`Dashboard`] for whichever
//! [`UserFilter`] is selected. Uploading another export means creating a new
//! session; sessions share nothing.
//!
//! # Example
//!
//! ```rust
//! use chatlens::Session;
//! use chatlens::analysis::UserFilter;
//! use chatlens::config::AnalysisConfig;
//!
//! let export = "01/01/24, 10:00 - Alice: Hello there\n\
//!               01/01/24, 10:05 - Bob: <Media omitted>";
//! let session = Session::from_upload("chat.txt", export.as_bytes().to_vec(), AnalysisConfig::default())?;
//!
//! assert_eq!(session.users(), ["Alice", "Bob"]);
//! let dashboard = session.dashboard(&UserFilter::Overall)?;
//! assert_eq!(dashboard.stats.message_count, 2);
//! assert_eq!(dashboard.stats.media_count, 1);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::Record;
use crate::analysis::filter::OVERALL;
use crate::analysis::metrics::{self, MetricsAnalyzer, Stats};
use crate::analysis::sentiment::{SentimentAnalysis, SentimentAnalyzer};
use crate::analysis::text::{EmojiCount, TextAnalyzer, WordCloud, WordCount};
use crate::analysis::timeline::{
    self, DailyPoint, Heatmap, MonthlyPoint, NameCount, activity_heatmap,
};
use crate::analysis::{Outcome, UserFilter};
use crate::config::AnalysisConfig;
use crate::error::{ChatlensError, Result};
use crate::parser::{ParseReport, ParsedExport, Parser, WhatsAppParser};
use crate::parsing::WhatsAppDateFormat;

/// Records shown in the file review.
pub const PREVIEW_LEN: usize = 5;

/// Name and size of the uploaded export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// File name as uploaded.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl FileInfo {
    /// Size in kilobytes.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Overview shown right after upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReview<'a> {
    /// File name of the export.
    pub name: &'a str,
    /// Size in kilobytes.
    pub size_kb: f64,
    /// Parsed records.
    pub total_messages: usize,
    /// Lines the parser dropped.
    pub skipped_lines: usize,
    /// The first records of the export.
    pub preview: &'a [Record],
}

/// Every table computed for one filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard<'a> {
    /// Filter the tables were computed for.
    pub filter: UserFilter,
    /// Unfiltered counts, for the file summary.
    pub overall: Stats,
    /// Counts for the filter.
    pub stats: Stats,
    /// Messages per month.
    pub monthly: Vec<MonthlyPoint>,
    /// Messages per day.
    pub daily: Vec<DailyPoint>,
    /// Weekdays by message count.
    pub busiest_days: Vec<NameCount>,
    /// Months by message count.
    pub busiest_months: Vec<NameCount>,
    /// Weekday × hour activity.
    pub heatmap: Outcome<Heatmap>,
    /// Word cloud data.
    pub word_cloud: Outcome<WordCloud>,
    /// Most common words.
    pub common_words: Vec<WordCount>,
    /// Emoji by frequency.
    pub emojis: Vec<EmojiCount>,
    /// Emoji in message order; only for a specific user.
    pub emoji_sequence: Option<Vec<String>>,
    /// Sentiment view.
    pub sentiment: Outcome<SentimentAnalysis<'a>>,
}

/// Parsed export plus the analyzers configured for it.
#[derive(Debug)]
pub struct Session {
    info: FileInfo,
    config: AnalysisConfig,
    parsed: ParsedExport,
    users: Vec<String>,
    metrics: MetricsAnalyzer,
    text: TextAnalyzer,
    sentiment: SentimentAnalyzer,
}

impl Session {
    /// Creates a session from uploaded bytes.
    ///
    /// # Errors
    ///
    /// - [`ChatlensError::Utf8`] if the bytes are not UTF-8
    /// - [`ChatlensError::Config`] if the configuration is unusable
    /// - [`ChatlensError::InvalidFormat`] if no line looks like a WhatsApp message
    pub fn from_upload(
        name: impl Into<String>,
        bytes: Vec<u8>,
        config: AnalysisConfig,
    ) -> Result<Self> {
        let size_bytes = bytes.len() as u64;
        let content = String::from_utf8(bytes)?;
        Self::build(
            FileInfo {
                name: name.into(),
                size_bytes,
            },
            &content,
            config,
        )
    }

    /// Creates a session from export text already in memory.
    pub fn from_text(name: impl Into<String>, content: &str, config: AnalysisConfig) -> Result<Self> {
        Self::build(
            FileInfo {
                name: name.into(),
                size_bytes: content.len() as u64,
            },
            content,
            config,
        )
    }

    /// Reads an export from disk.
    pub fn open(path: impl AsRef<Path>, config: AnalysisConfig) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_upload(name, bytes, config)
    }

    fn build(info: FileInfo, content: &str, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let metrics = MetricsAnalyzer::new(config.media_placeholder.as_str())?;
        let text = TextAnalyzer::new(&config.text, config.media_placeholder.as_str())?;
        let sentiment = SentimentAnalyzer::new(&config.sentiment, config.media_placeholder.as_str())?;

        let parsed = WhatsAppParser::with_config(config.parser.clone()).parse_str(content)?;
        let users = metrics::users(&parsed.records);

        info!(
            file = %info.name,
            records = parsed.records.len(),
            users = users.len(),
            skipped = parsed.report.skipped.len(),
            "session created"
        );

        Ok(Self {
            info,
            config,
            parsed,
            users,
            metrics,
            text,
            sentiment,
        })
    }

    /// Name and size of the export.
    pub fn info(&self) -> &FileInfo {
        &self.info
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parsed records, in export order.
    pub fn records(&self) -> &[Record] {
        &self.parsed.records
    }

    /// Lines the parser skipped.
    pub fn report(&self) -> &ParseReport {
        &self.parsed.report
    }

    /// Detected line format, `None` for an empty export.
    pub fn format(&self) -> Option<WhatsAppDateFormat> {
        self.parsed.format
    }

    /// Distinct senders, sorted, notifications excluded.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Filter choices: `"Overall"` followed by every user.
    pub fn filter_options(&self) -> Vec<String> {
        std::iter::once(OVERALL.to_string())
            .chain(self.users.iter().cloned())
            .collect()
    }

    /// File name, size, message count and the first records.
    pub fn file_review(&self) -> FileReview<'_> {
        let records = self.records();
        FileReview {
            name: &self.info.name,
            size_kb: self.info.size_kb(),
            total_messages: records.len(),
            skipped_lines: self.parsed.report.skipped.len(),
            preview: &records[..records.len().min(PREVIEW_LEN)],
        }
    }

    /// Message statistics for `filter`.
    pub fn stats(&self, filter: &UserFilter) -> Stats {
        self.metrics.stats(filter, self.records())
    }

    /// Computes every dashboard table for `filter`.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::UnknownUser`] if the filter names a user who never
    /// wrote in this export.
    pub fn dashboard(&self, filter: &UserFilter) -> Result<Dashboard<'_>> {
        if let Some(name) = filter.user_name() {
            if !self.users.iter().any(|u| u == name) {
                return Err(ChatlensError::unknown_user(name));
            }
        }
        debug!(%filter, "computing dashboard");

        let records = self.records();
        let emoji_sequence = (!filter.is_overall()).then(|| self.text.emoji_sequence(filter, records));

        Ok(Dashboard {
            filter: filter.clone(),
            overall: self.metrics.stats(&UserFilter::Overall, records),
            stats: self.metrics.stats(filter, records),
            monthly: timeline::monthly_timeline(filter, records),
            daily: timeline::daily_timeline(filter, records),
            busiest_days: timeline::week_activity(filter, records),
            busiest_months: timeline::month_activity(filter, records),
            heatmap: activity_heatmap(filter, records, self.config.activity.heatmap_min_records),
            word_cloud: self.text.word_cloud(filter, records),
            common_words: self.text.most_common_words(filter, records),
            emojis: self.text.emoji_frequency(filter, records),
            emoji_sequence,
            sentiment: self
                .sentiment
                .analyze(filter, records, self.text.tokenizer()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
12/03/24, 09:00 - Alice created group \"Trip\"
12/03/24, 09:01 - Alice: Hello everyone 😍
12/03/24, 09:05 - Bob: <Media omitted>
12/03/24, 09:06 - Bob: I love this plan
but the hotel is terrible
13/03/24, 21:15 - Alice: check https://example.com 👍
14/03/24, 08:00 - Carol: ok";

    fn session() -> Session {
        Session::from_text("chat.txt", EXPORT, AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_users_and_filter_options() {
        let s = session();
        assert_eq!(s.users(), ["Alice", "Bob", "Carol"]);
        assert_eq!(s.filter_options()[0], "Overall");
        assert_eq!(s.filter_options().len(), 4);
    }

    #[test]
    fn test_file_review() {
        let s = session();
        let review = s.file_review();
        assert_eq!(review.name, "chat.txt");
        assert_eq!(review.total_messages, 6);
        assert_eq!(review.skipped_lines, 0);
        assert_eq!(review.preview.len(), PREVIEW_LEN);
        assert!((review.size_kb - EXPORT.len() as f64 / 1024.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_dashboard() {
        let s = session();
        let d = s.dashboard(&UserFilter::Overall).unwrap();
        assert_eq!(d.stats.message_count, 6);
        assert_eq!(d.stats.media_count, 1);
        assert_eq!(d.stats.link_count, 1);
        assert_eq!(d.overall, d.stats);
        assert_eq!(d.daily.len(), 3);
        assert!(d.heatmap.is_ready());
        assert!(d.word_cloud.is_ready());
        assert!(d.emoji_sequence.is_none());
        assert_eq!(d.emojis.len(), 2);

        let sentiment = d.sentiment.ready().unwrap();
        // notification and media are not scored
        assert_eq!(sentiment.summary.total, 4);
    }

    #[test]
    fn test_user_dashboard() {
        let s = session();
        let d = s.dashboard(&UserFilter::user("Alice")).unwrap();
        assert_eq!(d.stats.message_count, 2);
        assert_eq!(d.overall.message_count, 6);
        assert_eq!(
            d.emoji_sequence,
            Some(vec!["😍".to_string(), "👍".to_string()])
        );
    }

    #[test]
    fn test_unknown_user() {
        let s = session();
        let err = s.dashboard(&UserFilter::user("Mallory")).unwrap_err();
        assert!(matches!(err, ChatlensError::UnknownUser(name) if name == "Mallory"));
    }

    #[test]
    fn test_invalid_utf8_upload() {
        let err = Session::from_upload("bad.txt", vec![0xff, 0xfe, 0x00], AnalysisConfig::default())
            .unwrap_err();
        assert!(matches!(err, ChatlensError::Utf8 { .. }));
    }

    #[test]
    fn test_bad_config_is_fatal() {
        let config = AnalysisConfig::default().with_media_placeholder("");
        assert!(Session::from_text("chat.txt", EXPORT, config).unwrap_err().is_config());
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("WhatsApp Chat.txt");
        fs::write(&path, EXPORT).unwrap();
        let s = Session::open(&path, AnalysisConfig::default()).unwrap();
        assert_eq!(s.info().name, "WhatsApp Chat.txt");
        assert_eq!(s.info().size_bytes, EXPORT.len() as u64);
        assert_eq!(s.records().len(), 6);
    }

    #[test]
    fn test_empty_export() {
        let s = Session::from_text("empty.txt", "", AnalysisConfig::default()).unwrap();
        assert!(s.users().is_empty());
        let d = s.dashboard(&UserFilter::Overall).unwrap();
        assert_eq!(d.stats.message_count, 0);
        assert!(d.heatmap.is_insufficient());
        assert!(d.word_cloud.is_insufficient());
        assert!(d.sentiment.is_insufficient());
        assert!(s.format().is_none());
    }
}
