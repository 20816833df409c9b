//! Message, word, media and link counts.

use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;

use crate::Record;
use crate::analysis::UserFilter;
use crate::error::{ChatlensError, Result};

/// Matches `http://…`, `https://…` and bare `www.…` links.
pub const URL_PATTERN: &str = r"https?://\S+|www\.\S+";

/// Headline counts for a filtered record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Number of records.
    pub message_count: usize,
    /// Whitespace-separated words, media placeholders excluded.
    pub word_count: usize,
    /// Records whose body is the media placeholder.
    pub media_count: usize,
    /// URL matches across all bodies.
    pub link_count: usize,
}

/// Computes [`Stats`].
///
/// # Example
///
/// ```
/// use chatlens::analysis::UserFilter;
/// use chatlens::analysis::metrics::MetricsAnalyzer;
/// use chatlens::parser::{Parser, WhatsAppParser};
///
/// let parsed = WhatsAppParser::new().parse_str(
///     "01/01/24, 10:00 - Alice: Hello there\n01/01/24, 10:05 - Bob: <Media omitted>",
/// )?;
/// let stats = MetricsAnalyzer::new("<Media omitted>")?.stats(&UserFilter::Overall, &parsed.records);
///
/// assert_eq!(stats.message_count, 2);
/// assert_eq!(stats.word_count, 2);
/// assert_eq!(stats.media_count, 1);
/// assert_eq!(stats.link_count, 0);
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MetricsAnalyzer {
    media_placeholder: String,
    url_regex: Regex,
}

impl MetricsAnalyzer {
    /// Creates an analyzer for exports using `media_placeholder`.
    pub fn new(media_placeholder: impl Into<String>) -> Result<Self> {
        let url_regex = Regex::new(URL_PATTERN)
            .map_err(|e| ChatlensError::config(format!("invalid URL pattern: {e}")))?;
        Ok(Self {
            media_placeholder: media_placeholder.into(),
            url_regex,
        })
    }

    /// Counts messages, words, media and links for `filter`.
    pub fn stats(&self, filter: &UserFilter, records: &[Record]) -> Stats {
        let mut stats = Stats::default();

        for record in filter.apply(records) {
            stats.message_count += 1;
            if record.is_media(&self.media_placeholder) {
                stats.media_count += 1;
            } else {
                stats.word_count += record.message.split_whitespace().count();
            }
            stats.link_count += self.url_regex.find_iter(&record.message).count();
        }

        stats
    }

    /// Extracts every link in `text`.
    pub fn links<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.url_regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Distinct senders, sorted, system notifications excluded.
pub fn users(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.is_notification())
        .map(|r| r.user.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
