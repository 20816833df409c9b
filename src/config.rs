//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs without any CLI framework
//! dependencies. Every struct implements `Default` with the values the
//! dashboard uses, and can be loaded from JSON (missing fields fall back to
//! the defaults).
//!
//! - [`ParserConfig`] - WhatsApp export parsing
//! - [`TextConfig`] - tokenization, stopwords, word cloud
//! - [`ActivityConfig`] - heatmap threshold
//! - [`SentimentConfig`] - polarity thresholds and limits
//! - [`AnalysisConfig`] - all of the above plus the media placeholder
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, SentimentConfig, TextConfig};
//!
//! let config = AnalysisConfig::new()
//!     .with_text(TextConfig::new().with_top_words(10).with_extra_stopwords(["lol", "ok"]))
//!     .with_sentiment(SentimentConfig::new().with_thresholds(-0.1, 0.1));
//!
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};
use crate::record::MEDIA_OMITTED;

/// Configuration for WhatsApp export parsing.
///
/// The parser auto-detects the line format by analyzing the first
/// `sample_lines` non-empty lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Number of lines used for format detection (default: 20)
    pub sample_lines: usize,

    /// Read ambiguous slash dates as day/month (default: true)
    pub day_first: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            sample_lines: 20,
            day_first: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of lines used for format detection.
    #[must_use]
    pub fn with_sample_lines(mut self, lines: usize) -> Self {
        self.sample_lines = lines;
        self
    }

    /// Sets the fallback day/month order for ambiguous slash dates.
    #[must_use]
    pub fn with_day_first(mut self, day_first: bool) -> Self {
        self.day_first = day_first;
        self
    }
}

/// Configuration for word frequency and the word cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Rows in the most-common-words table (default: 20)
    pub top_words: usize,

    /// Words drawn in the word cloud (default: 100)
    pub cloud_max_words: usize,

    /// Minimum surviving tokens needed for a word cloud (default: 1)
    pub min_cloud_words: usize,

    /// Start from the bundled English stopword list (default: true)
    pub default_stopwords: bool,

    /// Extra stopwords, matched case-insensitively
    pub extra_stopwords: Vec<String>,

    /// File with one stopword per line
    pub stopwords_file: Option<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            top_words: 20,
            cloud_max_words: 100,
            min_cloud_words: 1,
            default_stopwords: true,
            extra_stopwords: Vec::new(),
            stopwords_file: None,
        }
    }
}

impl TextConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the most-common-words table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets how many words the word cloud draws.
    #[must_use]
    pub fn with_cloud_max_words(mut self, n: usize) -> Self {
        self.cloud_max_words = n;
        self
    }

    /// Sets the minimum token count for a word cloud.
    #[must_use]
    pub fn with_min_cloud_words(mut self, n: usize) -> Self {
        self.min_cloud_words = n;
        self
    }

    /// Enables or disables the bundled English stopwords.
    #[must_use]
    pub fn with_default_stopwords(mut self, enabled: bool) -> Self {
        self.default_stopwords = enabled;
        self
    }

    /// Adds extra stopwords.
    #[must_use]
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Loads additional stopwords from a file.
    #[must_use]
    pub fn with_stopwords_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_file = Some(path.into());
        self
    }
}

/// Configuration for the activity heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Fewer filtered records than this yields no heatmap (default: 1)
    pub heatmap_min_records: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            heatmap_min_records: 1,
        }
    }
}

impl ActivityConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum record count for a heatmap.
    #[must_use]
    pub fn with_heatmap_min_records(mut self, n: usize) -> Self {
        self.heatmap_min_records = n;
        self
    }
}

/// Configuration for sentiment scoring.
///
/// A message is positive when its polarity is strictly above
/// `positive_threshold`, negative when strictly below `negative_threshold`,
/// neutral otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// Lower bound for "positive" (default: 0.05)
    pub positive_threshold: f64,

    /// Upper bound for "negative" (default: -0.05)
    pub negative_threshold: f64,

    /// Number of concerning messages returned (default: 10)
    pub concerning_limit: usize,

    /// Keywords kept per category (default: 10)
    pub keyword_limit: usize,

    /// Extra lexicon entries, `word<TAB>valence` per line
    pub lexicon_file: Option<PathBuf>,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 0.05,
            negative_threshold: -0.05,
            concerning_limit: 10,
            keyword_limit: 10,
            lexicon_file: None,
        }
    }
}

impl SentimentConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both category thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, negative: f64, positive: f64) -> Self {
        self.negative_threshold = negative;
        self.positive_threshold = positive;
        self
    }

    /// Sets the number of concerning messages returned.
    #[must_use]
    pub fn with_concerning_limit(mut self, limit: usize) -> Self {
        self.concerning_limit = limit;
        self
    }

    /// Sets the number of keywords kept per category.
    #[must_use]
    pub fn with_keyword_limit(mut self, limit: usize) -> Self {
        self.keyword_limit = limit;
        self
    }

    /// Extends the built-in lexicon from a file.
    #[must_use]
    pub fn with_lexicon_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon_file = Some(path.into());
        self
    }
}

/// Complete configuration for a [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Body WhatsApp writes for omitted attachments (default: `<Media omitted>`)
    pub media_placeholder: String,

    /// Parser settings
    pub parser: ParserConfig,

    /// Word frequency and word cloud settings
    pub text: TextConfig,

    /// Heatmap settings
    pub activity: ActivityConfig,

    /// Sentiment settings
    pub sentiment: SentimentConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            media_placeholder: MEDIA_OMITTED.to_string(),
            parser: ParserConfig::default(),
            text: TextConfig::default(),
            activity: ActivityConfig::default(),
            sentiment: SentimentConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the media placeholder.
    #[must_use]
    pub fn with_media_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.media_placeholder = placeholder.into();
        self
    }

    /// Replaces the parser settings.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Replaces the text settings.
    #[must_use]
    pub fn with_text(mut self, text: TextConfig) -> Self {
        self.text = text;
        self
    }

    /// Replaces the activity settings.
    #[must_use]
    pub fn with_activity(mut self, activity: ActivityConfig) -> Self {
        self.activity = activity;
        self
    }

    /// Replaces the sentiment settings.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: SentimentConfig) -> Self {
        self.sentiment = sentiment;
        self
    }

    /// Loads a configuration from a JSON file.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChatlensError::config_file(e.to_string(), path))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ChatlensError::config_file(e.to_string(), path))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that would make an analysis meaningless.
    ///
    /// Referenced files are checked when the analyzers are built.
    pub fn validate(&self) -> Result<()> {
        if self.media_placeholder.trim().is_empty() {
            return Err(ChatlensError::config("media placeholder must not be empty"));
        }
        if self.parser.sample_lines == 0 {
            return Err(ChatlensError::config("sample_lines must be at least 1"));
        }
        let s = &self.sentiment;
        if !s.positive_threshold.is_finite() || !s.negative_threshold.is_finite() {
            return Err(ChatlensError::config("sentiment thresholds must be finite"));
        }
        if s.negative_threshold > s.positive_threshold {
            return Err(ChatlensError::config(format!(
                "negative threshold {} is above positive threshold {}",
                s.negative_threshold, s.positive_threshold
            )));
        }
        if !(-1.0..=1.0).contains(&s.negative_threshold)
            || !(-1.0..=1.0).contains(&s.positive_threshold)
        {
            return Err(ChatlensError::config(
                "sentiment thresholds must lie within [-1, 1]",
            ));
        }
        Ok(())
    }
}
