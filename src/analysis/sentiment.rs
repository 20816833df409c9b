//! Per-message polarity and its aggregates.
//!
//! Scoring borrows the session's records: a [`SentimentRecord`] lives only as
//! long as the analysis request that produced it.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::Record;
use crate::analysis::lexicon::{LexiconScorer, PolarityScorer};
use crate::analysis::text::{Tokenizer, WordCount};
use crate::analysis::{Outcome, UserFilter};
use crate::config::SentimentConfig;
use crate::error::Result;

/// Polarity bucket of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Neutral => "neutral",
        })
    }
}

/// A scored message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentRecord<'a> {
    /// The scored record.
    pub record: &'a Record,
    /// Polarity in `[-1, 1]`.
    pub polarity: f64,
    /// Bucket derived from the configured thresholds.
    pub category: Category,
}

/// Category counts and mean polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentSummary {
    /// Messages above the positive threshold.
    pub positive: usize,
    /// Messages below the negative threshold.
    pub negative: usize,
    /// Messages between the thresholds.
    pub neutral: usize,
    /// Scored messages.
    pub total: usize,
    /// Mean polarity, `0.0` when nothing was scored.
    pub avg_polarity: f64,
}

/// Most frequent words per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Keywords {
    /// Words of positive messages.
    pub positive: Vec<WordCount>,
    /// Words of negative messages.
    pub negative: Vec<WordCount>,
    /// Words of neutral messages.
    pub neutral: Vec<WordCount>,
}

/// Mean polarity of one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPolarity {
    /// Calendar date.
    pub date: NaiveDate,
    /// Mean polarity of the day's messages.
    pub avg_polarity: f64,
    /// Messages scored that day.
    pub messages: usize,
}

/// Everything the dashboard shows about sentiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAnalysis<'a> {
    /// Category counts and mean polarity.
    pub summary: SentimentSummary,
    /// Most negative messages, most negative first.
    pub concerning: Vec<SentimentRecord<'a>>,
    /// Top words per category.
    pub keywords: Keywords,
    /// Daily mean polarity, chronologically.
    pub timeline: Outcome<Vec<DailyPolarity>>,
    /// Every scored message, in export order.
    pub records: Vec<SentimentRecord<'a>>,
}

/// Scores messages and builds [`SentimentAnalysis`].
pub struct SentimentAnalyzer {
    scorer: Box<dyn PolarityScorer>,
    config: SentimentConfig,
    media_placeholder: String,
}

impl fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("config", &self.config)
            .field("media_placeholder", &self.media_placeholder)
            .finish_non_exhaustive()
    }
}

impl SentimentAnalyzer {
    /// Builds an analyzer backed by [`LexiconScorer`], extended with
    /// [`lexicon_file`](SentimentConfig::lexicon_file) when set.
    pub fn new(config: &SentimentConfig, media_placeholder: impl Into<String>) -> Result<Self> {
        let mut scorer = LexiconScorer::new()?;
        if let Some(path) = &config.lexicon_file {
            let added = scorer.extend_from_file(path)?;
            debug!(added, path = %path.display(), "lexicon extended");
        }
        Ok(Self {
            scorer: Box::new(scorer),
            config: config.clone(),
            media_placeholder: media_placeholder.into(),
        })
    }

    /// Replaces the polarity scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: impl PolarityScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Buckets a polarity using the configured thresholds.
    pub fn categorize(&self, polarity: f64) -> Category {
        if polarity > self.config.positive_threshold {
            Category::Positive
        } else if polarity < self.config.negative_threshold {
            Category::Negative
        } else {
            Category::Neutral
        }
    }

    /// Scores every eligible record of `filter`.
    ///
    /// System notifications and media placeholders are skipped.
    pub fn score<'a>(&self, filter: &UserFilter, records: &'a [Record]) -> Vec<SentimentRecord<'a>> {
        filter
            .apply(records)
            .filter(|r| !r.is_notification() && !r.is_media(&self.media_placeholder))
            .map(|record| {
                let raw = self.scorer.polarity(&record.message);
                let polarity = if raw.is_finite() {
                    raw.clamp(-1.0, 1.0)
                } else {
                    0.0
                };
                SentimentRecord {
                    record,
                    polarity,
                    category: self.categorize(polarity),
                }
            })
            .collect()
    }

    /// Full sentiment view for `filter`.
    ///
    /// Returns [`Outcome::InsufficientData`] when no message is eligible.
    pub fn analyze<'a>(
        &self,
        filter: &UserFilter,
        records: &'a [Record],
        tokenizer: &Tokenizer,
    ) -> Outcome<SentimentAnalysis<'a>> {
        let scored = self.score(filter, records);
        if scored.is_empty() {
            return Outcome::insufficient("no text messages to score");
        }

        Outcome::Ready(SentimentAnalysis {
            summary: summarize(&scored),
            concerning: concerning_messages(&scored, self.config.concerning_limit),
            keywords: keyword_analysis(&scored, tokenizer, self.config.keyword_limit),
            timeline: sentiment_timeline(&scored),
            records: scored,
        })
    }
}

/// Counts per category and mean polarity.
pub fn summarize(scored: &[SentimentRecord<'_>]) -> SentimentSummary {
    let mut summary = SentimentSummary::default();
    let mut sum = 0.0;

    for s in scored {
        match s.category {
            Category::Positive => summary.positive += 1,
            Category::Negative => summary.negative += 1,
            Category::Neutral => summary.neutral += 1,
        }
        sum += s.polarity;
    }

    summary.total = scored.len();
    if summary.total > 0 {
        summary.avg_polarity = sum / summary.total as f64;
    }
    summary
}

/// The `limit` most negative messages among those categorized negative.
///
/// Equal polarities keep export order.
pub fn concerning_messages<'a>(
    scored: &[SentimentRecord<'a>],
    limit: usize,
) -> Vec<SentimentRecord<'a>> {
    let mut negative: Vec<_> = scored
        .iter()
        .filter(|s| s.category == Category::Negative)
        .copied()
        .collect();
    negative.sort_by(|a, b| a.polarity.total_cmp(&b.polarity));
    negative.truncate(limit);
    negative
}

/// Top `limit` words of each category.
pub fn keyword_analysis(
    scored: &[SentimentRecord<'_>],
    tokenizer: &Tokenizer,
    limit: usize,
) -> Keywords {
    let top = |category: Category| {
        tokenizer.top_words(
            scored
                .iter()
                .filter(|s| s.category == category)
                .map(|s| s.record.message.as_str()),
            limit,
        )
    };

    Keywords {
        positive: top(Category::Positive),
        negative: top(Category::Negative),
        neutral: top(Category::Neutral),
    }
}

/// Mean polarity per day, chronologically.
///
/// Returns [`Outcome::InsufficientData`] for fewer than two distinct days.
pub fn sentiment_timeline(scored: &[SentimentRecord<'_>]) -> Outcome<Vec<DailyPolarity>> {
    let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for s in scored {
        let entry = days.entry(s.record.date).or_default();
        entry.0 += s.polarity;
        entry.1 += 1;
    }

    if days.len() < 2 {
        return Outcome::insufficient(format!(
            "messages on {} day(s), at least 2 needed for a sentiment timeline",
            days.len()
        ));
    }

    Outcome::Ready(
        days.into_iter()
            .map(|(date, (sum, messages))| DailyPolarity {
                date,
                avg_polarity: sum / messages as f64,
                messages,
            })
            .collect(),
    )
}
