//! Word and emoji frequency, word cloud.
//!
//! System notifications never contribute, and media placeholders are left out
//! of every word table.

use std::collections::HashSet;
use std::fs;

use regex::Regex;
use serde::Serialize;
use stop_words::{LANGUAGE, get};
use tracing::debug;

use crate::Record;
use crate::analysis::{Outcome, UserFilter, frequency};
use crate::config::TextConfig;
use crate::error::{ChatlensError, Result};

/// Characters counted as emoji.
pub const EMOJI_PATTERN: &str = r"[\p{Extended_Pictographic}\p{Emoji_Modifier}]";

const WORD_PATTERN: &str = r"\w+";

/// One row of a word-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// Lowercased token.
    pub word: String,
    /// Occurrences.
    pub count: usize,
}

/// One row of the emoji table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    /// The emoji character.
    pub emoji: String,
    /// Occurrences.
    pub count: usize,
}

/// Words removed before counting.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Builds the stopword set described by `config`.
    pub fn from_config(config: &TextConfig) -> Result<Self> {
        let mut words: HashSet<String> = HashSet::new();

        if config.default_stopwords {
            words.extend(get(LANGUAGE::English).iter().map(ToString::to_string));
        }
        words.extend(config.extra_stopwords.iter().map(|w| w.trim().to_lowercase()));

        if let Some(path) = &config.stopwords_file {
            let content = fs::read_to_string(path).map_err(|e| {
                ChatlensError::config_file(format!("cannot read stopwords: {e}"), path)
            })?;
            words.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_lowercase),
            );
        }

        debug!(count = words.len(), "stopwords loaded");
        Ok(Self { words })
    }

    /// Builds a set from explicit words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns `true` if `word` (lowercase) is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercases text and splits it into non-stopword tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_regex: Regex,
    stopwords: Stopwords,
}

impl Tokenizer {
    /// Creates a tokenizer dropping `stopwords`.
    pub fn new(stopwords: Stopwords) -> Result<Self> {
        let word_regex = Regex::new(WORD_PATTERN)
            .map_err(|e| ChatlensError::config(format!("invalid word pattern: {e}")))?;
        Ok(Self {
            word_regex,
            stopwords,
        })
    }

    /// Tokens of `text`, in order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.word_regex
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !self.stopwords.contains(w))
            .map(str::to_string)
            .collect()
    }

    /// The `n` most frequent tokens across `messages`.
    pub fn top_words<'a>(&self, messages: impl IntoIterator<Item = &'a str>, n: usize) -> Vec<WordCount> {
        let tokens = messages.into_iter().flat_map(|m| self.tokenize(m));
        frequency(tokens)
            .into_iter()
            .take(n)
            .map(|(word, count)| WordCount { word, count })
            .collect()
    }

    /// The stopwords this tokenizer drops.
    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }
}

/// A word placed in the cloud.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudWord {
    /// The word.
    pub word: String,
    /// Occurrences.
    pub count: usize,
    /// `count / max count`, in `(0, 1]`.
    pub weight: f64,
}

/// Word cloud data, renderable as SVG.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloud {
    /// Words, most frequent first.
    pub words: Vec<CloudWord>,
    /// Tokens counted before truncation.
    pub total_tokens: usize,
}

const PALETTE: [&str; 6] = ["#1f77b4", "#2ca02c", "#d62728", "#9467bd", "#ff7f0e", "#17becf"];

impl WordCloud {
    /// Renders the cloud as an SVG document.
    ///
    /// Words are laid out left to right in rows, font size scaled by weight.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        const MIN_FONT: f64 = 12.0;
        const MAX_FONT: f64 = 64.0;
        const PADDING: f64 = 8.0;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n"
        );

        let (mut x, mut y, mut row_height) = (PADDING, PADDING, 0.0f64);
        for (i, word) in self.words.iter().enumerate() {
            let size = MIN_FONT + word.weight * (MAX_FONT - MIN_FONT);
            // Rough advance width of a proportional font
            let advance = word.word.chars().count() as f64 * size * 0.6;

            if x + advance > f64::from(width) - PADDING && x > PADDING {
                x = PADDING;
                y += row_height + PADDING;
                row_height = 0.0;
            }
            if y + size > f64::from(height) - PADDING {
                break;
            }

            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{:.1}\" font-family=\"sans-serif\" fill=\"{}\">{}</text>\n",
                x,
                y + size,
                size,
                PALETTE[i % PALETTE.len()],
                escape_xml(&word.word)
            ));

            x += advance + PADDING;
            row_height = row_height.max(size);
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Word frequency, word cloud and emoji statistics.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    tokenizer: Tokenizer,
    emoji_regex: Regex,
    config: TextConfig,
    media_placeholder: String,
}

impl TextAnalyzer {
    /// Builds the analyzer, loading stopwords.
    pub fn new(config: &TextConfig, media_placeholder: impl Into<String>) -> Result<Self> {
        let tokenizer = Tokenizer::new(Stopwords::from_config(config)?)?;
        let emoji_regex = Regex::new(EMOJI_PATTERN)
            .map_err(|e| ChatlensError::config(format!("emoji support unavailable: {e}")))?;
        Ok(Self {
            tokenizer,
            emoji_regex,
            config: config.clone(),
            media_placeholder: media_placeholder.into(),
        })
    }

    /// The tokenizer shared with keyword analysis.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Bodies that take part in word statistics.
    fn text_messages<'a>(
        &'a self,
        filter: &'a UserFilter,
        records: &'a [Record],
    ) -> impl Iterator<Item = &'a str> + 'a {
        filter
            .apply(records)
            .filter(|r| !r.is_notification() && !r.is_media(&self.media_placeholder))
            .map(|r| r.message.as_str())
    }

    /// The [`top_words`](TextConfig::top_words) most common words.
    pub fn most_common_words(&self, filter: &UserFilter, records: &[Record]) -> Vec<WordCount> {
        self.tokenizer
            .top_words(self.text_messages(filter, records), self.config.top_words)
    }

    /// Word cloud of the most common words.
    ///
    /// Returns [`Outcome::InsufficientData`] when fewer than
    /// [`min_cloud_words`](TextConfig::min_cloud_words) tokens survive.
    pub fn word_cloud(&self, filter: &UserFilter, records: &[Record]) -> Outcome<WordCloud> {
        let tokens = self
            .text_messages(filter, records)
            .flat_map(|m| self.tokenizer.tokenize(m));
        let counts = frequency(tokens);
        let total_tokens: usize = counts.iter().map(|(_, c)| c).sum();

        if total_tokens == 0 || total_tokens < self.config.min_cloud_words {
            return Outcome::insufficient(format!(
                "{total_tokens} words after removing stopwords, at least {} needed for a word cloud",
                self.config.min_cloud_words.max(1)
            ));
        }

        let max = counts.first().map_or(1, |(_, c)| *c) as f64;
        let words = counts
            .into_iter()
            .take(self.config.cloud_max_words)
            .map(|(word, count)| CloudWord {
                word,
                count,
                weight: count as f64 / max,
            })
            .collect();

        Outcome::Ready(WordCloud {
            words,
            total_tokens,
        })
    }

    /// Emoji occurrences, most frequent first.
    pub fn emoji_frequency(&self, filter: &UserFilter, records: &[Record]) -> Vec<EmojiCount> {
        frequency(self.emoji_sequence(filter, records))
            .into_iter()
            .map(|(emoji, count)| EmojiCount { emoji, count })
            .collect()
    }

    /// Every emoji of the filtered messages, in order.
    pub fn emoji_sequence(&self, filter: &UserFilter, records: &[Record]) -> Vec<String> {
        filter
            .apply(records)
            .filter(|r| !r.is_notification())
            .flat_map(|r| self.emoji_regex.find_iter(&r.message))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
