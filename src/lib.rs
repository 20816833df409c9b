//! # Chatlens
//!
//! A Rust library for analyzing WhatsApp chat exports: who talks, when, with
//! which words and emoji, and in what mood.
//!
//! ## Overview
//!
//! Chatlens turns a plain-text WhatsApp export (Android `DATE, TIME - ` or
//! iOS `[DATE, TIME] ` lines) into an ordered record set and computes typed
//! tables from it:
//! - **Statistics** - message, word, media and link counts
//! - **Activity** - monthly and daily timelines, busiest days and months,
//!   a weekday × hour heatmap
//! - **Text** - most common words, word cloud (SVG), emoji usage
//! - **Sentiment** - polarity per message, category counts, the most
//!   negative messages, keywords per category and a daily polarity timeline
//!
//! Every table can be computed for the whole chat or for a single user.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = "\
//! 01/01/24, 10:00 - Alice: Hello there, great to see you all 😀
//! 01/01/24, 10:05 - Bob: <Media omitted>
//! 02/01/24, 21:30 - Bob: this traffic is terrible";
//!
//!     let session = Session::from_text("chat.txt", export, AnalysisConfig::default())?;
//!     assert_eq!(session.users(), ["Alice", "Bob"]);
//!
//!     let dashboard = session.dashboard(&UserFilter::Overall)?;
//!     assert_eq!(dashboard.stats.message_count, 3);
//!     assert_eq!(dashboard.stats.media_count, 1);
//!
//!     if let Outcome::Ready(sentiment) = &dashboard.sentiment {
//!         assert_eq!(sentiment.summary.negative, 1);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`session`] - [`Session`]: one uploaded export and its [`Dashboard`](session::Dashboard)
//! - [`parser`] - [`WhatsAppParser`](parser::WhatsAppParser) and the [`ParseReport`](parser::ParseReport) of skipped lines
//! - [`parsing`] - line-format detection and timestamp parsing helpers
//! - [`analysis`] - metrics, timelines, text, sentiment; [`UserFilter`](analysis::UserFilter) and [`Outcome`](analysis::Outcome)
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig) and its sections
//! - [`record`] - [`Record`]
//! - [`format`] / [`output`] - text, JSON and CSV rendering
//! - [`cli`] - CLI types (feature `cli`)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `json-output` | JSON writer, `AnalysisConfig::from_json_file` |
//! | `csv-output` | CSV writer |
//! | `cli` | the `chatlens` binary |
//! | `gen-test` | the `gen_test` synthetic export generator |
//!
//! `full` (default) enables everything except `gen-test`.

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod output;
pub mod parser;
pub mod parsing;
pub mod record;
pub mod session;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use record::Record;
pub use session::Session;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::Record;
    pub use crate::session::{Dashboard, FileReview, Session};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Configuration
    pub use crate::config::{
        ActivityConfig, AnalysisConfig, ParserConfig, SentimentConfig, TextConfig,
    };

    // Parsing
    pub use crate::parser::{ParseReport, Parser, WhatsAppParser};

    // Analysis
    pub use crate::analysis::lexicon::{LexiconScorer, PolarityScorer};
    pub use crate::analysis::sentiment::{Category, SentimentAnalyzer};
    pub use crate::analysis::{Outcome, UserFilter};

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
