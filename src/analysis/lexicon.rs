//! Lexicon-based polarity scoring.
//!
//! Each token found in the lexicon contributes its valence (roughly `-4..=4`).
//! A valence is shifted by a preceding booster ("very", "slightly"), flipped
//! and dampened by a preceding negation ("not", "never", "don't"), and
//! emphasized when the word is shouted in ALL CAPS among lower-case words.
//! Exclamation marks amplify the total, which is then squashed into
//! `[-1, 1]` with `s / sqrt(s² + 15)`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{ChatlensError, Result};

/// Scores the polarity of a text in `[-1, 1]`.
pub trait PolarityScorer: Send + Sync {
    /// Polarity of `text`; `0.0` means neutral.
    fn polarity(&self, text: &str) -> f64;
}

const TOKEN_PATTERN: &str = r"[\p{L}\p{N}_']+|\p{Extended_Pictographic}";

const NORMALIZATION_ALPHA: f64 = 15.0;
const BOOST_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const WINDOW: usize = 3;

const WORDS: &[(&str, f64)] = &[
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("like", 1.5),
    ("liked", 1.8),
    ("good", 1.9),
    ("great", 3.1),
    ("nice", 1.8),
    ("awesome", 3.1),
    ("amazing", 2.8),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("wonderful", 2.7),
    ("brilliant", 2.8),
    ("perfect", 2.7),
    ("best", 3.2),
    ("better", 1.9),
    ("happy", 2.7),
    ("glad", 2.0),
    ("fun", 2.3),
    ("funny", 1.9),
    ("cool", 1.3),
    ("beautiful", 2.9),
    ("cute", 2.0),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("welcome", 2.0),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("yay", 2.4),
    ("lol", 1.8),
    ("haha", 2.0),
    ("hahaha", 2.2),
    ("win", 2.8),
    ("won", 2.7),
    ("proud", 2.1),
    ("safe", 1.9),
    ("sweet", 2.0),
    ("smart", 1.7),
    ("kind", 2.4),
    ("ok", 1.2),
    ("okay", 0.9),
    ("yes", 1.7),
    ("sure", 1.3),
    ("agree", 1.5),
    ("hope", 1.9),
    ("wow", 2.8),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("hate", -2.7),
    ("hated", -3.2),
    ("sad", -2.1),
    ("angry", -2.3),
    ("mad", -2.2),
    ("upset", -1.6),
    ("annoying", -1.7),
    ("annoyed", -1.6),
    ("boring", -1.3),
    ("tired", -1.9),
    ("sick", -2.3),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("cry", -2.1),
    ("crying", -2.1),
    ("sorry", -0.3),
    ("problem", -1.7),
    ("fail", -2.5),
    ("failed", -2.3),
    ("wrong", -2.1),
    ("stupid", -2.4),
    ("ugly", -2.3),
    ("lost", -1.3),
    ("lonely", -1.5),
    ("scared", -1.9),
    ("afraid", -1.5),
    ("worried", -1.2),
    ("stress", -1.8),
    ("stressed", -1.4),
    ("disappointed", -1.9),
    ("miss", -0.6),
    ("kill", -3.7),
    ("die", -2.9),
    ("dead", -3.3),
    ("damn", -1.7),
    ("shit", -2.6),
    ("crap", -1.6),
    ("no", -1.2),
    ("ugh", -1.8),
    ("useless", -1.8),
    ("broken", -2.1),
    ("late", -0.7),
];

const EMOJI: &[(&str, f64)] = &[
    ("😀", 2.0),
    ("😃", 2.0),
    ("😄", 2.2),
    ("😁", 2.0),
    ("😊", 2.2),
    ("🙂", 1.2),
    ("😍", 2.8),
    ("🥰", 2.8),
    ("😘", 2.4),
    ("❤", 3.0),
    ("💕", 2.6),
    ("👍", 1.8),
    ("👏", 1.9),
    ("🎉", 2.2),
    ("🔥", 1.5),
    ("😂", 1.5),
    ("🤣", 1.5),
    ("😅", 0.6),
    ("🙁", -1.5),
    ("☹", -1.5),
    ("😞", -2.0),
    ("😔", -1.8),
    ("😢", -2.0),
    ("😭", -2.2),
    ("😩", -1.8),
    ("😠", -2.5),
    ("😡", -2.8),
    ("🤬", -3.0),
    ("👎", -1.8),
    ("💔", -2.5),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOST_INCREMENT),
    ("completely", BOOST_INCREMENT),
    ("extremely", BOOST_INCREMENT),
    ("incredibly", BOOST_INCREMENT),
    ("really", BOOST_INCREMENT),
    ("so", BOOST_INCREMENT),
    ("super", BOOST_INCREMENT),
    ("totally", BOOST_INCREMENT),
    ("very", BOOST_INCREMENT),
    ("most", BOOST_INCREMENT),
    ("such", BOOST_INCREMENT),
    ("barely", -BOOST_INCREMENT),
    ("hardly", -BOOST_INCREMENT),
    ("kinda", -BOOST_INCREMENT),
    ("slightly", -BOOST_INCREMENT),
    ("somewhat", -BOOST_INCREMENT),
    ("little", -BOOST_INCREMENT),
];

const NEGATIONS: &[&str] = &[
    "not", "never", "no", "nothing", "nobody", "none", "neither", "nor", "nowhere", "without",
    "cant", "dont", "wont", "isnt", "aint", "didnt", "doesnt", "wasnt", "arent",
];

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

fn is_shouted(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

/// Rule-based scorer over a word and emoji lexicon.
///
/// # Example
///
/// ```
/// use chatlens::analysis::lexicon::{LexiconScorer, PolarityScorer};
///
/// let scorer = LexiconScorer::new()?;
/// assert!(scorer.polarity("I love this!") > 0.05);
/// assert!(scorer.polarity("I do not love this") < -0.05);
/// assert_eq!(scorer.polarity("see you at noon"), 0.0);
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
    boosters: HashMap<&'static str, f64>,
    token_regex: Regex,
}

impl LexiconScorer {
    /// Creates a scorer with the built-in lexicon.
    pub fn new() -> Result<Self> {
        let token_regex = Regex::new(TOKEN_PATTERN)
            .map_err(|e| ChatlensError::config(format!("invalid token pattern: {e}")))?;
        let valences = WORDS
            .iter()
            .chain(EMOJI)
            .map(|(w, v)| ((*w).to_string(), *v))
            .collect();
        Ok(Self {
            valences,
            boosters: BOOSTERS.iter().copied().collect(),
            token_regex,
        })
    }

    /// Adds or overrides lexicon entries.
    #[must_use]
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        self.valences.extend(
            entries
                .into_iter()
                .map(|(w, v)| (w.as_ref().to_lowercase(), v)),
        );
        self
    }

    /// Adds entries from a lexicon file.
    ///
    /// Each non-empty line is `word<TAB>valence`; further tab-separated
    /// columns are ignored and lines starting with `#` are comments.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_to_string(path)
            .map_err(|e| ChatlensError::config_file(format!("cannot read lexicon: {e}"), path))?;

        let mut added = 0;
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let word = fields.next().map(str::trim).unwrap_or_default();
            let valence = fields
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite());
            match valence {
                Some(valence) if !word.is_empty() => {
                    self.valences.insert(word.to_lowercase(), valence);
                    added += 1;
                }
                _ => {
                    return Err(ChatlensError::config_file(
                        format!("line {}: expected `word<TAB>valence`", idx + 1),
                        path,
                    ));
                }
            }
        }
        Ok(added)
    }

    /// Valence of a single lower-case token, if known.
    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    /// Number of lexicon entries.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// Returns `true` if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    fn raw_score(&self, text: &str) -> f64 {
        let text = text.replace('\u{2019}', "'");
        let tokens: Vec<&str> = self.token_regex.find_iter(&text).map(|m| m.as_str()).collect();
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let shouting = tokens.iter().filter(|t| is_shouted(t)).count();
        let wordy = tokens
            .iter()
            .filter(|t| t.chars().any(char::is_alphabetic))
            .count();
        let mixed_caps = shouting > 0 && shouting < wordy;

        let mut sum = 0.0;
        for (i, token) in lower.iter().enumerate() {
            if self.boosters.contains_key(token.as_str()) {
                continue;
            }
            let Some(mut valence) = self.valence(token) else {
                continue;
            };

            if mixed_caps && is_shouted(tokens[i]) {
                valence += CAPS_INCREMENT.copysign(valence);
            }

            let start = i.saturating_sub(WINDOW);
            let mut negated = false;
            for (distance, prev) in lower[start..i].iter().rev().enumerate() {
                if let Some(boost) = self.boosters.get(prev.as_str()) {
                    let damp = 1.0 - 0.05 * distance as f64;
                    valence += boost * valence.signum() * damp;
                }
                negated |= is_negation(prev);
            }
            if negated {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
            sum += (bangs * EXCLAMATION_INCREMENT).copysign(sum);
        }
        sum
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let score = self.raw_score(text);
        if score == 0.0 {
            return 0.0;
        }
        (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}
