//! Statistics computed from a record set.
//!
//! Every analysis takes a [`UserFilter`] and the records of a session and
//! returns typed tables:
//!
//! - [`metrics`] - message, word, media and link counts
//! - [`timeline`] - monthly/daily timelines, busiest day/month, heatmap
//! - [`text`] - word frequency, word cloud, emoji frequency
//! - [`sentiment`] - polarity per message and its aggregates
//! - [`lexicon`] - the polarity scorer behind [`sentiment`]
//!
//! Views that need a minimum amount of data return an [`Outcome`] so the
//! caller has to handle the "not enough data" case explicitly.

pub mod filter;
pub mod lexicon;
pub mod metrics;
pub mod sentiment;
pub mod text;
pub mod timeline;

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

pub use filter::UserFilter;

/// A computed view, or the reason it could not be computed.
///
/// # Example
///
/// ```
/// use chatlens::analysis::Outcome;
///
/// let ready: Outcome<u32> = Outcome::Ready(3);
/// let empty: Outcome<u32> = Outcome::insufficient("fewer than 2 days");
///
/// assert_eq!(ready.ready(), Some(&3));
/// assert!(empty.is_insufficient());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The view was computed.
    Ready(T),
    /// Not enough data for this view.
    InsufficientData {
        /// Human-readable explanation.
        reason: String,
    },
}

impl<T> Outcome<T> {
    /// Creates an [`Outcome::InsufficientData`].
    pub fn insufficient(reason: impl Into<String>) -> Self {
        Outcome::InsufficientData {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the view was computed.
    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    /// Returns `true` if there was not enough data.
    pub fn is_insufficient(&self) -> bool {
        !self.is_ready()
    }

    /// Borrows the computed view.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::InsufficientData { .. } => None,
        }
    }

    /// Converts into the computed view, dropping the reason.
    pub fn into_ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::InsufficientData { .. } => None,
        }
    }

    /// Maps the computed view.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::InsufficientData { reason } => Outcome::InsufficientData { reason },
        }
    }
}

/// Counts items, most frequent first.
///
/// Ties keep the order in which the items first appeared.
pub fn frequency<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_orders_by_count_then_first_seen() {
        let counts = frequency(["b", "a", "c", "a", "c", "d"]);
        assert_eq!(counts, vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
    }

    #[test]
    fn test_frequency_empty() {
        let counts: Vec<(&str, usize)> = frequency(Vec::<&str>::new());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_outcome_map_and_accessors() {
        let ready = Outcome::Ready(2).map(|v| v * 10);
        assert_eq!(ready.into_ready(), Some(20));

        let empty: Outcome<i32> = Outcome::insufficient("no data");
        let mapped = empty.map(|v| v + 1);
        assert_eq!(mapped, Outcome::insufficient("no data"));
        assert!(mapped.ready().is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let ready = serde_json::to_value(Outcome::Ready(5)).unwrap();
        assert_eq!(ready["status"], "ready");
        assert_eq!(ready["data"], 5);

        let empty = serde_json::to_value(Outcome::<u8>::insufficient("too few words")).unwrap();
        assert_eq!(empty["status"], "insufficient_data");
        assert_eq!(empty["data"]["reason"], "too few words");
    }
}
