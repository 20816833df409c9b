//! Restrict an analysis to one sender.
//!
//! # Examples
//!
//! ```
//! use chatlens::analysis::UserFilter;
//!
//! let overall: UserFilter = "Overall".parse().unwrap();
//! assert_eq!(overall, UserFilter::Overall);
//!
//! let alice: UserFilter = "Alice".parse().unwrap();
//! assert_eq!(alice, UserFilter::user("Alice"));
//! assert_eq!(alice.to_string(), "Alice");
//! ```
//!
//! # Behavior Notes
//!
//! - `"overall"` is matched case-insensitively; every other value is a user
//!   name matched exactly
//! - The overall filter keeps system notifications; per-user filters never
//!   match them

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Record;

/// Label the dashboard uses for the unfiltered view.
pub const OVERALL: &str = "Overall";

/// Which records an analysis looks at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserFilter {
    /// Every record, notifications included.
    #[default]
    Overall,
    /// Records sent by this user.
    User(String),
}

impl UserFilter {
    /// Creates a filter for one user.
    pub fn user(name: impl Into<String>) -> Self {
        UserFilter::User(name.into())
    }

    /// Returns `true` if the filter keeps `record`.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            UserFilter::Overall => true,
            UserFilter::User(name) => record.user == *name,
        }
    }

    /// Iterates over the records the filter keeps, in order.
    ///
    /// The yielded records borrow from `records` only, so they may outlive
    /// the filter.
    pub fn apply<'s, 'r>(
        &'s self,
        records: &'r [Record],
    ) -> impl Iterator<Item = &'r Record> + use<'s, 'r> {
        records.iter().filter(move |r| self.matches(r))
    }

    /// Returns the user name for a per-user filter.
    pub fn user_name(&self) -> Option<&str> {
        match self {
            UserFilter::Overall => None,
            UserFilter::User(name) => Some(name),
        }
    }

    /// Returns `true` for the unfiltered view.
    pub fn is_overall(&self) -> bool {
        matches!(self, UserFilter::Overall)
    }
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserFilter::Overall => f.write_str(OVERALL),
            UserFilter::User(name) => f.write_str(name),
        }
    }
}

impl FromStr for UserFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(OVERALL) {
            Ok(UserFilter::Overall)
        } else {
            Ok(UserFilter::user(s))
        }
    }
}
