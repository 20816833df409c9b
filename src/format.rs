//! Output format selection.
//!
//! This module picks how a [`Dashboard`] is presented. It has no CLI
//! framework dependencies, so library users can render dashboards the same
//! way the `chatlens` binary does.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn example() -> chatlens::Result<()> {
//! use chatlens::Session;
//! use chatlens::analysis::UserFilter;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::format::{OutputFormat, to_format_string};
//!
//! let session = Session::from_text(
//!     "chat.txt",
//!     "01/01/24, 10:00 - Alice: Hello there",
//!     AnalysisConfig::default(),
//! )?;
//! let dashboard = session.dashboard(&UserFilter::Overall)?;
//!
//! let json = to_format_string(&session, &dashboard, OutputFormat::Json)?;
//! assert!(json.contains("\"message_count\": 1"));
//!
//! assert_eq!(OutputFormat::from_path("report.csv")?, OutputFormat::Csv);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatlensError;
use crate::output;
use crate::session::{Dashboard, Session};

/// How a dashboard is rendered.
///
/// - [`Text`](OutputFormat::Text) - human-readable report
/// - [`Json`](OutputFormat::Json) - the whole dashboard as one JSON document
/// - [`Csv`](OutputFormat::Csv) - the filtered records table
///
/// # Example
///
/// ```rust
/// use chatlens::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("json").unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Plain-text report (default)
    #[default]
    Text,

    /// Full dashboard as JSON
    Json,

    /// Records table, semicolon-delimited
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "json", "csv"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Json, OutputFormat::Csv]
    }

    /// Detects the format from a file extension.
    ///
    /// ```rust
    /// use chatlens::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/report.JSON").unwrap(), OutputFormat::Json);
    /// assert!(OutputFormat::from_path("report.pdf").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatlensError> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ChatlensError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: txt, json, csv"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Renders `dashboard` in `format`.
///
/// # Errors
///
/// Returns an error if the required feature for the format is not enabled or
/// serialization fails.
pub fn to_format_string(
    session: &Session,
    dashboard: &Dashboard<'_>,
    format: OutputFormat,
) -> Result<String, ChatlensError> {
    match format {
        OutputFormat::Text => Ok(output::render_dashboard(&session.file_review(), dashboard)),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => output::to_json(dashboard),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => output::to_csv(dashboard.filter.apply(session.records())),
        #[allow(unreachable_patterns)]
        _ => Err(ChatlensError::invalid_format(
            "output",
            format!(
                "Output format {format} requires the '{}' feature to be enabled",
                match format {
                    OutputFormat::Csv => "csv-output",
                    _ => "json-output",
                }
            ),
        )),
    }
}

/// Renders `dashboard` in `format` and writes it to `path`.
pub fn write_to_format(
    session: &Session,
    dashboard: &Dashboard<'_>,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), ChatlensError> {
    let rendered = to_format_string(session, dashboard, format)?;
    fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::UserFilter;
    use crate::config::AnalysisConfig;
    use std::str::FromStr;

    const EXPORT: &str = "01/01/24, 10:00 - Alice: Hello there\n\
                          01/01/24, 10:05 - Bob: <Media omitted>";

    fn session() -> Session {
        Session::from_text("chat.txt", EXPORT, AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_str("jsonl").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("a/b/report.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("report.txt").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_path("report").is_err());
    }

    #[test]
    fn test_format_default_and_all() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::all().len(), 3);
        assert_eq!(OutputFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_text_rendering() {
        let s = session();
        let d = s.dashboard(&UserFilter::Overall).unwrap();
        let text = to_format_string(&s, &d, OutputFormat::Text).unwrap();
        assert!(text.contains("Total messages"));
        assert!(text.contains("chat.txt"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_json_rendering() {
        let s = session();
        let d = s.dashboard(&UserFilter::Overall).unwrap();
        let json = to_format_string(&s, &d, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["media_count"], 1);
        assert_eq!(value["filter"], "overall");
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_csv_rendering_respects_filter() {
        let s = session();
        let d = s.dashboard(&UserFilter::user("Bob")).unwrap();
        let csv = to_format_string(&s, &d, OutputFormat::Csv).unwrap();
        assert!(csv.contains("Bob"));
        assert!(!csv.contains("Alice"));
    }

    #[test]
    fn test_write_to_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let s = session();
        let d = s.dashboard(&UserFilter::Overall).unwrap();
        write_to_format(&s, &d, &path, OutputFormat::Text).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("Alice"));
    }
}
