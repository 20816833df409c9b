//! Dashboard writers.
//!
//! - [`render_dashboard`] / [`render_file_review`] / [`render_users`] - plain-text report
//! - [`write_json`] / [`to_json`] - any result table as pretty JSON - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - records table with semicolon delimiter - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::parser::{Parser, WhatsAppParser};
//! use chatlens::output::to_csv;
//!
//! let parsed = WhatsAppParser::new().parse_str("01/01/24, 10:00 - Alice: Hello there")?;
//! let csv = to_csv(&parsed.records)?;
//! assert!(csv.starts_with("date;time;user;message;hour;weekday;month"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
mod text;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
pub use text::{render_dashboard, render_file_review, render_users};
