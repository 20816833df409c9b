//! Shared parsing utilities.
//!
//! Line-format detection and timestamp handling used by
//! [`WhatsAppParser`](crate::parser::WhatsAppParser).

pub mod whatsapp;

// Re-export commonly used items
pub use whatsapp::{
    DateFormat as WhatsAppDateFormat, DateOrder, detect_date_order, detect_format,
    parse_timestamp, split_sender,
};
