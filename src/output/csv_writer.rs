//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Record;
use crate::error::{ChatlensError, Result};

const HEADER: [&str; 7] = ["date", "time", "user", "message", "hour", "weekday", "month"];

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `date`, `time`, `user`, `message`, `hour`, `weekday`, `month`
/// - Multi-line messages are quoted
/// - Encoding: UTF-8
pub fn write_csv<'a>(records: impl IntoIterator<Item = &'a Record>, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);
    write_records(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv<'a>(records: impl IntoIterator<Item = &'a Record>) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    write_records(&mut writer, records)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ChatlensError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|source| ChatlensError::Utf8 {
        context: "CSV output".to_string(),
        source,
    })
}

fn write_records<'a, W: Write>(
    writer: &mut csv::Writer<W>,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<()> {
    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            record.timestamp.format("%H:%M").to_string(),
            record.user.clone(),
            record.message.clone(),
            record.hour.to_string(),
            record.weekday.clone(),
            record.month.clone(),
        ])?;
    }
    Ok(())
}
