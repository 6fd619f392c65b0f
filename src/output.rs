//! Output formatting for CLI emission.
//!
//! The CLI's wire contract to downstream consumers: a single
//! pretty-printed JSON array written after collection completes, or
//! NDJSON lines written as records become available.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Write the full result set as one pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, records: &[T]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// Write one record as a compact JSON line.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_ndjson_line<W: Write, T: Serialize>(mut writer: W, record: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, record)?;
    writeln!(writer)?;
    Ok(())
}
