//! JSON listing writer

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::output::OutputResult;

/// Writes listings as a pretty-printed UTF-8 JSON array
///
/// One object per listing, in extraction order.
pub fn write_listings<T: Serialize>(path: &Path, listings: &[T]) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, listings)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
