//! JSON array persistence for generated records.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Write `records` to `path` as a pretty-printed JSON array, creating
/// parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }
    }

    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)
        .with_context(|| format!("Failed to write {:?}", path))?;

    info!(count = records.len(), path = %path.display(), "records written");
    Ok(())
}
