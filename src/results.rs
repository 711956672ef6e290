//! JSON result files.
//!
//! Each file is an array of records, pretty-printed with a one-space indent.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::info;

/// Serialize `records` as a pretty-printed JSON array
pub fn to_pretty_json<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    records.serialize(&mut serializer)?;
    Ok(buf)
}

/// A rendered result file written next to its destination, not yet in place
pub struct StagedFile {
    temp: NamedTempFile,
    path: PathBuf,
    records: usize,
}

impl StagedFile {
    /// Write `content` to a temporary file in the directory of `path`
    pub fn new(path: &Path, content: &[u8], records: usize) -> Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        temp.write_all(content)
            .and_then(|_| temp.flush())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(Self {
            temp,
            path: path.to_path_buf(),
            records,
        })
    }

    /// Move the file over its destination, replacing any existing file
    pub fn commit(self) -> Result<()> {
        self.temp
            .persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        info!("Wrote {} records to {}", self.records, self.path.display());
        Ok(())
    }
}

/// Write a result set to `path`, replacing any existing file.
///
/// The destination is either left untouched or holds the complete new set.
pub fn write_results<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let content = to_pretty_json(records)?;
    StagedFile::new(path, &content, records.len())?.commit()
}

/// Read a result set written by [`write_results`]
pub fn read_results<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let records: Vec<T> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    info!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}
