//! Persistence of parsed simulator reports.
//!
//! The [`ResultSink`] trait abstracts where finished run reports go; the
//! shipped [`JsonDirectorySink`] writes one JSON document per run.

use std::fs;
use std::path::{Path, PathBuf};

use sweepgen_core::SimReport;
use thiserror::Error;

use crate::util::{atomic_write, sanitize_filename};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for one structured document per benchmark run
pub trait ResultSink {
    /// Store `report` under a run label, returning where it was stored
    fn save(&self, label: &str, report: &SimReport) -> Result<PathBuf, SinkError>;
}

/// Writes each report as pretty JSON into a directory.
///
/// Files are named `<label>-<UTC timestamp>.json`; a numeric suffix is added
/// when two runs land in the same second.
pub struct JsonDirectorySink {
    root: PathBuf,
}

impl JsonDirectorySink {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, label: &str, at: jiff::Timestamp) -> PathBuf {
        let stem = format!(
            "{}-{}",
            sanitize_filename(label),
            at.strftime("%Y%m%dT%H%M%SZ")
        );

        let mut path = self.root.join(format!("{stem}.json"));
        let mut suffix = 1;
        while path.exists() {
            path = self.root.join(format!("{stem}-{suffix}.json"));
            suffix += 1;
        }
        path
    }
}

impl ResultSink for JsonDirectorySink {
    fn save(&self, label: &str, report: &SimReport) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.root).map_err(|source| SinkError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut json = report.to_json_pretty()?;
        json.push('\n');

        let path = self.document_path(label, jiff::Timestamp::now());
        atomic_write(&path, &json).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), metrics = report.len(), "saved report");
        Ok(path)
    }
}
