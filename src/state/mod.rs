//! Density Log
//!
//! Append-only persistent record of every accepted seed density. The
//! server appends one newline-terminated integer per accepted set-state
//! request and reads the most recent entry back for reset requests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Sink for accepted density values.
#[async_trait]
pub trait DensitySink: Send + Sync {
    /// Append one accepted density to the log.
    async fn append(&self, density: i64) -> Result<()>;

    /// The most recently appended density, or `None` if the log is empty.
    async fn last(&self) -> Result<Option<i64>>;
}

/// File-backed density log.
///
/// Entries are plain decimal integers, one per line. The file is created
/// on first append.
pub struct FileDensityLog {
    path: PathBuf,
}

impl FileDensityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DensitySink for FileDensityLog {
    async fn append(&self, density: i64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create density log directory {}", parent.display())
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open density log {}", self.path.display()))?;

        file.write_all(format!("{density}\n").as_bytes())
            .await
            .with_context(|| format!("failed to append to density log {}", self.path.display()))?;

        debug!(density, path = %self.path.display(), "appended density");
        Ok(())
    }

    async fn last(&self) -> Result<Option<i64>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read density log {}", self.path.display())
                })
            }
        };

        match contents.lines().rev().find(|line| !line.trim().is_empty()) {
            None => Ok(None),
            Some(line) => {
                let density = line
                    .trim()
                    .parse::<i64>()
                    .with_context(|| format!("invalid density log entry {line:?}"))?;
                Ok(Some(density))
            }
        }
    }
}
