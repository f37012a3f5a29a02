//! Infrastructure implementation of the `StatusStore` port.
//!
//! `StatusFile` provides async load/save using `tokio::task::spawn_blocking`
//! with atomic write (temp file + rename) to prevent status corruption.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::StatusStore;
use crate::domain::UnitStatus;

/// On-disk form of the unit status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: UnitStatus,
    pub updated_at: DateTime<Utc>,
}

/// Status file manager — implements `StatusStore` for the infra layer.
pub struct StatusFile {
    path: PathBuf,
}

impl StatusFile {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Synchronous load — used internally by `load` via `spawn_blocking`.
    fn load_sync(&self) -> Result<Option<StatusRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading status file {}", self.path.display()))?;
        let record = serde_json::from_str(&content)
            .with_context(|| format!("parsing status file {}", self.path.display()))?;
        Ok(Some(record))
    }

    /// Synchronous save — used internally by `set` via `spawn_blocking`.
    fn save_sync(&self, record: &StatusRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(record).context("serializing status")?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing status file {}", self.path.display()))?;

        Ok(())
    }

    /// Load the full record, including its timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Option<StatusRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || StatusFile::with_path(path).load_sync())
            .await
            .context("status load task panicked")?
    }
}

impl StatusStore for StatusFile {
    async fn current(&self) -> Result<Option<UnitStatus>> {
        Ok(self.load().await?.map(|record| record.status))
    }

    async fn set(&self, status: &UnitStatus) -> Result<()> {
        tracing::info!(kind = status.kind(), message = status.message(), "unit status");
        let path = self.path.clone();
        let record = StatusRecord {
            status: status.clone(),
            updated_at: Utc::now(),
        };
        tokio::task::spawn_blocking(move || StatusFile::with_path(path).save_sync(&record))
            .await
            .context("status save task panicked")?
    }
}
