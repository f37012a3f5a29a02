//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`
//! or `crate::output`.

use std::collections::HashMap;
use std::path::Path;
use std::process::Output;

use anyhow::Result;

use crate::domain::{RawConfig, UnitStatus};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Calls block until the child exits; there is no timeout.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with the inherited environment and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with exactly `env` as its environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &HashMap<String, String>,
    ) -> Result<Output>;
}

// ── Package Manager Port ──────────────────────────────────────────────────────

/// System package manager operations used by the charm.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    /// Install `name` (newest available version).
    async fn add_package(&self, name: &str) -> Result<()>;
    /// Installed version of `name`, or `None` if it is not installed.
    async fn installed_version(&self, name: &str) -> Result<Option<String>>;
    /// Refresh the package index.
    async fn update(&self) -> Result<()>;
    /// Install or upgrade `name` to the newest available version.
    async fn ensure_latest(&self, name: &str) -> Result<()>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the local filesystem operations the charm performs.
pub trait LocalFs {
    /// Returns `true` if `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;
    /// Returns `true` if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Replace the file contents, creating parent directories as needed.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
    /// Remove a file.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

// ── Status Port ───────────────────────────────────────────────────────────────

/// Unit status owned by the orchestrator.
#[allow(async_fn_in_trait)]
pub trait StatusStore {
    /// The last status set, or `None` if none has been set yet.
    async fn current(&self) -> Result<Option<UnitStatus>>;
    /// Replace the unit status.
    async fn set(&self, status: &UnitStatus) -> Result<()>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Source of the orchestrator-supplied configuration.
#[allow(async_fn_in_trait)]
pub trait ConfigSource {
    /// Load the current configuration.
    async fn load(&self) -> Result<RawConfig>;
}

// ── Host Port ─────────────────────────────────────────────────────────────────

/// Facts about the local host.
pub trait HostInfo {
    /// The host's network name, used as the default computer title.
    fn hostname(&self) -> Result<String>;
}

// ── Event Port ────────────────────────────────────────────────────────────────

/// Operator-visible log of an action event.
pub trait EventLog {
    /// Append a message to the event's log.
    fn log(&self, message: &str);
    /// Mark the event as failed.
    fn fail(&self, message: &str);
}
