//! Infrastructure implementation of the `HostInfo` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::HostInfo;

/// Kernel-reported host name.
pub const KERNEL_HOSTNAME: &str = "/proc/sys/kernel/hostname";

/// Reads the host name from procfs.
pub struct ProcHostInfo {
    path: PathBuf,
}

impl Default for ProcHostInfo {
    fn default() -> Self {
        Self::with_path(PathBuf::from(KERNEL_HOSTNAME))
    }
}

impl ProcHostInfo {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HostInfo for ProcHostInfo {
    fn hostname(&self) -> Result<String> {
        let name = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let name = name.trim();
        anyhow::ensure!(!name.is_empty(), "{} is empty", self.path.display());
        Ok(name.to_string())
    }
}
