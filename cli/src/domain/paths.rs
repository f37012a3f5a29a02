//! Well-known host paths the charm reads and writes.

use std::path::{Path, PathBuf};

pub const CLIENT_CONF_FILE: &str = "/etc/landscape/client.conf";
pub const CERT_FILE: &str = "/etc/ssl/certs/landscape_server_ca.crt";
pub const APT_CONF_OVERRIDE: &str = "/etc/apt/apt.conf.d/99landscapeoverride";
pub const STATE_DIR: &str = "/var/lib/landscape-client-charm";

/// File name of the persisted unit status inside the state directory.
pub const STATUS_FILE_NAME: &str = "status.json";

/// Resolved host paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharmPaths {
    /// Landscape client configuration file.
    pub client_conf: PathBuf,
    /// Where decoded CA material is written.
    pub cert_file: PathBuf,
    /// APT override that disables unattended upgrades.
    pub apt_override: PathBuf,
    /// Directory holding the persisted unit status.
    pub state_dir: PathBuf,
}

impl Default for CharmPaths {
    fn default() -> Self {
        Self {
            client_conf: PathBuf::from(CLIENT_CONF_FILE),
            cert_file: PathBuf::from(CERT_FILE),
            apt_override: PathBuf::from(APT_CONF_OVERRIDE),
            state_dir: PathBuf::from(STATE_DIR),
        }
    }
}

impl CharmPaths {
    /// Default paths re-rooted under `root` (e.g. a scratch directory).
    #[must_use]
    pub fn under_root(root: &Path) -> Self {
        let rebase = |p: &str| root.join(p.trim_start_matches('/'));
        Self {
            client_conf: rebase(CLIENT_CONF_FILE),
            cert_file: rebase(CERT_FILE),
            apt_override: rebase(APT_CONF_OVERRIDE),
            state_dir: rebase(STATE_DIR),
        }
    }

    /// Replace the state directory.
    #[must_use]
    pub fn with_state_dir(mut self, dir: PathBuf) -> Self {
        self.state_dir = dir;
        self
    }

    #[must_use]
    pub fn status_file(&self) -> PathBuf {
        self.state_dir.join(STATUS_FILE_NAME)
    }
}
