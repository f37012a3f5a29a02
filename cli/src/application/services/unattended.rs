//! Toggle for the host's unattended upgrades.

use std::path::Path;

use crate::application::ports::LocalFs;
use crate::domain::config::DISABLE_UNATTENDED_UPGRADES_KEY;
use crate::domain::{ClientCharmError, RawConfig};

/// APT setting written to the override file.
pub const DISABLE_UNATTENDED_UPGRADES: &str = "APT::Periodic::Unattended-Upgrade \"0\";";

/// Write or remove the APT override according to
/// `disable-unattended-upgrades`.
///
/// # Errors
///
/// Returns [`ClientCharmError::AptOverride`] if the file cannot be written
/// or removed.
pub fn apply_unattended_upgrades(
    fs: &impl LocalFs,
    raw_config: &RawConfig,
    override_path: &Path,
) -> Result<(), ClientCharmError> {
    if raw_config.is_truthy(DISABLE_UNATTENDED_UPGRADES_KEY) {
        tracing::info!(path = %override_path.display(), "Disabling unattended-upgrades via APT config...");
        fs.write(override_path, DISABLE_UNATTENDED_UPGRADES.as_bytes())
            .map_err(|e| ClientCharmError::AptOverride(format!("{e:#}")))?;
    } else if fs.exists(override_path) {
        tracing::info!(path = %override_path.display(), "Enabling unattended-upgrades via APT config...");
        fs.remove_file(override_path)
            .map_err(|e| ClientCharmError::AptOverride(format!("{e:#}")))?;
    }
    Ok(())
}
