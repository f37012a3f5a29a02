//! Client package installation and upgrade.

use anyhow::Result;

use crate::application::ports::{EventLog, PackageManager, StatusStore};
use crate::application::services::lifecycle::CLIENT_PACKAGE;
use crate::domain::{ClientCharmError, PackageError, UnitStatus};

/// Install the client package.
///
/// # Errors
///
/// Returns [`ClientCharmError::InstallFailed`] if installation fails; the
/// package manager's error is logged.
pub async fn install_client(packages: &impl PackageManager, status: &impl StatusStore) -> Result<()> {
    status
        .set(&UnitStatus::maintenance("Installing landscape client.."))
        .await?;
    if let Err(e) = packages.add_package(CLIENT_PACKAGE).await {
        tracing::error!(error = %format!("{e:#}"), package = CLIENT_PACKAGE, "installation failed");
        return Err(ClientCharmError::InstallFailed.into());
    }
    Ok(())
}

/// Returns `true` if the client package is installed.
///
/// # Errors
///
/// Returns an error if the package database cannot be queried.
pub async fn client_installed(packages: &impl PackageManager) -> Result<bool> {
    Ok(packages.installed_version(CLIENT_PACKAGE).await?.is_some())
}

/// Refresh the package index and bring the client to the newest version.
///
/// Returns the version installed afterwards.
///
/// # Errors
///
/// Returns an error if any package manager step fails.
pub async fn upgrade_client(packages: &impl PackageManager, event: &impl EventLog) -> Result<String> {
    packages.update().await?;

    tracing::info!("Upgrading landscape client..");
    event.log("Upgrading landscape client..");
    packages.ensure_latest(CLIENT_PACKAGE).await?;

    let version = packages
        .installed_version(CLIENT_PACKAGE)
        .await?
        .ok_or_else(|| PackageError::NotInstalled(CLIENT_PACKAGE.to_string()))?;
    tracing::info!(%version, "Upgraded landscape client");
    event.log(&format!("Upgraded to {version}..."));
    Ok(version)
}
