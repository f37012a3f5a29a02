//! Registration lifecycle: probe, then restart or register.
//!
//! Registration state is never cached; it is probed afresh on every trigger.

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, StatusStore};
use crate::application::services::client_config::set_client_config;
use crate::application::services::process::run_external_command;
use crate::domain::{CharmPaths, ClientCharmError, RawConfig, UnitStatus};

pub const CLIENT_PACKAGE: &str = "landscape-client";
pub const CLIENT_CONFIG_CMD: &str = "/usr/bin/landscape-config";
pub const CLIENT_SERVICE: &str = "landscape-client";

/// Registration state of the client as observed by probing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Registered,
}

/// Ask the client whether it is registered. A failed probe means
/// unregistered and is not logged as an error.
pub async fn registration_state(runner: &impl CommandRunner) -> RegistrationState {
    if run_external_command(runner, &[CLIENT_CONFIG_CMD, "--is-registered"], None, true).await {
        RegistrationState::Registered
    } else {
        RegistrationState::Unregistered
    }
}

/// Register the client non-interactively.
///
/// # Errors
///
/// Returns [`ClientCharmError::RegistrationFailed`] if `landscape-config`
/// fails, or an error if the status cannot be set.
pub async fn send_registration(
    runner: &impl CommandRunner,
    status: &impl StatusStore,
) -> Result<()> {
    if !run_external_command(runner, &[CLIENT_CONFIG_CMD, "--silent"], None, false).await {
        return Err(ClientCharmError::RegistrationFailed.into());
    }
    status.set(&UnitStatus::active("Client registered!")).await
}

/// Restart the client service so it rereads its configuration.
pub async fn restart_client(runner: &impl CommandRunner) -> bool {
    run_external_command(runner, &["systemctl", "restart", CLIENT_SERVICE], None, false).await
}

/// Re-apply the client configuration, then restart a registered client or
/// register an unregistered one.
///
/// Returns the state observed before acting.
///
/// # Errors
///
/// Returns a [`ClientCharmError`] if the configuration cannot be applied or
/// registration fails.
pub async fn run_landscape_client(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    status: &impl StatusStore,
    raw_config: &RawConfig,
    hostname: &str,
    paths: &CharmPaths,
) -> Result<RegistrationState> {
    status
        .set(&UnitStatus::maintenance("Configuring landscape client.."))
        .await?;
    set_client_config(fs, raw_config, hostname, paths)?;

    let state = registration_state(runner).await;
    match state {
        RegistrationState::Registered => {
            if !restart_client(runner).await {
                tracing::warn!(service = CLIENT_SERVICE, "restart failed; configuration applies on next start");
            }
            status
                .set(&UnitStatus::active("Client config updated!"))
                .await?;
        }
        RegistrationState::Unregistered => send_registration(runner, status).await?,
    }
    Ok(state)
}

/// Deregister the client. The command's result is only logged.
///
/// # Errors
///
/// Returns an error if the status cannot be set.
pub async fn disable_client(runner: &impl CommandRunner, status: &impl StatusStore) -> Result<()> {
    status
        .set(&UnitStatus::maintenance("Disabling landscape client.."))
        .await?;
    run_external_command(runner, &[CLIENT_CONFIG_CMD, "--silent", "--disable"], None, false).await;
    Ok(())
}
