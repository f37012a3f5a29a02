//! Adding the client's package archive.

use std::collections::HashMap;

use anyhow::Result;

use crate::application::ports::{CommandRunner, StatusStore};
use crate::application::services::process::run_external_command;
use crate::domain::config::PPA_KEY;
use crate::domain::proxy::build_proxy_env;
use crate::domain::{ClientCharmError, RawConfig, UnitStatus};

pub const ADD_APT_REPOSITORY: &str = "add-apt-repository";

/// Add the configured PPA, if any, with proxy variables derived from the
/// configuration and `inherited_env`.
///
/// # Errors
///
/// Returns [`ClientCharmError::PpaFailed`] if `add-apt-repository` fails.
pub async fn add_ppa(
    runner: &impl CommandRunner,
    status: &impl StatusStore,
    raw_config: &RawConfig,
    inherited_env: &HashMap<String, String>,
) -> Result<()> {
    let Some(ppa) = raw_config.text(PPA_KEY) else {
        return Ok(());
    };
    status.set(&UnitStatus::maintenance("Adding client PPA..")).await?;

    let env = build_proxy_env(raw_config, inherited_env);
    if !run_external_command(runner, &[ADD_APT_REPOSITORY, "-y", &ppa], Some(&env), false).await {
        return Err(ClientCharmError::PpaFailed.into());
    }
    Ok(())
}
