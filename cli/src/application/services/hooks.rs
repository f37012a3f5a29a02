//! Trigger dispatch.
//!
//! [`Charm`] owns the collaborators and maps each [`Trigger`] to its handler.
//! Handlers turn a [`ClientCharmError`] into a blocked status; this is the
//! only place a blocked status is set. Any other error is returned to the
//! caller.

use std::collections::HashMap;

use anyhow::Result;

use crate::application::ports::{CommandRunner, EventLog, LocalFs, PackageManager, StatusStore};
use crate::application::services::lifecycle::{disable_client, run_landscape_client, send_registration};
use crate::application::services::package::{client_installed, install_client, upgrade_client};
use crate::application::services::ppa::add_ppa;
use crate::application::services::unattended::apply_unattended_upgrades;
use crate::domain::{CharmPaths, ClientCharmError, RawConfig, Trigger, UnitStatus};

/// Result of handling one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    pub trigger: Trigger,
    /// Unit status after the handler ran.
    pub status: Option<UnitStatus>,
    /// An action event was marked failed.
    pub event_failed: bool,
}

/// The charm and its collaborators.
pub struct Charm<R, P, F, S> {
    pub runner: R,
    pub packages: P,
    pub fs: F,
    pub status: S,
    /// Orchestrator configuration for this invocation.
    pub config: RawConfig,
    /// Default computer title.
    pub hostname: String,
    /// Environment the charm was started with.
    pub env: HashMap<String, String>,
    pub paths: CharmPaths,
}

impl<R, P, F, S> Charm<R, P, F, S>
where
    R: CommandRunner,
    P: PackageManager,
    F: LocalFs,
    S: StatusStore,
{
    /// Handle `trigger` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures outside the charm's error
    /// taxonomy (e.g. the status store is unwritable).
    pub async fn dispatch(&self, trigger: Trigger, event: &impl EventLog) -> Result<HookOutcome> {
        tracing::info!(%trigger, "handling trigger");
        let event_failed = match trigger {
            Trigger::Install => self.on_install().await.map(|()| false)?,
            Trigger::ConfigChanged => self.on_config_changed().await.map(|()| false)?,
            Trigger::RelationDeparted => self.on_relation_departed().await.map(|()| false)?,
            Trigger::UpgradeAction => self.on_upgrade(event).await?,
            Trigger::RegisterAction => self.on_register(event).await?,
        };
        Ok(HookOutcome {
            trigger,
            status: self.status.current().await?,
            event_failed,
        })
    }

    async fn on_install(&self) -> Result<()> {
        let result = self.install().await;
        self.block_on_charm_error(result).await
    }

    async fn install(&self) -> Result<()> {
        add_ppa(&self.runner, &self.status, &self.config, &self.env).await?;
        install_client(&self.packages, &self.status).await
    }

    async fn on_config_changed(&self) -> Result<()> {
        if let Err(e) = apply_unattended_upgrades(&self.fs, &self.config, &self.paths.apt_override) {
            return self.block_on_charm_error(Err(e.into())).await;
        }

        if !client_installed(&self.packages).await? {
            tracing::error!("Landscape client package not installed.");
            return Ok(());
        }

        let result = self.configure().await;
        self.block_on_charm_error(result).await
    }

    async fn configure(&self) -> Result<()> {
        add_ppa(&self.runner, &self.status, &self.config, &self.env).await?;
        run_landscape_client(
            &self.runner,
            &self.fs,
            &self.status,
            &self.config,
            &self.hostname,
            &self.paths,
        )
        .await?;
        Ok(())
    }

    async fn on_relation_departed(&self) -> Result<()> {
        disable_client(&self.runner, &self.status).await
    }

    /// Returns `true` if the event failed.
    async fn on_upgrade(&self, event: &impl EventLog) -> Result<bool> {
        let previous = self.status.current().await?;
        if previous.as_ref().is_some_and(UnitStatus::is_maintenance) {
            reject(event, "Please wait until charm is ready before upgrading.");
            return Ok(true);
        }

        match self.upgrade(event).await {
            Ok(()) => {
                // Adding the PPA leaves a maintenance status behind.
                let current = self.status.current().await?;
                if let Some(previous) = previous {
                    if current.as_ref() != Some(&previous) {
                        self.status.set(&previous).await?;
                    }
                }
                Ok(false)
            }
            Err(e) => {
                fail_event(event, "Could not upgrade landscape client!", &e);
                self.status.set(&UnitStatus::blocked(e.to_string())).await?;
                Ok(true)
            }
        }
    }

    async fn upgrade(&self, event: &impl EventLog) -> Result<()> {
        add_ppa(&self.runner, &self.status, &self.config, &self.env).await?;
        upgrade_client(&self.packages, event)
            .await
            .map_err(|e| ClientCharmError::UpgradeFailed(format!("{e:#}")))?;
        Ok(())
    }

    /// Returns `true` if the event failed.
    async fn on_register(&self, event: &impl EventLog) -> Result<bool> {
        let current = self.status.current().await?;
        if current.as_ref().is_some_and(UnitStatus::is_maintenance) {
            reject(event, "Please wait until charm is ready before registering.");
            return Ok(true);
        }

        tracing::info!("Registering landscape client..");
        event.log("Registering landscape client..");
        match send_registration(&self.runner, &self.status).await {
            Ok(()) => {
                event.log("Registration successful!");
                Ok(false)
            }
            Err(e) => {
                fail_event(event, "Could not register landscape client!", &e);
                self.status.set(&UnitStatus::blocked(e.to_string())).await?;
                Ok(true)
            }
        }
    }

    /// Set a blocked status for a [`ClientCharmError`]; pass anything else on.
    async fn block_on_charm_error(&self, result: Result<()>) -> Result<()> {
        let Err(e) = result else {
            return Ok(());
        };
        match e.downcast::<ClientCharmError>() {
            Ok(charm_error) => {
                tracing::error!(error = %charm_error, "blocked");
                self.status
                    .set(&UnitStatus::blocked(charm_error.to_string()))
                    .await
            }
            Err(other) => Err(other),
        }
    }
}

fn reject(event: &impl EventLog, message: &str) {
    tracing::error!("{message}");
    event.log(message);
    event.fail(message);
}

fn fail_event(event: &impl EventLog, message: &str, error: &anyhow::Error) {
    tracing::error!(error = %format!("{error:#}"), "{message}");
    event.log(message);
    event.log(&format!("{error:?}"));
    event.fail(message);
}
