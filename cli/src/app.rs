//! Application context — wires production adapters to the charm.
//!
//! `AppContext` is built once from the top-level flags and owns everything a
//! trigger needs: resolved paths, output settings and the config source.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::application::{Charm, ConfigSource, HookOutcome, HostInfo};
use crate::cli::SettingsArgs;
use crate::domain::{CharmPaths, RawConfig, Trigger};
use crate::infra::apt::AptPackageManager;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::{HookToolConfig, YamlConfigFile};
use crate::infra::event::ActionEvent;
use crate::infra::fs::HostFs;
use crate::infra::host::ProcHostInfo;
use crate::infra::state::StatusFile;
use crate::output::{OutputContext, json};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub json: bool,
    pub quiet: bool,
    pub no_color: bool,
    pub settings: SettingsArgs,
}

/// Unified application context.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Resolved host paths.
    pub paths: CharmPaths,
    /// Settings the context was built from.
    pub settings: SettingsArgs,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            paths: resolve_paths(&flags.settings),
            settings: flags.settings.clone(),
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Handle `trigger` with production adapters and render the outcome.
    ///
    /// Returns `false` when an action event failed.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the trigger
    /// hits an infrastructure failure.
    pub async fn run(&self, trigger: Trigger) -> Result<bool> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let config = self.load_config().await?;
        let hostname = ProcHostInfo::default()
            .hostname()
            .context("cannot determine host name")?;
        tracing::debug!(%hostname, paths = ?self.paths, "resolved host");

        let charm = Charm {
            runner: TokioCommandRunner::new(),
            packages: AptPackageManager::new(TokioCommandRunner::new(), env.clone()),
            fs: HostFs,
            status: StatusFile::with_path(self.paths.status_file()),
            config,
            hostname,
            env,
            paths: self.paths.clone(),
        };

        let event = ActionEvent::new();
        let outcome = charm.dispatch(trigger, &event).await?;
        self.render(&outcome, &event)?;
        Ok(!outcome.event_failed)
    }

    async fn load_config(&self) -> Result<RawConfig> {
        match &self.settings.config {
            Some(path) => YamlConfigFile::new(path.clone()).load().await,
            None => HookToolConfig::new(TokioCommandRunner::new()).load().await,
        }
    }

    fn render(&self, outcome: &HookOutcome, event: &ActionEvent) -> Result<()> {
        let messages = event.messages();
        let failure = event.failure();
        if self.is_json() {
            println!(
                "{}",
                json::format_outcome(outcome, &messages, failure.as_deref())?
            );
        } else {
            self.output.outcome(outcome, &messages, failure.as_deref());
        }
        Ok(())
    }
}

/// Default paths, re-rooted and with the state directory overridden as the
/// settings ask.
#[must_use]
pub fn resolve_paths(settings: &SettingsArgs) -> CharmPaths {
    let paths = settings
        .root
        .as_deref()
        .map_or_else(CharmPaths::default, CharmPaths::under_root);
    match &settings.state_dir {
        Some(dir) => paths.with_state_dir(dir.clone()),
        None => paths,
    }
}
