//! Infrastructure implementations of the `ConfigSource` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ConfigSource};
use crate::domain::RawConfig;
use crate::domain::process::combine_output;

/// Orchestrator hook tool that prints the unit configuration.
pub const CONFIG_GET: &str = "config-get";

/// Configuration read from a YAML (or JSON) file of option values.
pub struct YamlConfigFile {
    path: PathBuf,
}

impl YamlConfigFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigSource for YamlConfigFile {
    async fn load(&self) -> Result<RawConfig> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<RawConfig> {
            if !path.exists() {
                return Ok(RawConfig::default());
            }
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            if content.trim().is_empty() {
                return Ok(RawConfig::default());
            }
            serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
        })
        .await
        .context("config load task panicked")?
    }
}

/// Configuration read from the orchestrator with `config-get --format=json`.
pub struct HookToolConfig<R> {
    runner: R,
}

impl<R: CommandRunner> HookToolConfig<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ConfigSource for HookToolConfig<R> {
    async fn load(&self) -> Result<RawConfig> {
        let output = self
            .runner
            .run(CONFIG_GET, &["--format=json"])
            .await
            .context("cannot query charm configuration")?;
        anyhow::ensure!(
            output.status.success(),
            "{CONFIG_GET} failed: {}",
            combine_output(&output.stdout, &output.stderr)
        );
        serde_json::from_slice(&output.stdout).context("cannot parse config-get output")
    }
}
