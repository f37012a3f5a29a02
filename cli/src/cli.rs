//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::domain::Trigger;

/// Lifecycle agent that installs, configures and registers Landscape client
#[derive(Parser)]
#[command(
    name = "landscape-client-charm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where configuration comes from and where state goes.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Read option values from a YAML or JSON file instead of `config-get`
    #[arg(long, global = true, env = "LANDSCAPE_CHARM_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for the persisted unit status
    #[arg(long, global = true, env = "LANDSCAPE_CHARM_STATE_DIR", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Prefix applied to every host path
    #[arg(long, global = true, env = "LANDSCAPE_CHARM_ROOT", value_name = "DIR", hide = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add the PPA and install the client package
    Install,

    /// Apply configuration, then restart or register the client
    ConfigChanged,

    /// Deregister the client after the relation is removed
    #[command(name = "relation-departed", alias = "container-relation-departed")]
    RelationDeparted,

    /// Upgrade the client package (action)
    Upgrade,

    /// Register the client with the server (action)
    Register,

    /// Pick the trigger from the orchestrator's dispatch path
    Dispatch {
        /// Path such as `hooks/install` or `actions/upgrade`
        #[arg(long, env = "JUJU_DISPATCH_PATH")]
        path: String,
    },
}

impl Command {
    /// The trigger this subcommand handles.
    ///
    /// # Errors
    ///
    /// Returns an error if a dispatch path names no known trigger.
    pub fn trigger(&self) -> Result<Trigger> {
        Ok(match self {
            Self::Install => Trigger::Install,
            Self::ConfigChanged => Trigger::ConfigChanged,
            Self::RelationDeparted => Trigger::RelationDeparted,
            Self::Upgrade => Trigger::UpgradeAction,
            Self::Register => Trigger::RegisterAction,
            Self::Dispatch { path } => Trigger::from_dispatch_path(path)
                .with_context(|| format!("unknown dispatch path: {path}"))?,
        })
    }
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// Returns `false` when an action event failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger cannot be resolved or the agent's
    /// infrastructure fails.
    pub async fn run(self) -> Result<bool> {
        let Cli {
            json,
            quiet,
            no_color,
            settings,
            command,
        } = self;
        let trigger = command.trigger()?;
        let app = AppContext::new(&AppFlags {
            json,
            quiet,
            no_color,
            settings,
        });
        app.run(trigger).await
    }
}
