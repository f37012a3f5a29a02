//! Infrastructure implementation of the `PackageManager` port on top of
//! `apt-get` and `dpkg-query`.

use std::collections::HashMap;

use anyhow::Result;

use crate::application::ports::{CommandRunner, PackageManager};
use crate::domain::PackageError;
use crate::domain::process::combine_output;

const APT_GET: &str = "apt-get";
const DPKG_QUERY: &str = "dpkg-query";

/// `dpkg-query` status for a fully installed package.
const INSTALLED_STATUS: &str = "install ok installed";

/// Debian package manager driven through a [`CommandRunner`].
pub struct AptPackageManager<R> {
    runner: R,
    env: HashMap<String, String>,
}

impl<R: CommandRunner> AptPackageManager<R> {
    /// `inherited_env` is passed to `apt-get` with
    /// `DEBIAN_FRONTEND=noninteractive` added.
    pub fn new(runner: R, inherited_env: HashMap<String, String>) -> Self {
        let mut env = inherited_env;
        env.insert("DEBIAN_FRONTEND".to_string(), "noninteractive".to_string());
        Self { runner, env }
    }

    async fn apt_get(&self, args: &[&str]) -> Result<()> {
        let command = std::iter::once(APT_GET)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(%command, "running");
        let output = self.runner.run_with_env(APT_GET, args, &self.env).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(PackageError::CommandFailed {
                command,
                output: combine_output(&output.stdout, &output.stderr),
            }
            .into())
        }
    }
}

impl<R: CommandRunner> PackageManager for AptPackageManager<R> {
    async fn add_package(&self, name: &str) -> Result<()> {
        self.apt_get(&["install", "-y", name]).await
    }

    async fn installed_version(&self, name: &str) -> Result<Option<String>> {
        let output = self
            .runner
            .run(DPKG_QUERY, &["-W", "--showformat=${Status}\t${Version}", name])
            .await?;
        // Unknown packages make dpkg-query exit non-zero.
        if !output.status.success() {
            return Ok(None);
        }
        Ok(parse_dpkg_status(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn update(&self) -> Result<()> {
        self.apt_get(&["update"]).await
    }

    /// Installs `name` if absent, otherwise upgrades it to the candidate
    /// version.
    async fn ensure_latest(&self, name: &str) -> Result<()> {
        self.apt_get(&["install", "-y", name]).await
    }
}

/// Version from a `${Status}\t${Version}` line, if the package is installed.
fn parse_dpkg_status(stdout: &str) -> Option<String> {
    let (status, version) = stdout.trim().split_once('\t')?;
    (status == INSTALLED_STATUS && !version.is_empty()).then(|| version.to_string())
}
