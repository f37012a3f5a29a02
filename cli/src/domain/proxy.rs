//! Proxy environment for `add-apt-repository`.
//!
//! `add-apt-repository` ignores apt's and the model's proxy settings, so the
//! classic `http_proxy` / `https_proxy` variables are set explicitly for that
//! one call.

use std::collections::HashMap;

use crate::domain::config::RawConfig;

/// Environment variables handled, lower-case as the tools expect.
pub const PROXY_VARS: &[&str] = &["http_proxy", "https_proxy"];

/// Build the child environment from `inherited`.
///
/// For each proxy variable an explicit charm option (`http-proxy`,
/// `https-proxy`) wins; otherwise the model-level `JUJU_CHARM_HTTP(S)_PROXY`
/// is copied if present. `inherited` is not modified.
#[must_use]
pub fn build_proxy_env(
    raw_config: &RawConfig,
    inherited: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut env = inherited.clone();
    for var in PROXY_VARS {
        let option = var.replace('_', "-");
        let model_var = format!("JUJU_CHARM_{}", var.to_uppercase());

        if let Some(value) = raw_config.get(&option).filter(|_| raw_config.has_value(&option)) {
            env.insert((*var).to_string(), value.to_config_string());
        } else if let Some(value) = inherited.get(&model_var) {
            env.insert((*var).to_string(), value.clone());
        }

        if let Some(value) = env.get(*var) {
            tracing::info!(variable = var, value = %value, "add-apt-repository proxy set");
        }
    }
    env
}
