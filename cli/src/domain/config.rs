//! Domain types for orchestrator and client configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::error::ClientCharmError;
use crate::domain::ini::IniDocument;

// ── Constants ────────────────────────────────────────────────────────────────

/// Orchestrator options consumed by the charm itself; never forwarded to the
/// client configuration file.
pub const CHARM_ONLY_CONFIGS: &[&str] = &[
    PPA_KEY,
    DISABLE_UNATTENDED_UPGRADES_KEY,
    ADDITIONAL_CONFIG_KEY,
];

pub const PPA_KEY: &str = "ppa";
pub const DISABLE_UNATTENDED_UPGRADES_KEY: &str = "disable-unattended-upgrades";
pub const ADDITIONAL_CONFIG_KEY: &str = "additional-client-configuration";

/// The only section of the client configuration file the charm writes.
pub const CLIENT_SECTION: &str = "client";

pub const COMPUTER_TITLE: &str = "computer_title";
pub const SSL_CA: &str = "ssl_ca";
pub const SSL_PUBLIC_KEY: &str = "ssl_public_key";

// ── Values ───────────────────────────────────────────────────────────────────

/// A scalar configuration value as supplied by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl ConfigValue {
    /// `false` for null, `false`, zero and the empty string.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Null => false,
        }
    }

    /// Render the value the way it is written to the client config file.
    #[must_use]
    pub fn to_config_string(&self) -> String {
        match self {
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::Null => "None".to_string(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

// ── Raw orchestrator config ──────────────────────────────────────────────────

/// Orchestrator-supplied configuration: hyphen-separated keys to scalars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig(IndexMap<String, ConfigValue>);

impl RawConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Present and not null.
    #[must_use]
    pub fn has_value(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| *v != ConfigValue::Null)
    }

    /// Returns `true` if `key` is set to a truthy value.
    #[must_use]
    pub fn is_truthy(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(ConfigValue::is_truthy)
    }

    /// The value of `key` rendered as text, if set and truthy.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .filter(|v| v.is_truthy())
            .map(ConfigValue::to_config_string)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── Client config ────────────────────────────────────────────────────────────

/// Client configuration vocabulary: underscore-separated keys to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClientConfig(IndexMap<String, ConfigValue>);

impl ClientConfig {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// The value of `key` rendered as text, if present.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key).map(ConfigValue::to_config_string)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ClientConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── Transformation ───────────────────────────────────────────────────────────

/// Convert an orchestrator key to its client spelling.
#[must_use]
pub fn client_key(key: &str) -> String {
    key.replace('-', "_")
}

/// Parse the `additional-client-configuration` option into key/value pairs.
///
/// Returns an empty map when the option is absent or empty. No schema
/// validation is done on the keys.
///
/// # Errors
///
/// Returns [`ClientCharmError::MalformedAdditionalConfig`] if the text has an
/// option before any section header, or has no `[client]` section.
pub fn parse_additional_config(
    raw_config: &RawConfig,
) -> Result<IndexMap<String, String>, ClientCharmError> {
    let Some(raw) = raw_config.text(ADDITIONAL_CONFIG_KEY) else {
        return Ok(IndexMap::new());
    };
    tracing::debug!(raw = ?raw, "received additional-client-configuration");

    let malformed = || ClientCharmError::MalformedAdditionalConfig { raw: raw.clone() };
    let doc = IniDocument::parse(&raw).map_err(|_| malformed())?;
    let client = doc.section(CLIENT_SECTION).ok_or_else(malformed)?.clone();

    tracing::debug!(parsed = ?client, "parsed additional-client-configuration");
    Ok(client)
}

/// Build the client configuration from the orchestrator configuration,
/// without certificate resolution.
///
/// Drops charm-only keys, renames hyphens to underscores, overlays the
/// additional configuration, then defaults `computer_title`.
///
/// # Errors
///
/// Returns an error if the additional configuration is malformed.
pub fn build_client_config(
    raw_config: &RawConfig,
    default_computer_title: &str,
) -> Result<ClientConfig, ClientCharmError> {
    let mut config: ClientConfig = raw_config
        .iter()
        .filter(|(key, _)| !CHARM_ONLY_CONFIGS.contains(&key.as_str()))
        .map(|(key, value)| (client_key(key), value.clone()))
        .collect();

    for (key, value) in parse_additional_config(raw_config)? {
        config.insert(key, value);
    }

    if !config.contains_key(COMPUTER_TITLE) {
        config.insert(COMPUTER_TITLE, default_computer_title);
    }
    Ok(config)
}

/// The certificate option to resolve, if any: `ssl_ca` wins over the
/// deprecated `ssl_public_key`.
#[must_use]
pub fn certificate_option(config: &ClientConfig) -> Option<(&'static str, String)> {
    [SSL_CA, SSL_PUBLIC_KEY].into_iter().find_map(|key| {
        config
            .get(key)
            .filter(|v| v.is_truthy())
            .map(|v| (key, v.to_config_string()))
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
