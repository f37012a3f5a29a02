//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs`, or `std::process`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Charm errors ──────────────────────────────────────────────────────────────

/// Errors that end a trigger handler with a blocked status.
///
/// The `Display` text is the short message shown to the operator; full
/// diagnostics go to the log.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientCharmError {
    #[error("Malformed additional-client-configuration: {raw:?}")]
    MalformedAdditionalConfig { raw: String },

    #[error("Certificate does not exist!")]
    CertificateUnavailable,

    #[error("Failed to add PPA!")]
    PpaFailed,

    #[error("Failed to install client!")]
    InstallFailed,

    #[error("Registration failed!")]
    RegistrationFailed,

    #[error("Failed to write client configuration: {0}")]
    ConfigWrite(String),

    #[error("Failed to update unattended-upgrades override: {0}")]
    AptOverride(String),

    #[error("Failed to upgrade client: {0}")]
    UpgradeFailed(String),
}

// ── INI errors ────────────────────────────────────────────────────────────────

/// Errors raised while parsing an INI document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IniError {
    #[error("line {line}: option found before any section header: {content:?}")]
    MissingSectionHeader { line: usize, content: String },
}

// ── Package errors ────────────────────────────────────────────────────────────

/// Errors raised by the package manager adapter.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Package '{0}' is not installed.")]
    NotInstalled(String),

    #[error("'{command}' failed:\n{output}")]
    CommandFailed { command: String, output: String },
}
