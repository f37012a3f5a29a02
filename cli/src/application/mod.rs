//! Application layer — port trait definitions and trigger handling.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::cli`, or `crate::output`.

pub mod ports;
pub mod services;

pub use ports::{
    CommandRunner, ConfigSource, EventLog, HostInfo, LocalFs, PackageManager, StatusStore,
};
pub use services::hooks::{Charm, HookOutcome};
