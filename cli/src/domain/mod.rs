//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs`, or `std::process`. All functions are synchronous and
//! take data in, returning data out.

pub mod certificate;
pub mod config;
pub mod error;
pub mod ini;
pub mod paths;
pub mod process;
pub mod proxy;
pub mod status;
pub mod trigger;

pub use config::{ClientConfig, ConfigValue, RawConfig, build_client_config, parse_additional_config};
pub use error::{ClientCharmError, IniError, PackageError};
pub use ini::IniDocument;
pub use paths::CharmPaths;
pub use process::ProcessResult;
pub use status::UnitStatus;
pub use trigger::Trigger;
