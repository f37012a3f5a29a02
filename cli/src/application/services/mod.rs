//! Application services — trigger handling.
//!
//! Each service module implements one piece of charm behaviour by composing
//! domain logic with port trait calls. Services import only from
//! `crate::domain` and `crate::application::ports` — never from
//! `crate::infra`, `crate::cli`, or `crate::output`.

pub mod client_config;
pub mod hooks;
pub mod lifecycle;
pub mod package;
pub mod ppa;
pub mod process;
pub mod unattended;

#[cfg(test)]
pub(crate) mod test_support;
