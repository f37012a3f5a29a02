//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, package
//! management, filesystem access, and the status file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::cli` or `crate::output` are forbidden.

pub mod apt;
pub mod command_runner;
pub mod config;
pub mod event;
pub mod fs;
pub mod host;
pub mod state;
