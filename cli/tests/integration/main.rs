//! Integration tests for the landscape client charm binary
//!
//! These tests spawn the actual binary with every host path re-rooted into a
//! temporary directory.

mod cli_tests;
