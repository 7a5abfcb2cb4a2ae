// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for convlint.
//!
//! This module handles discovering, parsing and validating the rule
//! configuration. A loaded [`LintConfig`] is never mutated afterwards.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_config_file, find_config_file_from, load_config, parse_config};
pub use schema::*;
