// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for agentlint.
//!
//! This module handles loading, parsing, and merging configuration from
//! various sources (files, defaults).

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{find_project_config_from, find_user_config_file, load_config, merge_configs};
pub use schema::*;
