//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive scanning,
//! saving and logging, plus helpers to load it from disk.

mod load;
mod schema;

pub use load::{InvalidSetting, default_state_dir, resolve_config_path};
pub use schema::*;

#[cfg(test)]
pub(crate) mod tests;
