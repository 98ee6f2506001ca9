//! Configuration loader and schema types.
//!
//! This module exposes the settings schema (store location and timeouts,
//! operator identity, ingest rules, runtime knobs) and helpers to load it
//! from disk and the environment.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
