//! squonk: per-group playlist rotation over a durable shared store.
//!
//! Groups register once, the operator uploads tracks that are appended to
//! every group's queue, and each group rotates through its own queue
//! independently. All state lives in one JSON snapshot owned by
//! [`store::PlaylistStore`], which serializes every mutation.

pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod library;
pub mod rotation;
pub mod runtime;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{Error, Result};
