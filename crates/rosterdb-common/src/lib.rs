//! RosterDB common errors and configuration.
//!
//! This crate provides shared definitions used by the storage engine.

pub mod config;
pub mod error;

pub use config::{DuplicateIdPolicy, EngineConfig, MAX_HEAP_CAPACITY};
pub use error::{Result, RosterError};
