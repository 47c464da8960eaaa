//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML configuration file from the XDG config directory.
//! - Writing it back when asked to.
//! - Providing sensible defaults when the file does not exist yet.

pub mod config;
