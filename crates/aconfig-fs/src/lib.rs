//! Filesystem access for the aconfig flag resolver
//!
//! Provides scoped text reads, atomic writes, checksums, override tree
//! discovery and format-agnostic configuration loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use layout::{OVERRIDE_EXTENSION, OverrideTree};
