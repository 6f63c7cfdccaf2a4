//! Code emitters for resolved aconfig flags
//!
//! - **JavaEmitter**: `Flags.java` accessors and the `Keys.java` manifest
//! - **JsonEmitter**: `aconfig-flags.json` for tooling
//! - **Generator**: resolve, render everything in memory, then write atomically
//! - **check**: compare fresh output against files on disk

pub mod check;
pub mod error;
pub mod generator;
pub mod java;
pub mod json;
pub mod naming;
pub mod registry;
pub mod traits;

pub use check::{CheckReport, CheckStatus, DriftItem};
pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator, generate};
pub use java::JavaEmitter;
pub use json::JsonEmitter;
pub use naming::snake_to_camel;
pub use registry::EmitterRegistry;
pub use traits::{Emitter, GeneratedFile};
