//! Error types for aconfig-emit

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] aconfig_core::Error),

    #[error(transparent)]
    Fs(#[from] aconfig_fs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two flags map to the same accessor after camelCase conversion
    #[error("flags '{first}' and '{second}' both generate accessor {accessor}()")]
    AccessorCollision {
        accessor: String,
        first: String,
        second: String,
    },

    /// A flag whose accessor is not a valid Java identifier
    #[error("flag '{flag}' generates accessor {accessor}(), which is not a valid Java identifier")]
    InvalidAccessor { flag: String, accessor: String },

    /// A package name that cannot be laid out as a source directory
    #[error("package '{package}' cannot be used as a Java package")]
    InvalidPackage { package: String },

    /// Two emitters produced the same output path
    #[error("more than one emitter writes {path}")]
    DuplicateOutput { path: PathBuf },
}
