//! Error types for aconfig-core

use std::path::PathBuf;

/// Result type for aconfig-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing and resolving flags
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No target package was configured
    #[error("flag package is not set, set `package` in the configuration")]
    MissingTargetPackage,

    /// No declaration files were configured
    #[error("no declaration files configured")]
    NoDeclarations,

    /// A required declaration file does not exist
    #[error("no declaration file found at {path}")]
    MissingFile { path: PathBuf },

    /// A declaration file has no `package` line
    #[error("no package declared in {path}")]
    MissingPackage { path: PathBuf },

    /// Package disagreement between files or with the configured package
    #[error("package '{found}' in {path} does not match package '{expected}'")]
    PackageMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },

    /// A flag name is declared twice
    #[error("flag '{name}' is declared more than once (again in {path})")]
    DuplicateFlag { name: String, path: PathBuf },

    /// A flag name is empty or not of the form `[a-zA-Z][a-zA-Z0-9_]*`
    #[error("invalid flag name '{name}' at {path}:{line}")]
    InvalidFlagName {
        name: String,
        path: PathBuf,
        line: usize,
    },

    /// A `}` without an open block, or a block still open at end of file
    #[error("unbalanced braces at {path}:{line}")]
    UnbalancedBlock { path: PathBuf, line: usize },

    /// A `permission` value outside READ_ONLY/READ_WRITE
    #[error("invalid permission '{value}' for {flag} at {path}:{line}")]
    InvalidPermission {
        flag: String,
        value: String,
        path: PathBuf,
        line: usize,
    },

    /// A `state` value outside the recognized literals
    #[error("invalid state '{value}' for {flag} at {path}:{line}")]
    InvalidState {
        flag: String,
        value: String,
        path: PathBuf,
        line: usize,
    },

    /// A `state` or `permission` line before any `name` line
    #[error("'{key}' at {path}:{line} does not follow a flag name")]
    OrphanField {
        key: String,
        path: PathBuf,
        line: usize,
    },

    /// An override names a flag that is not declared
    #[error("flag '{flag}' in {path} is not declared in package '{package}'")]
    UndeclaredFlag {
        flag: String,
        package: String,
        path: PathBuf,
    },

    /// A read-write flag while the release requires all flags read-only
    #[error("read-write flag '{flag}' ({source_desc}) is not allowed, the release configuration requires all flags to be read-only")]
    ReadWriteForbidden { flag: String, source_desc: String },

    /// The release configuration file is malformed
    #[error("invalid release configuration at {path}: {message}")]
    InvalidReleaseConfig { path: PathBuf, message: String },

    /// Filesystem error from aconfig-fs
    #[error(transparent)]
    Fs(#[from] aconfig_fs::Error),
}
