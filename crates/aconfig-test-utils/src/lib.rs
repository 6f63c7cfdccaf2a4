//! Shared test utilities for the aconfig workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each hand-write declaration files and override trees. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`project`]: [`FlagProject`] builder for declaration files, override
//!   trees and configuration files
//! - [`logs`]: capture of log output for assertions

pub mod logs;
pub mod project;

pub use project::FlagProject;
