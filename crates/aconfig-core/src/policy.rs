//! Resolution policies

use crate::state::Permission;
use serde::{Deserialize, Serialize};

/// How `READ_WRITE` permissions from overrides are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritablePolicy {
    /// Accept `READ_WRITE` but emit the flag read-only, with a warning
    Downgrade,
    /// Emit `READ_WRITE` flags with a runtime-overridable accessor
    #[default]
    Honor,
    /// Fail on any `READ_WRITE` flag
    Reject,
}

impl WritablePolicy {
    /// Map the "honor read-write" configuration switch to a policy.
    pub fn from_honor(honor_read_write: bool) -> Self {
        if honor_read_write {
            Self::Honor
        } else {
            Self::Downgrade
        }
    }
}

/// What to do with overrides naming flags that are not declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndeclaredPolicy {
    /// Warn and leave the flag out of the output
    #[default]
    Ignore,
    /// Fail the run
    Error,
}

/// How unrecognized `state` literals are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatePolicy {
    /// Fail with an invalid state error
    #[default]
    Strict,
    /// Coerce to disabled with a warning
    Legacy,
}

/// Inputs to the resolver besides the files themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    pub package: String,
    pub writable: WritablePolicy,
    pub undeclared: UndeclaredPolicy,
    pub states: StatePolicy,
    /// Permission for flags no layer assigns one to
    pub default_permission: Permission,
}

impl ResolveOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            writable: WritablePolicy::default(),
            undeclared: UndeclaredPolicy::default(),
            states: StatePolicy::default(),
            default_permission: Permission::default(),
        }
    }

    pub fn with_writable(mut self, writable: WritablePolicy) -> Self {
        self.writable = writable;
        self
    }

    pub fn with_undeclared(mut self, undeclared: UndeclaredPolicy) -> Self {
        self.undeclared = undeclared;
        self
    }

    pub fn with_states(mut self, states: StatePolicy) -> Self {
        self.states = states;
        self
    }

    pub fn with_default_permission(mut self, permission: Permission) -> Self {
        self.default_permission = permission;
        self
    }
}
