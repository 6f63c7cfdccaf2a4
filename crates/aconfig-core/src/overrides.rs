//! Override file parsing
//!
//! Override files use the same line grammar as declarations:
//!
//! ```text
//! flag_value {
//!   package: "com.example.flags"
//!   name: "alpha_flag"
//!   state: ENABLED
//!   permission: READ_ONLY
//! }
//! ```
//!
//! Parsing only extracts the recognized fields in order. Interpreting the
//! stream (which flag a `state` belongs to) is left to the resolver.

use crate::Result;
use crate::syntax::{Line, lex};
use std::fmt;
use std::path::Path;

/// Keys recognized in override files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideKey {
    Package,
    Name,
    State,
    Permission,
}

impl OverrideKey {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "package" => Some(Self::Package),
            "name" => Some(Self::Name),
            "state" => Some(Self::State),
            "permission" => Some(Self::Permission),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Name => "name",
            Self::State => "state",
            Self::Permission => "permission",
        }
    }
}

impl fmt::Display for OverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recognized field of an override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideField {
    pub key: OverrideKey,
    pub value: String,
    pub line_no: usize,
}

/// Extract the recognized fields of override file content, in order.
pub fn parse_override_fields(content: &str) -> Vec<OverrideField> {
    lex(content)
        .into_iter()
        .filter_map(|line| match line {
            Line::Field {
                key,
                value,
                line_no,
            } => OverrideKey::from_key(key).map(|key| OverrideField {
                key,
                value: value.to_string(),
                line_no,
            }),
            Line::Open { .. } | Line::Close { .. } => None,
        })
        .collect()
}

/// Read an override file. A missing file contributes no fields.
pub fn read_override_file(path: &Path) -> Result<Vec<OverrideField>> {
    match aconfig_fs::io::read_optional_text(path)? {
        Some(content) => Ok(parse_override_fields(&content)),
        None => {
            tracing::debug!(path = %path.display(), "Override file missing, treated as empty");
            Ok(Vec::new())
        }
    }
}
