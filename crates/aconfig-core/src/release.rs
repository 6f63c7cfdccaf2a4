//! Release configuration values
//!
//! A release repository can require every flag to be read-only through a
//! value file such as:
//!
//! ```text
//! name: "RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY"
//! value: {
//!   bool_value: true
//! }
//! ```

use crate::syntax::{Line, lex};
use crate::{Error, Result};
use std::path::Path;

/// Name of the release value that forbids read-write flags.
pub const REQUIRE_ALL_READ_ONLY: &str = "RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY";

/// Read the require-all-read-only value file at `path`.
pub fn require_all_read_only(path: &Path) -> Result<bool> {
    let content = aconfig_fs::io::read_text(path).map_err(|e| match e {
        aconfig_fs::Error::NotFound { path } => Error::MissingFile { path },
        other => Error::Fs(other),
    })?;
    parse_require_all_read_only(path, &content)
}

/// Parse require-all-read-only value file content.
pub fn parse_require_all_read_only(path: &Path, content: &str) -> Result<bool> {
    let invalid = |message: String| Error::InvalidReleaseConfig {
        path: path.to_path_buf(),
        message,
    };

    let mut in_value = false;
    let mut named = false;
    let mut value = None;

    for line in lex(content) {
        match line {
            Line::Field { key: "name", value: name, .. } if !in_value => {
                if name != REQUIRE_ALL_READ_ONLY {
                    return Err(invalid(format!(
                        "expected value '{REQUIRE_ALL_READ_ONLY}', found '{name}'"
                    )));
                }
                named = true;
            }
            Line::Open { label: "value", .. } => in_value = true,
            Line::Close { .. } => in_value = false,
            Line::Field {
                key: "bool_value",
                value: literal,
                ..
            } if in_value => {
                value = Some(match literal {
                    "true" => true,
                    "false" => false,
                    other => return Err(invalid(format!("invalid bool_value '{other}'"))),
                });
            }
            _ => {}
        }
    }

    if !named {
        return Err(invalid(format!("missing name '{REQUIRE_ALL_READ_ONLY}'")));
    }
    // An unset value keeps read-write flags allowed
    Ok(value.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<bool> {
        parse_require_all_read_only(Path::new("value.textproto"), content)
    }

    #[test]
    fn reads_true_value() {
        let content = "name: \"RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY\"\nvalue: {\n  bool_value: true\n}\n";
        assert!(parse(content).unwrap());
    }

    #[test]
    fn reads_false_value() {
        let content = "name: \"RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY\"\nvalue {\n  bool_value: false\n}\n";
        assert!(!parse(content).unwrap());
    }

    #[test]
    fn missing_value_allows_read_write() {
        assert!(!parse("name: \"RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY\"\n").unwrap());
    }

    #[test]
    fn wrong_name_is_rejected() {
        let err = parse("name: \"RELEASE_OTHER\"\nvalue: {\n bool_value: true\n}\n").unwrap_err();
        assert!(matches!(err, Error::InvalidReleaseConfig { .. }));
    }

    #[test]
    fn bad_literal_is_rejected() {
        let content = "name: \"RELEASE_ACONFIG_REQUIRE_ALL_READ_ONLY\"\nvalue: {\n bool_value: maybe\n}\n";
        assert!(parse(content).is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let err = require_all_read_only(&temp.path().join("absent.textproto")).unwrap_err();
        assert!(matches!(err, Error::MissingFile { .. }));
    }
}
