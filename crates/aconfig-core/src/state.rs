//! Flag state and permission literals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A literal that is not a recognized state or permission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized literal '{0}'")]
pub struct UnknownLiteral(pub String);

/// Build-time state of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagState {
    #[default]
    Disabled,
    Enabled,
}

impl FlagState {
    /// The resolved boolean value.
    pub fn as_bool(self) -> bool {
        matches!(self, FlagState::Enabled)
    }
}

impl FromStr for FlagState {
    type Err = UnknownLiteral;

    /// Accepts `ENABLED`/`DISABLED` and the legacy `true`/`false`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENABLED" | "true" => Ok(FlagState::Enabled),
            "DISABLED" | "false" => Ok(FlagState::Disabled),
            other => Err(UnknownLiteral(other.to_string())),
        }
    }
}

impl From<bool> for FlagState {
    fn from(value: bool) -> Self {
        if value {
            FlagState::Enabled
        } else {
            FlagState::Disabled
        }
    }
}

impl fmt::Display for FlagState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagState::Disabled => write!(f, "DISABLED"),
            FlagState::Enabled => write!(f, "ENABLED"),
        }
    }
}

/// Whether a flag may be changed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    #[default]
    ReadOnly,
    ReadWrite,
}

impl Permission {
    pub fn is_read_write(self) -> bool {
        matches!(self, Permission::ReadWrite)
    }
}

impl FromStr for Permission {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READ_ONLY" => Ok(Permission::ReadOnly),
            "READ_WRITE" => Ok(Permission::ReadWrite),
            other => Err(UnknownLiteral(other.to_string())),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::ReadOnly => write!(f, "READ_ONLY"),
            Permission::ReadWrite => write!(f, "READ_WRITE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ENABLED", FlagState::Enabled)]
    #[case("true", FlagState::Enabled)]
    #[case("DISABLED", FlagState::Disabled)]
    #[case("false", FlagState::Disabled)]
    fn state_literals(#[case] literal: &str, #[case] expected: FlagState) {
        assert_eq!(literal.parse::<FlagState>().unwrap(), expected);
    }

    #[rstest]
    #[case("enabled")]
    #[case("TRUE")]
    #[case("1")]
    #[case("")]
    fn unknown_state_literals_fail(#[case] literal: &str) {
        let err = literal.parse::<FlagState>().unwrap_err();
        assert_eq!(err, UnknownLiteral(literal.to_string()));
    }

    #[test]
    fn permission_literals() {
        assert_eq!("READ_ONLY".parse::<Permission>().unwrap(), Permission::ReadOnly);
        assert_eq!("READ_WRITE".parse::<Permission>().unwrap(), Permission::ReadWrite);
        assert!("WRITE_ONLY".parse::<Permission>().is_err());
    }

    #[test]
    fn permission_deserializes_from_screaming_case() {
        #[derive(Deserialize)]
        struct Holder {
            permission: Permission,
        }
        let holder: Holder = toml::from_str("permission = \"READ_WRITE\"").unwrap();
        assert_eq!(holder.permission, Permission::ReadWrite);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for state in [FlagState::Enabled, FlagState::Disabled] {
            assert_eq!(state.to_string().parse::<FlagState>().unwrap(), state);
        }
    }
}
