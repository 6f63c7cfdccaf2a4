//! Name conversions for generated sources

use crate::{Error, Result};
use std::path::PathBuf;

/// Convert a snake_case flag name to a camelCase accessor name.
///
/// Every underscore is removed and the character after it is uppercased.
/// The first character keeps its case, so `new_feature_flag` becomes
/// `newFeatureFlag` and `Legacy_flag` becomes `LegacyFlag`.
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_",
];

/// Whether `name` can be used as a Java method name.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !JAVA_RESERVED.contains(&name)
}

/// Source directory for a dotted package, e.g. `com/example/flags`.
pub fn package_dir(package: &str) -> Result<PathBuf> {
    let valid = !package.is_empty()
        && package.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });
    if !valid {
        return Err(Error::InvalidPackage {
            package: package.to_string(),
        });
    }
    Ok(package.split('.').collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("new_feature_flag", "newFeatureFlag")]
    #[case("flag", "flag")]
    #[case("Legacy_flag", "LegacyFlag")]
    #[case("a_b_c", "aBC")]
    #[case("with__double", "withDouble")]
    #[case("trailing_", "trailing")]
    #[case("", "")]
    fn converts_snake_case(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(snake_to_camel(input), expected);
    }

    #[rstest]
    #[case("alphaFlag", true)]
    #[case("$flag", true)]
    #[case("flag2", true)]
    #[case("", false)]
    #[case("2flag", false)]
    #[case("bad name", false)]
    #[case("\"alphaFlag\"#renamed", false)]
    #[case("new", false)]
    #[case("true", false)]
    fn java_identifiers(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_java_identifier(name), expected);
    }

    #[test]
    fn package_dir_splits_segments() {
        assert_eq!(
            package_dir("com.example.flags").unwrap(),
            PathBuf::from("com").join("example").join("flags")
        );
    }

    #[rstest]
    #[case("")]
    #[case("com..flags")]
    #[case("com/example")]
    #[case(".com")]
    fn package_dir_rejects_bad_names(#[case] package: &str) {
        assert!(matches!(
            package_dir(package),
            Err(Error::InvalidPackage { .. })
        ));
    }

    proptest! {
        #[test]
        fn names_without_underscores_are_unchanged(name in "[a-zA-Z0-9]{0,24}") {
            prop_assert_eq!(snake_to_camel(&name), name);
        }

        #[test]
        fn output_never_contains_underscores(name in "[a-z_]{0,24}") {
            prop_assert!(!snake_to_camel(&name).contains('_'));
        }
    }
}
