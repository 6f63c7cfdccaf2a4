//! Java accessor and writable-keys emitter
//!
//! Renders two classes into the flag package:
//!
//! - `Flags.java`: one `public static boolean` accessor per flag. Read-only
//!   flags return their resolved literal, writable flags ask the runtime
//!   flag store with the resolved value as fallback.
//! - `Keys.java`: the ordered names of writable flags for the runtime
//!   settings screen.

use crate::naming::{is_java_identifier, package_dir, snake_to_camel};
use crate::traits::{Emitter, GeneratedFile};
use crate::{Error, Result};
use aconfig_core::{OutputKind, ResolvedFlag, ResolvedTable};
use std::collections::HashMap;
use std::path::PathBuf;

/// Runtime store class of the companion library.
pub const DEFAULT_STORE_CLASS: &str = "writableFlag";

const HEADER: &str = "// Generated by aconfig. Do not edit.\n";

/// Emitter for `Flags.java` and `Keys.java`.
#[derive(Debug, Clone)]
pub struct JavaEmitter {
    store_class: String,
    keys_dir: Option<PathBuf>,
}

impl Default for JavaEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaEmitter {
    pub fn new() -> Self {
        Self {
            store_class: DEFAULT_STORE_CLASS.to_string(),
            keys_dir: None,
        }
    }

    /// Use another runtime store class. A dotted name is imported.
    pub fn with_store_class(mut self, store_class: impl Into<String>) -> Self {
        self.store_class = store_class.into();
        self
    }

    /// Write `Keys.java` under `dir` instead of the output directory.
    pub fn with_keys_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.keys_dir = Some(dir.into());
        self
    }

    /// Simple class name and optional import of the store class.
    fn store(&self) -> (&str, Option<&str>) {
        match self.store_class.rsplit_once('.') {
            Some((_, simple)) => (simple, Some(self.store_class.as_str())),
            None => (self.store_class.as_str(), None),
        }
    }

    fn render_flags(&self, table: &ResolvedTable, accessors: &[(String, &ResolvedFlag)]) -> String {
        let (store, import) = self.store();
        let mut out = String::new();

        out.push_str(HEADER);
        out.push_str(&format!("package {};\n", table.package));
        out.push('\n');
        if let Some(import) = import {
            if accessors.iter().any(|(_, flag)| flag.writable) {
                out.push_str(&format!("import {import};\n"));
                out.push('\n');
            }
        }

        out.push_str("public final class Flags {\n");
        out.push_str("    private Flags() {}\n");
        for (accessor, flag) in accessors {
            out.push('\n');
            out.push_str(&format!("    public static boolean {accessor}() {{\n"));
            if flag.writable {
                out.push_str(&format!(
                    "        return new {store}(\"{}\", {}).getFlagValue();\n",
                    flag.name, flag.value
                ));
            } else {
                out.push_str(&format!("        return {};\n", flag.value));
            }
            out.push_str("    }\n");
        }
        out.push_str("}\n");
        out
    }

    fn render_keys(&self, table: &ResolvedTable) -> String {
        let keys = table.writable_keys();
        let mut out = String::new();

        out.push_str(HEADER);
        out.push_str(&format!("package {};\n", table.package));
        out.push('\n');
        out.push_str("public final class Keys {\n");
        out.push_str("    private Keys() {}\n\n");
        if keys.is_empty() {
            out.push_str("    public static final String[] keys = {};\n");
        } else {
            out.push_str("    public static final String[] keys = {\n");
            for key in keys {
                out.push_str(&format!("        \"{key}\",\n"));
            }
            out.push_str("    };\n");
        }
        out.push_str("}\n");
        out
    }
}

/// Pair every flag with its accessor name, rejecting collisions and names
/// that are not Java identifiers.
fn accessors(table: &ResolvedTable) -> Result<Vec<(String, &ResolvedFlag)>> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut out = Vec::with_capacity(table.flags.len());
    for flag in &table.flags {
        let accessor = snake_to_camel(&flag.name);
        if !is_java_identifier(&accessor) {
            return Err(Error::InvalidAccessor {
                flag: flag.name.clone(),
                accessor,
            });
        }
        if let Some(first) = seen.insert(accessor.clone(), &flag.name) {
            return Err(Error::AccessorCollision {
                accessor,
                first: first.to_string(),
                second: flag.name.clone(),
            });
        }
        out.push((accessor, flag));
    }
    Ok(out)
}

impl Emitter for JavaEmitter {
    fn kind(&self) -> OutputKind {
        OutputKind::Java
    }

    fn render(&self, table: &ResolvedTable) -> Result<Vec<GeneratedFile>> {
        let dir = package_dir(&table.package)?;
        let accessors = accessors(table)?;

        let keys_path = match &self.keys_dir {
            Some(keys_dir) => keys_dir.join(&dir).join("Keys.java"),
            None => dir.join("Keys.java"),
        };

        tracing::debug!(
            package = %table.package,
            accessors = accessors.len(),
            "Rendered Java sources"
        );

        Ok(vec![
            GeneratedFile::new(dir.join("Flags.java"), self.render_flags(table, &accessors)),
            GeneratedFile::new(keys_path, self.render_keys(table)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn flag(name: &str, value: bool, writable: bool) -> ResolvedFlag {
        ResolvedFlag {
            name: name.into(),
            value,
            writable,
            source: None,
        }
    }

    fn table(flags: Vec<ResolvedFlag>) -> ResolvedTable {
        ResolvedTable {
            package: "com.example.flags".into(),
            flags,
        }
    }

    #[test]
    fn renders_flags_and_keys() {
        let files = JavaEmitter::new()
            .render(&table(vec![
                flag("alpha_flag", true, false),
                flag("beta_flag", false, true),
            ]))
            .unwrap();

        assert_eq!(files[0].path, PathBuf::from("com/example/flags/Flags.java"));
        insta::assert_snapshot!(files[0].contents, @r#"
// Generated by aconfig. Do not edit.
package com.example.flags;

public final class Flags {
    private Flags() {}

    public static boolean alphaFlag() {
        return true;
    }

    public static boolean betaFlag() {
        return new writableFlag("beta_flag", false).getFlagValue();
    }
}
"#);

        assert_eq!(files[1].path, PathBuf::from("com/example/flags/Keys.java"));
        insta::assert_snapshot!(files[1].contents, @r#"
// Generated by aconfig. Do not edit.
package com.example.flags;

public final class Keys {
    private Keys() {}

    public static final String[] keys = {
        "beta_flag",
    };
}
"#);
    }

    #[test]
    fn empty_keys_render_an_empty_array() {
        let files = JavaEmitter::new()
            .render(&table(vec![flag("alpha_flag", true, false)]))
            .unwrap();
        assert!(files[1].contents.contains("public static final String[] keys = {};"));
    }

    #[test]
    fn qualified_store_class_is_imported() {
        let files = JavaEmitter::new()
            .with_store_class("io.example.runtime.FlagStore")
            .render(&table(vec![flag("beta_flag", true, true)]))
            .unwrap();

        let flags = &files[0].contents;
        assert!(flags.contains("import io.example.runtime.FlagStore;"));
        assert!(flags.contains("return new FlagStore(\"beta_flag\", true).getFlagValue();"));
    }

    #[test]
    fn keys_dir_moves_only_the_manifest() {
        let files = JavaEmitter::new()
            .with_keys_dir("/lib/java")
            .render(&table(vec![flag("a", false, true)]))
            .unwrap();
        assert_eq!(files[0].path, PathBuf::from("com/example/flags/Flags.java"));
        assert_eq!(
            files[1].path,
            PathBuf::from("/lib/java/com/example/flags/Keys.java")
        );
    }

    #[test]
    fn colliding_accessors_are_rejected() {
        let err = JavaEmitter::new()
            .render(&table(vec![
                flag("new_flag", false, false),
                flag("newFlag", false, false),
            ]))
            .unwrap_err();

        match err {
            Error::AccessorCollision {
                accessor,
                first,
                second,
            } => {
                assert_eq!(accessor, "newFlag");
                assert_eq!(first, "new_flag");
                assert_eq!(second, "newFlag");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[rstest]
    #[case::trailing_comment("\"alpha_flag\" # renamed")]
    #[case::inner_space("alpha flag")]
    #[case::inner_quote("alpha\"flag")]
    #[case::java_keyword("new")]
    fn non_identifier_accessors_are_rejected(#[case] name: &str) {
        let err = JavaEmitter::new()
            .render(&table(vec![flag(name, true, true)]))
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidAccessor { ref flag, .. } if flag == name),
            "{err:?}"
        );
    }

    #[test]
    fn invalid_package_is_rejected() {
        let mut t = table(vec![]);
        t.package = "com..flags".into();
        assert!(matches!(
            JavaEmitter::new().render(&t),
            Err(Error::InvalidPackage { .. })
        ));
    }
}
