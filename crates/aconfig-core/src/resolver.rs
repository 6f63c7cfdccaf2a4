//! Layered override resolution
//!
//! Resolution runs in two steps. Every override file of every layer is first
//! parsed and validated into a flat, ordered list of [`Assignment`]s. That
//! list is then folded into one [`FlagOverride`] per flag, where an
//! assignment from a later layer (or a later line of the same layer)
//! replaces an earlier one. Declared flags are finally read out of the fold
//! in declaration order.

use crate::declaration::DeclarationSet;
use crate::layer::OverrideLayer;
use crate::overrides::{OverrideField, OverrideKey, read_override_file};
use crate::policy::{ResolveOptions, StatePolicy, UndeclaredPolicy, WritablePolicy};
use crate::state::{FlagState, Permission};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where an override value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub layer: String,
    pub layer_index: usize,
    pub path: PathBuf,
    pub line: usize,
}

/// The final value of one flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFlag {
    pub name: String,
    pub value: bool,
    pub writable: bool,
    /// Origin of the winning `state` line, `None` when no layer set one
    pub source: Option<Origin>,
}

/// All resolved flags of a package, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTable {
    pub package: String,
    pub flags: Vec<ResolvedFlag>,
}

impl ResolvedTable {
    /// Names of flags that are writable at runtime, in table order.
    pub fn writable_keys(&self) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|f| f.writable)
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedFlag> {
        self.flags.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssignmentKind {
    State(FlagState),
    Permission(Permission),
}

/// One validated `state` or `permission` line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Assignment {
    flag: String,
    kind: AssignmentKind,
    origin: Origin,
}

#[derive(Debug, Clone, Default)]
struct FlagOverride {
    state: Option<(FlagState, Origin)>,
    permission: Option<(Permission, Origin)>,
}

/// Resolves declared flags against ordered override layers.
pub struct Resolver<'a> {
    declarations: &'a DeclarationSet,
    options: &'a ResolveOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(declarations: &'a DeclarationSet, options: &'a ResolveOptions) -> Self {
        Self {
            declarations,
            options,
        }
    }

    /// Resolve every declared flag against `layers`, lowest precedence first.
    ///
    /// Any invalid override file aborts resolution; there is no partial
    /// result.
    pub fn resolve(&self, layers: &[OverrideLayer]) -> Result<ResolvedTable> {
        if self.options.package.is_empty() {
            return Err(Error::MissingTargetPackage);
        }
        if self.declarations.package() != self.options.package {
            return Err(Error::PackageMismatch {
                path: self.declarations.primary_path().to_path_buf(),
                found: self.declarations.package().to_string(),
                expected: self.options.package.clone(),
            });
        }

        let mut assignments = Vec::new();
        for (layer_index, layer) in layers.iter().enumerate() {
            for path in &layer.files {
                let fields = read_override_file(path)?;
                let origin = Origin {
                    layer: layer.name.clone(),
                    layer_index,
                    path: path.clone(),
                    line: 0,
                };
                assignments.extend(self.collect_file(&origin, &fields)?);
            }
        }

        let overrides = fold_assignments(assignments);
        self.build_table(&overrides)
    }

    /// Validate the fields of one file and turn them into assignments.
    fn collect_file(&self, file: &Origin, fields: &[OverrideField]) -> Result<Vec<Assignment>> {
        let path = file.path.as_path();
        let mut current: Option<&str> = None;
        let mut out = Vec::new();

        for field in fields {
            match field.key {
                OverrideKey::Package => {
                    if field.value != self.options.package {
                        return Err(Error::PackageMismatch {
                            path: path.to_path_buf(),
                            found: field.value.clone(),
                            expected: self.options.package.clone(),
                        });
                    }
                }
                OverrideKey::Name => {
                    if field.value.is_empty() {
                        return Err(Error::InvalidFlagName {
                            name: String::new(),
                            path: path.to_path_buf(),
                            line: field.line_no,
                        });
                    }
                    self.check_declared(&field.value, path)?;
                    current = Some(&field.value);
                }
                OverrideKey::State | OverrideKey::Permission => {
                    let flag = current.ok_or_else(|| Error::OrphanField {
                        key: field.key.to_string(),
                        path: path.to_path_buf(),
                        line: field.line_no,
                    })?;
                    let kind = if field.key == OverrideKey::State {
                        AssignmentKind::State(self.parse_state(flag, field, path)?)
                    } else {
                        AssignmentKind::Permission(self.parse_permission(flag, field, path)?)
                    };
                    out.push(Assignment {
                        flag: flag.to_string(),
                        kind,
                        origin: Origin {
                            line: field.line_no,
                            ..file.clone()
                        },
                    });
                }
            }
        }

        Ok(out)
    }

    fn check_declared(&self, flag: &str, path: &Path) -> Result<()> {
        if self.declarations.contains(flag) {
            return Ok(());
        }
        match self.options.undeclared {
            UndeclaredPolicy::Ignore => {
                tracing::warn!(flag, path = %path.display(), "Override for undeclared flag ignored");
                Ok(())
            }
            UndeclaredPolicy::Error => Err(Error::UndeclaredFlag {
                flag: flag.to_string(),
                package: self.options.package.clone(),
                path: path.to_path_buf(),
            }),
        }
    }

    fn parse_state(&self, flag: &str, field: &OverrideField, path: &Path) -> Result<FlagState> {
        match field.value.parse::<FlagState>() {
            Ok(state) => Ok(state),
            Err(_) if self.options.states == StatePolicy::Legacy => {
                tracing::warn!(
                    flag,
                    value = %field.value,
                    path = %path.display(),
                    line = field.line_no,
                    "Unrecognized state, treating as DISABLED"
                );
                Ok(FlagState::Disabled)
            }
            Err(_) => Err(Error::InvalidState {
                flag: flag.to_string(),
                value: field.value.clone(),
                path: path.to_path_buf(),
                line: field.line_no,
            }),
        }
    }

    fn parse_permission(
        &self,
        flag: &str,
        field: &OverrideField,
        path: &Path,
    ) -> Result<Permission> {
        let permission =
            field
                .value
                .parse::<Permission>()
                .map_err(|_| Error::InvalidPermission {
                    flag: flag.to_string(),
                    value: field.value.clone(),
                    path: path.to_path_buf(),
                    line: field.line_no,
                })?;

        if permission.is_read_write() && self.options.writable == WritablePolicy::Reject {
            return Err(Error::ReadWriteForbidden {
                flag: flag.to_string(),
                source_desc: format!("{}:{}", path.display(), field.line_no),
            });
        }
        Ok(permission)
    }

    fn build_table(&self, overrides: &HashMap<String, FlagOverride>) -> Result<ResolvedTable> {
        let mut flags = Vec::with_capacity(self.declarations.len());

        for declaration in self.declarations.flags() {
            let name = declaration.name.as_str();
            let found = overrides.get(name);

            let state = found.and_then(|o| o.state.as_ref());
            let permission = found
                .and_then(|o| o.permission.as_ref())
                .map(|(p, _)| *p)
                .unwrap_or(self.options.default_permission);

            flags.push(ResolvedFlag {
                name: name.to_string(),
                value: state.map(|(s, _)| s.as_bool()).unwrap_or(false),
                writable: self.writable(name, permission)?,
                source: state.map(|(_, origin)| origin.clone()),
            });
        }

        tracing::debug!(
            package = %self.options.package,
            flags = flags.len(),
            "Resolved flag table"
        );

        Ok(ResolvedTable {
            package: self.options.package.clone(),
            flags,
        })
    }

    fn writable(&self, flag: &str, permission: Permission) -> Result<bool> {
        if !permission.is_read_write() {
            return Ok(false);
        }
        match self.options.writable {
            WritablePolicy::Honor => Ok(true),
            WritablePolicy::Downgrade => {
                tracing::warn!(flag, "Read-write flags are disabled, generating flag as read-only");
                Ok(false)
            }
            // Override lines were rejected while collecting, so only the
            // default permission can get here
            WritablePolicy::Reject => Err(Error::ReadWriteForbidden {
                flag: flag.to_string(),
                source_desc: "default permission".to_string(),
            }),
        }
    }
}

/// Fold ordered assignments into one override per flag, logging shadowing.
fn fold_assignments(assignments: Vec<Assignment>) -> HashMap<String, FlagOverride> {
    assignments
        .into_iter()
        .fold(HashMap::new(), |mut acc, assignment| {
            let entry: &mut FlagOverride = acc.entry(assignment.flag.clone()).or_default();
            match assignment.kind {
                AssignmentKind::State(state) => {
                    if let Some((_, previous)) = &entry.state {
                        debug_assert!(previous.layer_index <= assignment.origin.layer_index);
                        tracing::info!(
                            flag = %assignment.flag,
                            layer = %assignment.origin.layer,
                            previous_layer = %previous.layer,
                            previous = %previous.path.display(),
                            "value for {} is overridden by the config for it in {}",
                            assignment.flag,
                            assignment.origin.path.display()
                        );
                    }
                    entry.state = Some((state, assignment.origin));
                }
                AssignmentKind::Permission(permission) => {
                    entry.permission = Some((permission, assignment.origin));
                }
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::DeclarationFile;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const PACKAGE: &str = "com.example.flags";

    fn declarations(names: &[&str]) -> DeclarationSet {
        let mut content = format!("package: \"{PACKAGE}\"\n");
        for name in names {
            content.push_str(&format!("flag {{\n  name: \"{name}\"\n}}\n"));
        }
        let file = DeclarationFile::parse(Path::new("config.aconfig"), &content).unwrap();
        DeclarationSet::from_files(vec![file], PACKAGE).unwrap()
    }

    fn override_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn value(name: &str, state: &str, permission: &str) -> String {
        format!(
            "flag_value {{\n  package: \"{PACKAGE}\"\n  name: \"{name}\"\n  state: {state}\n  permission: {permission}\n}}\n"
        )
    }

    #[test]
    fn flags_without_overrides_resolve_false_and_read_only() {
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE);
        let table = Resolver::new(&decls, &options).resolve(&[]).unwrap();

        assert_eq!(
            table.flags,
            vec![ResolvedFlag {
                name: "alpha_flag".into(),
                value: false,
                writable: false,
                source: None,
            }]
        );
    }

    #[test]
    fn declaration_package_mismatch_names_primary_file() {
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new("com.other");
        let err = Resolver::new(&decls, &options).resolve(&[]).unwrap_err();
        assert!(
            matches!(
                err,
                Error::PackageMismatch { ref path, ref found, ref expected }
                    if path == Path::new("config.aconfig")
                        && found == PACKAGE
                        && expected == "com.other"
            ),
            "{err:?}"
        );
    }

    #[test]
    fn later_line_in_same_file_wins() {
        let dir = TempDir::new().unwrap();
        let path = override_file(
            &dir,
            "a.textproto",
            "name: \"alpha_flag\"\nstate: ENABLED\nstate: DISABLED\n",
        );
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE);
        let table = Resolver::new(&decls, &options)
            .resolve(&[OverrideLayer::new("root", vec![path])])
            .unwrap();

        let flag = table.get("alpha_flag").unwrap();
        assert!(!flag.value);
        assert_eq!(flag.source.as_ref().unwrap().line, 3);
    }

    #[test]
    fn orphan_state_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = override_file(&dir, "a.textproto", "state: ENABLED\n");
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE);
        let err = Resolver::new(&decls, &options)
            .resolve(&[OverrideLayer::new("root", vec![path])])
            .unwrap_err();
        assert!(matches!(err, Error::OrphanField { line: 1, .. }));
    }

    #[test]
    fn default_permission_applies_when_unset() {
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE).with_default_permission(Permission::ReadWrite);
        let table = Resolver::new(&decls, &options).resolve(&[]).unwrap();
        assert!(table.get("alpha_flag").unwrap().writable);
    }

    #[test]
    fn reject_policy_fails_on_read_write_default() {
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE)
            .with_default_permission(Permission::ReadWrite)
            .with_writable(WritablePolicy::Reject);
        let err = Resolver::new(&decls, &options).resolve(&[]).unwrap_err();
        assert!(matches!(err, Error::ReadWriteForbidden { .. }));
    }

    #[test]
    fn reject_policy_fails_on_read_write_override() {
        let dir = TempDir::new().unwrap();
        let path = override_file(&dir, "a.textproto", &value("alpha_flag", "ENABLED", "READ_WRITE"));
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE).with_writable(WritablePolicy::Reject);
        let err = Resolver::new(&decls, &options)
            .resolve(&[OverrideLayer::new("root", vec![path])])
            .unwrap_err();
        assert!(matches!(err, Error::ReadWriteForbidden { ref flag, .. } if flag == "alpha_flag"));
    }

    #[test]
    fn undeclared_flag_is_ignored_by_default() {
        let dir = TempDir::new().unwrap();
        let path = override_file(&dir, "a.textproto", &value("ghost_flag", "ENABLED", "READ_ONLY"));
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE);
        let table = Resolver::new(&decls, &options)
            .resolve(&[OverrideLayer::new("root", vec![path])])
            .unwrap();
        assert!(table.get("ghost_flag").is_none());
        assert_eq!(table.flags.len(), 1);
    }

    #[test]
    fn undeclared_flag_can_be_an_error() {
        let dir = TempDir::new().unwrap();
        let path = override_file(&dir, "a.textproto", &value("ghost_flag", "ENABLED", "READ_ONLY"));
        let decls = declarations(&["alpha_flag"]);
        let options = ResolveOptions::new(PACKAGE).with_undeclared(UndeclaredPolicy::Error);
        let err = Resolver::new(&decls, &options)
            .resolve(&[OverrideLayer::new("root", vec![path])])
            .unwrap_err();
        assert!(matches!(err, Error::UndeclaredFlag { ref flag, .. } if flag == "ghost_flag"));
    }

    #[test]
    fn fold_keeps_last_assignment_per_flag() {
        let origin = |layer_index, line| Origin {
            layer: format!("l{layer_index}"),
            layer_index,
            path: PathBuf::from("x.textproto"),
            line,
        };
        let folded = fold_assignments(vec![
            Assignment {
                flag: "a".into(),
                kind: AssignmentKind::State(FlagState::Enabled),
                origin: origin(0, 1),
            },
            Assignment {
                flag: "a".into(),
                kind: AssignmentKind::Permission(Permission::ReadWrite),
                origin: origin(0, 2),
            },
            Assignment {
                flag: "a".into(),
                kind: AssignmentKind::State(FlagState::Disabled),
                origin: origin(1, 1),
            },
        ]);

        let a = &folded["a"];
        assert_eq!(a.state.as_ref().unwrap().0, FlagState::Disabled);
        assert_eq!(a.state.as_ref().unwrap().1.layer_index, 1);
        assert_eq!(a.permission.as_ref().unwrap().0, Permission::ReadWrite);
    }

    #[test]
    fn writable_keys_follow_table_order() {
        let table = ResolvedTable {
            package: PACKAGE.into(),
            flags: ["a", "b", "c"]
                .iter()
                .map(|n| ResolvedFlag {
                    name: n.to_string(),
                    value: false,
                    writable: *n != "b",
                    source: None,
                })
                .collect(),
        };
        assert_eq!(table.writable_keys(), vec!["a", "c"]);
    }
}
