//! JSON manifest emitter

use crate::Result;
use crate::traits::{Emitter, GeneratedFile};
use aconfig_core::{OutputKind, ResolvedTable};
use serde::Serialize;

/// Manifest file name, written at the root of the output directory.
pub const MANIFEST_FILE_NAME: &str = "aconfig-flags.json";

#[derive(Serialize)]
struct Manifest<'a> {
    package: &'a str,
    flags: Vec<ManifestFlag<'a>>,
    writable_keys: Vec<&'a str>,
}

#[derive(Serialize)]
struct ManifestFlag<'a> {
    name: &'a str,
    value: bool,
    writable: bool,
}

/// Emits the resolved table as `aconfig-flags.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Emitter for JsonEmitter {
    fn kind(&self) -> OutputKind {
        OutputKind::Json
    }

    fn render(&self, table: &ResolvedTable) -> Result<Vec<GeneratedFile>> {
        let manifest = Manifest {
            package: &table.package,
            flags: table
                .flags
                .iter()
                .map(|f| ManifestFlag {
                    name: &f.name,
                    value: f.value,
                    writable: f.writable,
                })
                .collect(),
            writable_keys: table.writable_keys(),
        };

        let mut contents = serde_json::to_string_pretty(&manifest)?;
        contents.push('\n');
        Ok(vec![GeneratedFile::new(MANIFEST_FILE_NAME, contents)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aconfig_core::ResolvedFlag;

    #[test]
    fn renders_manifest() {
        let table = ResolvedTable {
            package: "com.example.flags".into(),
            flags: vec![
                ResolvedFlag {
                    name: "alpha_flag".into(),
                    value: true,
                    writable: false,
                    source: None,
                },
                ResolvedFlag {
                    name: "beta_flag".into(),
                    value: false,
                    writable: true,
                    source: None,
                },
            ],
        };

        let files = JsonEmitter::new().render(&table).unwrap();
        assert_eq!(files.len(), 1);
        insta::assert_snapshot!(files[0].contents, @r#"
{
  "package": "com.example.flags",
  "flags": [
    {
      "name": "alpha_flag",
      "value": true,
      "writable": false
    },
    {
      "name": "beta_flag",
      "value": false,
      "writable": true
    }
  ],
  "writable_keys": [
    "beta_flag"
  ]
}
"#);
    }
}
