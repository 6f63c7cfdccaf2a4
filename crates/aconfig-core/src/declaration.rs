//! Flag declaration files
//!
//! A declaration file names the package and, inside `flag { ... }` blocks,
//! the flags it owns:
//!
//! ```text
//! package: "com.example.flags"
//!
//! flag {
//!     name: "alpha_flag"
//!     namespace: "example"
//!     description: "Enables alpha"
//! }
//! ```
//!
//! Only `package` (top level) and `name` (directly inside `flag`) are read;
//! every other field and nested block is ignored.

use crate::syntax::{Line, lex};
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Whether `name` matches `[a-zA-Z][a-zA-Z0-9_]*`.
pub fn is_valid_flag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A declared flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlagDeclaration {
    pub package: String,
    pub name: String,
}

/// The contents of one declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFile {
    pub path: PathBuf,
    pub package: String,
    /// Flag names in file order
    pub flags: Vec<String>,
}

impl DeclarationFile {
    /// Read and parse a declaration file.
    ///
    /// A missing file is reported as [`Error::MissingFile`] so callers can
    /// decide whether it is fatal.
    pub fn read(path: &Path) -> Result<Self> {
        let content = aconfig_fs::io::read_text(path).map_err(|e| match e {
            aconfig_fs::Error::NotFound { path } => Error::MissingFile { path },
            other => Error::Fs(other),
        })?;
        Self::parse(path, &content)
    }

    /// Parse declaration file content. `path` is used for error reporting.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut package: Option<&str> = None;
        let mut flags = Vec::new();
        // Line of each open block; `in_flag` is set while the outermost block is `flag`
        let mut open_blocks: Vec<usize> = Vec::new();
        let mut in_flag = false;

        for line in lex(content) {
            let depth = open_blocks.len();
            match line {
                Line::Open { label, line_no } => {
                    if depth == 0 {
                        in_flag = label == "flag";
                    }
                    open_blocks.push(line_no);
                }
                Line::Close { line_no } => {
                    if open_blocks.pop().is_none() {
                        return Err(Error::UnbalancedBlock {
                            path: path.to_path_buf(),
                            line: line_no,
                        });
                    }
                    if open_blocks.is_empty() {
                        in_flag = false;
                    }
                }
                Line::Field {
                    key: "package",
                    value,
                    ..
                } if depth == 0 => match package {
                    Some(existing) if existing != value => {
                        return Err(Error::PackageMismatch {
                            path: path.to_path_buf(),
                            found: value.to_string(),
                            expected: existing.to_string(),
                        });
                    }
                    _ => package = Some(value),
                },
                Line::Field {
                    key: "name",
                    value,
                    line_no,
                } if depth == 1 && in_flag => {
                    if !is_valid_flag_name(value) {
                        return Err(Error::InvalidFlagName {
                            name: value.to_string(),
                            path: path.to_path_buf(),
                            line: line_no,
                        });
                    }
                    flags.push(value.to_string());
                }
                Line::Field { .. } => {}
            }
        }

        if let Some(&line) = open_blocks.last() {
            return Err(Error::UnbalancedBlock {
                path: path.to_path_buf(),
                line,
            });
        }

        let package = package.ok_or_else(|| Error::MissingPackage {
            path: path.to_path_buf(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            package: package.to_string(),
            flags,
        })
    }
}

/// All flags declared for one package, in first-declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSet {
    package: String,
    /// The first declaration file, used when reporting set-wide errors
    primary: PathBuf,
    flags: Vec<FlagDeclaration>,
    names: HashSet<String>,
}

impl DeclarationSet {
    /// Load declaration files and check them against `target_package`.
    ///
    /// The first path is the primary declaration file and must exist. Other
    /// missing files are logged and skipped.
    pub fn load(paths: &[PathBuf], target_package: &str) -> Result<Self> {
        let (primary, rest) = paths.split_first().ok_or(Error::NoDeclarations)?;

        let mut files = vec![DeclarationFile::read(primary)?];
        for path in rest {
            match DeclarationFile::read(path) {
                Ok(file) => files.push(file),
                Err(Error::MissingFile { path }) => {
                    tracing::error!(path = %path.display(), "No declaration file found, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        Self::from_files(files, target_package)
    }

    /// Merge parsed declaration files. All must declare `target_package`.
    pub fn from_files(files: Vec<DeclarationFile>, target_package: &str) -> Result<Self> {
        let primary = files.first().ok_or(Error::NoDeclarations)?.path.clone();
        let mut set = Self {
            package: target_package.to_string(),
            primary,
            flags: Vec::new(),
            names: HashSet::new(),
        };

        for file in files {
            if file.package != target_package {
                return Err(Error::PackageMismatch {
                    path: file.path,
                    found: file.package,
                    expected: target_package.to_string(),
                });
            }
            for name in file.flags {
                if !set.names.insert(name.clone()) {
                    return Err(Error::DuplicateFlag {
                        name,
                        path: file.path,
                    });
                }
                set.flags.push(FlagDeclaration {
                    package: file.package.clone(),
                    name,
                });
            }
            tracing::debug!(path = %file.path.display(), "Loaded declaration file");
        }

        Ok(set)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Path of the primary declaration file.
    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    pub fn flags(&self) -> &[FlagDeclaration] {
        &self.flags
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
