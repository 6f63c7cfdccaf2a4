//! Drift detection for generated files
//!
//! Freshly rendered output is compared by checksum against the files
//! already on disk, without writing anything.

use crate::Result;
use crate::traits::GeneratedFile;
use aconfig_fs::checksum::{compute_content_checksum, compute_file_checksum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Status of a drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Every generated file is up to date
    Healthy,
    /// Some generated files do not exist
    Missing,
    /// Some generated files differ from fresh output
    Drifted,
}

/// A generated file that is missing or out of date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftItem {
    pub file: PathBuf,
    /// Checksum of freshly rendered content
    pub expected: String,
    /// Checksum of the file on disk, if it exists
    pub actual: Option<String>,
}

/// Report from a drift check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub drifted: Vec<DriftItem>,
    pub missing: Vec<DriftItem>,
}

impl CheckReport {
    /// Create a healthy report with no issues
    pub fn healthy() -> Self {
        Self {
            status: CheckStatus::Healthy,
            drifted: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }

    /// Record one checked file.
    fn record(&mut self, item: DriftItem) {
        match item.actual {
            None => {
                self.missing.push(item);
                if self.status == CheckStatus::Healthy {
                    self.status = CheckStatus::Missing;
                }
            }
            Some(_) => {
                self.drifted.push(item);
                self.status = CheckStatus::Drifted;
            }
        }
    }
}

/// Compare rendered files with their on-disk counterparts.
///
/// Paths of `files` must already be resolved against the output directory.
pub fn check_files(files: &[GeneratedFile]) -> Result<CheckReport> {
    let mut report = CheckReport::healthy();
    for file in files {
        let expected = compute_content_checksum(&file.contents);
        let actual = compute_file_checksum(&file.path)?;
        if actual.as_deref() == Some(expected.as_str()) {
            tracing::debug!(path = %file.path.display(), "Generated file is up to date");
            continue;
        }
        tracing::debug!(
            path = %file.path.display(),
            missing = actual.is_none(),
            "Generated file is out of date"
        );
        report.record(DriftItem {
            file: file.path.clone(),
            expected,
            actual,
        });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn matching_files_are_healthy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "same").unwrap();

        let report = check_files(&[GeneratedFile::new(&path, "same")]).unwrap();
        assert_eq!(report, CheckReport::healthy());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");

        let report = check_files(&[GeneratedFile::new(&path, "x")]).unwrap();
        assert_eq!(report.status, CheckStatus::Missing);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].actual, None);
    }

    #[test]
    fn drift_outranks_missing() {
        let dir = TempDir::new().unwrap();
        let changed = dir.path().join("changed.txt");
        fs::write(&changed, "old").unwrap();

        let report = check_files(&[
            GeneratedFile::new(dir.path().join("gone.txt"), "x"),
            GeneratedFile::new(&changed, "new"),
        ])
        .unwrap();

        assert_eq!(report.status, CheckStatus::Drifted);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.drifted.len(), 1);
        assert_eq!(report.drifted[0].file, changed);
        assert!(!report.is_healthy());
    }
}
