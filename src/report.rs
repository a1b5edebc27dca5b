//! # Report Module
//!
//! This module holds the per-file results of a batch and writes the artifacts
//! derived from them:
//!
//! - the list of non-compliant paths, one per line
//! - the combined patch, the concatenation of every per-file unified diff
//! - an optional JSON report describing every candidate file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::patch::PatchKind;
use crate::policy::HeaderPolicy;
use crate::processor::FileIO;

/// Default name of the non-compliant path list.
pub const DEFAULT_ISSUES_FILE: &str = "copyright_issues.txt";

/// Default name of the combined patch.
pub const DEFAULT_DIFF_FILE: &str = "copyright_fixes.diff";

/// Verdict for one candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
  /// The header matched.
  Compliant,
  /// The header was missing or wrong.
  NonCompliant,
  /// The file was not checked (unsupported type, or not a regular file).
  Skipped,
}

/// Information about a checked file for reporting
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
  /// Path to the file, as listed in the input
  #[serde(serialize_with = "path_serialization::serialize")]
  pub path: PathBuf,
  pub status: FileStatus,
  /// Policy of the file family, if supported
  pub policy: Option<HeaderPolicy>,
  /// 0-based index of the encoding declaration line, if any
  pub encoding_line: Option<usize>,
  /// How the fix changes the header, for non-compliant files
  pub fix: Option<PatchKind>,
  /// Unified diff fixing the header, for non-compliant files
  #[serde(skip_serializing_if = "Option::is_none")]
  pub diff: Option<String>,
}

impl FileRecord {
  /// A record for a file that was not checked.
  pub const fn skipped(path: PathBuf) -> Self {
    Self {
      path,
      status: FileStatus::Skipped,
      policy: None,
      encoding_line: None,
      fix: None,
      diff: None,
    }
  }

  pub fn is_non_compliant(&self) -> bool {
    self.status == FileStatus::NonCompliant
  }
}

/// Helper module for serializing PathBuf
mod path_serialization {
  use serde::Serializer;

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }
}

/// Counts over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
  /// Files whose header was checked
  pub checked: usize,
  pub compliant: usize,
  pub non_compliant: usize,
  /// Candidates that were not checked
  pub skipped: usize,
}

impl BatchSummary {
  pub fn from_records(records: &[FileRecord]) -> Self {
    let mut summary = Self::default();
    for record in records {
      match record.status {
        FileStatus::Compliant => summary.compliant += 1,
        FileStatus::NonCompliant => summary.non_compliant += 1,
        FileStatus::Skipped => summary.skipped += 1,
      }
    }
    summary.checked = summary.compliant + summary.non_compliant;
    summary
  }
}

/// Paths of the non-compliant records, in record order.
pub fn non_compliant_paths(records: &[FileRecord]) -> Vec<&Path> {
  records
    .iter()
    .filter(|r| r.is_non_compliant())
    .map(|r| r.path.as_path())
    .collect()
}

/// The non-compliant path list: one path per line, no trailing newline.
pub fn render_issue_list(records: &[FileRecord]) -> String {
  non_compliant_paths(records)
    .iter()
    .map(|p| p.to_string_lossy())
    .collect::<Vec<_>>()
    .join("\n")
}

/// The combined patch: every per-file diff, separated by a newline.
pub fn render_combined_diff(records: &[FileRecord]) -> String {
  records
    .iter()
    .filter(|r| r.is_non_compliant())
    .filter_map(|r| r.diff.as_deref())
    .collect::<Vec<_>>()
    .join("\n")
}

/// Writes the issue list and the combined patch.
pub fn write_artifacts(records: &[FileRecord], issues_path: &Path, diff_path: &Path) -> Result<()> {
  FileIO::write_file(issues_path, &render_issue_list(records))?;
  FileIO::write_file(diff_path, &render_combined_diff(records))
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: String,
  year: i32,
  summary: BatchSummary,
  files: &'a [FileRecord],
}

/// Report Generator for the JSON report
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Renders the JSON report without writing it.
  pub fn render(&self, records: &[FileRecord], year: i32) -> Result<String> {
    let report = JsonReport {
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      year,
      summary: BatchSummary::from_records(records),
      files: records,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")
  }

  /// Generates the report and writes it to the output path.
  pub fn generate(&self, records: &[FileRecord], year: i32) -> Result<()> {
    let content = self.render(records, year)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}
