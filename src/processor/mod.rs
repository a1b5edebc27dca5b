//! # Processor Module
//!
//! This module runs a batch: it reads the candidate list, decides which
//! candidates are checkable, validates each of them, and generates a fix for
//! every file whose header is wrong.
//!
//! The module is organized into:
//! - [`file_io`] - File reading and writing operations
//!
//! Files are checked concurrently on the blocking thread pool, but results are
//! delivered strictly in input order. Every check of a batch shares the same
//! [`HeaderRules`], and therefore the same year.

mod file_io;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
pub use file_io::FileIO;
use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::patch::{PatchError, PatchGenerator};
use crate::report::{FileRecord, FileStatus};
use crate::rules::HeaderRules;
use crate::verbose_log;

/// Reads the newline-delimited candidate list at `path`.
///
/// Lines are trimmed and blank lines are dropped. Duplicates are kept, as the
/// list is taken verbatim from whatever produced it.
pub fn read_candidate_list(path: &Path) -> Result<Vec<PathBuf>> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("Failed to read candidate list: {}", path.display()))?;
  Ok(parse_candidate_list(&content))
}

/// Parses the content of a candidate list.
pub fn parse_candidate_list(content: &str) -> Vec<PathBuf> {
  content
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(PathBuf::from)
    .collect()
}

/// Validates one file and, if its header is wrong, computes its fix.
///
/// Validation problems are soft; only a file that cannot be read while
/// building its fix is an error.
pub fn check_file(rules: &HeaderRules, path: &Path) -> Result<FileRecord, PatchError> {
  let check = crate::validator::HeaderValidator::new(rules).check(path);

  if check.policy.is_none() {
    return Ok(FileRecord::skipped(path.to_path_buf()));
  }

  if check.valid {
    return Ok(FileRecord {
      path: path.to_path_buf(),
      status: FileStatus::Compliant,
      policy: check.policy,
      encoding_line: check.encoding_line,
      fix: None,
      diff: None,
    });
  }

  let patch = PatchGenerator::new(rules).generate(path)?;
  Ok(FileRecord {
    path: path.to_path_buf(),
    status: FileStatus::NonCompliant,
    policy: check.policy,
    encoding_line: check.encoding_line,
    fix: patch.as_ref().map(|p| p.kind),
    diff: patch.map(|p| p.diff),
  })
}

/// Runs header checks over a list of candidate files.
pub struct Processor {
  rules: Arc<HeaderRules>,
  /// Maximum number of files checked at the same time
  jobs: usize,
}

impl Processor {
  pub fn new(rules: HeaderRules, jobs: usize) -> Self {
    Self {
      rules: Arc::new(rules),
      jobs: jobs.max(1),
    }
  }

  /// Splits candidates into checkable files and skipped records, keeping the
  /// input order of each.
  pub fn plan(&self, candidates: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<FileRecord>) {
    let mut checkable = Vec::new();
    let mut skipped = Vec::new();
    for path in candidates {
      if self.rules.policies.is_checkable(&path) {
        checkable.push(path);
      } else {
        verbose_log!("Skipping {}", path.display());
        skipped.push(FileRecord::skipped(path));
      }
    }
    (checkable, skipped)
  }

  /// Checks `files` and returns one record per file, in input order.
  ///
  /// `on_record` is called for each record as soon as it and every record
  /// before it are done, so callers can report progress in order.
  ///
  /// # Errors
  ///
  /// Stops at the first file whose fix cannot be computed; records of files
  /// that finished before it have already been passed to `on_record`.
  pub async fn process<F>(&self, files: Vec<PathBuf>, mut on_record: F) -> Result<Vec<FileRecord>>
  where
    F: FnMut(&FileRecord),
  {
    debug!("Checking {} files with up to {} concurrent jobs", files.len(), self.jobs);

    let rules = Arc::clone(&self.rules);
    let mut results = stream::iter(files)
      .map(move |path| {
        let rules = Arc::clone(&rules);
        tokio::task::spawn_blocking(move || check_file(&rules, &path))
      })
      .buffered(self.jobs);

    let mut records = Vec::new();
    while let Some(joined) = results.next().await {
      let record = joined.context("File check task failed")??;
      on_record(&record);
      records.push(record);
    }

    Ok(records)
  }
}
