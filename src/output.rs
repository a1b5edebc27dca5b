//! # Output Module
//!
//! This module centralizes all user-facing output for the headercheck tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! In quiet mode only the non-compliant paths are printed, one per line, so
//! the output can be piped into other tools.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{info_log, is_quiet, is_verbose};
use crate::report::{BatchSummary, FileRecord, FileStatus};

/// Symbols used in output
pub mod symbols {
  /// Header is correct
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Header is missing or wrong
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the initial "Checking N files..." message.
pub fn print_start_message(file_count: usize) {
  if is_quiet() {
    return;
  }

  let files_word = if file_count == 1 { "file" } else { "files" };
  println!("Checking {file_count} {files_word} for copyright headers...");
  println!();
}

/// Print the message shown when the candidate list has nothing to check.
pub fn print_nothing_to_check() {
  if is_quiet() {
    return;
  }

  println!("No supported source files to check.");
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the pass/fail marker for one file as soon as it is checked.
pub fn print_file_status(record: &FileRecord) {
  if is_quiet() {
    return;
  }

  match record.status {
    FileStatus::Compliant => println!(
      "{} {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      record.path.display()
    ),
    FileStatus::NonCompliant => println!(
      "{} {}",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      record.path.display()
    ),
    FileStatus::Skipped => {}
  }
}

/// Print the success message when every checked file is compliant.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have correct copyright headers!",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the list of non-compliant files.
pub fn print_issues(paths: &[&Path]) {
  if paths.is_empty() {
    return;
  }

  if is_quiet() {
    for path in paths {
      println!("{}", path.display());
    }
    return;
  }

  let count = paths.len();
  println!(
    "{} Found {} {} with copyright header issues:",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    count,
    if count == 1 { "file" } else { "files" }
  );
  for path in paths {
    println!("  - {}", path.display());
  }
}

/// Tell the user where the fixes were written and how to apply them.
pub fn print_patch_hint(issues_file: &Path, diff_file: &Path) {
  if is_quiet() {
    return;
  }

  println!("Wrote list of files to fix: {}", issues_file.display());
  println!("Generated diff file: {}", diff_file.display());
  info_log!("Apply with: patch -p1 < {}", diff_file.display());
}

/// Print the batch counts. Only shown in verbose mode.
pub fn print_summary(summary: &BatchSummary) {
  if !is_verbose() {
    return;
  }

  let non_compliant = if summary.non_compliant > 0 {
    summary
      .non_compliant
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary
      .non_compliant
      .if_supports_color(Stream::Stdout, |s| s.cyan())
      .to_string()
  };

  println!(
    "Summary: {} OK, {} with issues, {} skipped",
    summary.compliant.if_supports_color(Stream::Stdout, |s| s.cyan()),
    non_compliant,
    summary.skipped.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}
