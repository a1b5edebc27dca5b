//! # Encoding Declaration Module
//!
//! Scripting files may declare their source encoding in a special comment on
//! line 1 or 2 (`# -*- coding: utf-8 -*-`). When such a line is present the
//! copyright header starts right after it, so the checker has to look through
//! the declaration instead of at it.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::policy::HeaderPolicy;
use crate::processor::FileIO;

/// Number of leading lines that may carry an encoding declaration.
pub const ENCODING_SCAN_LINES: usize = 2;

static ENCODING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[ \t\f]*#.*?coding[:=][ \t]*([-_.a-zA-Z0-9]+)").expect("encoding regex must compile")
});

/// Returns whether `line` is an encoding declaration comment.
pub fn is_encoding_declaration(line: &str) -> bool {
  ENCODING_REGEX.is_match(line)
}

/// Finds the encoding declaration among the first lines of already-read content.
///
/// Returns the 0-based index of the first matching line among the first
/// [`ENCODING_SCAN_LINES`], or `None`.
pub fn detect_in_lines<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
  lines
    .iter()
    .take(ENCODING_SCAN_LINES)
    .position(|line| is_encoding_declaration(line.as_ref()))
}

/// Finds the encoding declaration line of the file at `path`.
///
/// Families that do not use encoding declarations always report `None`.
/// A file that cannot be read also reports `None`: the probe never fails.
pub fn detect_encoding_line(path: &Path, policy: &HeaderPolicy) -> Option<usize> {
  if !policy.encoding_declaration {
    return None;
  }

  match FileIO::read_head_lines(path, ENCODING_SCAN_LINES) {
    Ok(lines) => detect_in_lines(&lines),
    Err(e) => {
      debug!("Encoding probe failed for {}: {:#}", path.display(), e);
      None
    }
  }
}
