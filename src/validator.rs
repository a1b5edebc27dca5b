//! # Validator Module
//!
//! Decides whether a file already carries the expected header. The decision is
//! strict: the N lines following any encoding declaration must equal the N
//! expected header lines exactly. There is no fuzzy matching, and no tolerance
//! for reordered or reformatted lines.
//!
//! Read failures are soft here. An unreadable file is logged as a warning and
//! judged as if its header were empty, which makes it invalid without aborting
//! the batch.

use std::path::Path;

use tracing::{trace, warn};

use crate::encoding::detect_encoding_line;
use crate::policy::HeaderPolicy;
use crate::processor::FileIO;
use crate::rules::HeaderRules;

/// Outcome of validating a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
  /// Policy of the file family, `None` when the file type is unsupported.
  pub policy: Option<HeaderPolicy>,
  /// Index of the encoding declaration line, if any.
  pub encoding_line: Option<usize>,
  /// Whether the header matched.
  pub valid: bool,
}

/// Compares the start of `lines` against `expected`.
///
/// `lines` must already begin where the header is supposed to begin (i.e.
/// after any encoding declaration). A file shorter than the expected header is
/// invalid. An empty `expected` means there is nothing to check.
pub fn validate_lines<S: AsRef<str>>(expected: &[String], lines: &[S]) -> bool {
  lines.len() >= expected.len()
    && expected
      .iter()
      .zip(lines)
      .all(|(want, got)| want.as_str() == got.as_ref())
}

/// Validates file headers against a set of [`HeaderRules`].
pub struct HeaderValidator<'a> {
  rules: &'a HeaderRules,
}

impl<'a> HeaderValidator<'a> {
  pub const fn new(rules: &'a HeaderRules) -> Self {
    Self { rules }
  }

  /// Returns `true` if the file at `path` has the expected header, or if its
  /// type is not checked at all.
  pub fn is_valid(&self, path: &Path) -> bool {
    self.check(path).valid
  }

  /// Validates the file at `path` and reports what was found.
  pub fn check(&self, path: &Path) -> HeaderCheck {
    let Some(policy) = self.rules.classify(path) else {
      return HeaderCheck {
        policy: None,
        encoding_line: None,
        valid: true,
      };
    };

    let expected = self.rules.template.expected_lines(Some(policy), self.rules.year);
    let encoding_line = detect_encoding_line(path, policy);
    let header_start = encoding_line.map_or(0, |idx| idx + 1);

    let lines = match FileIO::read_head_lines(path, header_start + expected.len()) {
      Ok(mut lines) => lines.split_off(header_start.min(lines.len())),
      Err(e) => {
        warn!("Could not read {}: {:#}", path.display(), e);
        Vec::new()
      }
    };

    let valid = validate_lines(&expected, &lines);
    trace!(
      "Validated {} (encoding line: {:?}, valid: {})",
      path.display(),
      encoding_line,
      valid
    );

    HeaderCheck {
      policy: Some(policy.clone()),
      encoding_line,
      valid,
    }
  }
}
