//! # Header Module
//!
//! Builds the exact header lines a file is expected to start with. The header
//! depends on the file family's [`HeaderPolicy`] and on the year of the run,
//! which is always passed in by the caller so the result is deterministic.
//!
//! ## Example
//!
//! ```rust
//! use headercheck::header::HeaderTemplate;
//! use headercheck::policy::HeaderPolicy;
//!
//! let policy = HeaderPolicy::new("#", false, true);
//! let lines = HeaderTemplate::default().expected_lines(Some(&policy), 2025);
//! assert_eq!(lines[0], "# Copyright (C) 2018-2025 Intel Corporation");
//! assert_eq!(lines[1], "# SPDX-License-Identifier: Apache-2.0");
//! ```

use crate::policy::HeaderPolicy;

/// Literal that marks the copyright line of a header.
pub const COPYRIGHT_MARKER: &str = "Copyright";

/// Literal that marks the license line of a header.
pub const SPDX_MARKER: &str = "SPDX-License-Identifier";

/// Copyright holder and license the header names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
  /// Copyright holder, e.g. `Intel Corporation`.
  pub holder: String,
  /// SPDX license expression, e.g. `Apache-2.0`.
  pub license: String,
  /// First year of the copyright range.
  pub first_year: i32,
}

impl Default for HeaderTemplate {
  fn default() -> Self {
    Self {
      holder: "Intel Corporation".to_string(),
      license: "Apache-2.0".to_string(),
      first_year: 2018,
    }
  }
}

impl HeaderTemplate {
  /// Returns the expected header lines for `policy` in `year`.
  ///
  /// The lines carry no terminators and no trailing separator line. An
  /// unsupported file (`None`) has nothing to check and gets no lines.
  pub fn expected_lines(&self, policy: Option<&HeaderPolicy>, year: i32) -> Vec<String> {
    let Some(policy) = policy else {
      return Vec::new();
    };
    let prefix = &policy.comment_prefix;

    let mut lines = vec![
      format!(
        "{prefix} {COPYRIGHT_MARKER} (C) {}-{year} {}",
        self.first_year, self.holder
      ),
      format!("{prefix} {SPDX_MARKER}: {}", self.license),
    ];
    if policy.extra_blank_comment_line {
      lines.push(prefix.clone());
    }
    lines
  }
}
