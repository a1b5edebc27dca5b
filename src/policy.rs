//! # Policy Module
//!
//! Maps file paths to the header policy of their file family. A policy says
//! which line-comment prefix the header uses, whether a bare comment line
//! follows the two mandatory lines, and whether the family allows a leading
//! encoding declaration that must be skipped.
//!
//! The families form a fixed table. Supporting a new family means adding an
//! entry to the table (or to the `[families]` section of the config file), not
//! writing new logic.

use std::path::Path;

use serde::Serialize;

/// Header rules for one file family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderPolicy {
  /// Line-comment prefix, e.g. `//` or `#`.
  pub comment_prefix: String,
  /// Whether a bare `<prefix>` line follows the SPDX line.
  pub extra_blank_comment_line: bool,
  /// Whether files of this family may start with an encoding declaration.
  pub encoding_declaration: bool,
}

impl HeaderPolicy {
  pub fn new(comment_prefix: &str, extra_blank_comment_line: bool, encoding_declaration: bool) -> Self {
    Self {
      comment_prefix: comment_prefix.to_string(),
      extra_blank_comment_line,
      encoding_declaration,
    }
  }
}

/// A named family: the extensions it covers and the policy they share.
#[derive(Debug, Clone)]
pub struct FileFamily {
  pub name: String,
  /// Extensions including the leading dot, matched case-sensitively.
  pub extensions: Vec<String>,
  pub policy: HeaderPolicy,
}

/// Lookup table from extension to [`HeaderPolicy`].
#[derive(Debug, Clone)]
pub struct PolicyTable {
  families: Vec<FileFamily>,
}

impl Default for PolicyTable {
  fn default() -> Self {
    Self::builtin()
  }
}

impl PolicyTable {
  /// The built-in families: C++ sources and headers, and Python scripts.
  pub fn builtin() -> Self {
    Self {
      families: vec![
        FileFamily {
          name: "cpp".to_string(),
          extensions: vec![".cpp".to_string(), ".hpp".to_string(), ".h".to_string()],
          policy: HeaderPolicy::new("//", true, false),
        },
        FileFamily {
          name: "python".to_string(),
          extensions: vec![".py".to_string()],
          policy: HeaderPolicy::new("#", false, true),
        },
      ],
    }
  }

  /// Adds a family to the table.
  ///
  /// Extensions claimed by the new family are removed from every family
  /// already in the table, so the latest registration wins. Families left
  /// without extensions are dropped.
  pub fn register(&mut self, family: FileFamily) {
    for existing in &mut self.families {
      existing.extensions.retain(|ext| !family.extensions.contains(ext));
    }
    self.families.retain(|f| !f.extensions.is_empty());
    self.families.push(family);
  }

  pub fn families(&self) -> &[FileFamily] {
    &self.families
  }

  /// Returns the policy for `path`, or `None` if its extension is not covered.
  ///
  /// Only the final suffix counts, so `foo.tar.h` is a header file and a file
  /// without a dot (`Makefile`) is unsupported.
  pub fn classify(&self, path: &Path) -> Option<&HeaderPolicy> {
    let ext = path.extension()?.to_str()?;
    self
      .families
      .iter()
      .find(|family| {
        family
          .extensions
          .iter()
          .any(|candidate| candidate.strip_prefix('.') == Some(ext))
      })
      .map(|family| &family.policy)
  }

  pub fn is_supported(&self, path: &Path) -> bool {
    self.classify(path).is_some()
  }

  /// Whether `path` should be checked at all: it must exist as a regular file
  /// and belong to a supported family.
  pub fn is_checkable(&self, path: &Path) -> bool {
    path.is_file() && self.is_supported(path)
  }
}
