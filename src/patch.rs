//! # Patch Module
//!
//! Produces the fix for a file whose header did not validate: the corrected
//! line sequence and a unified diff that turns the original into it.
//!
//! The header region is located in two steps:
//!
//! 1. A presence test looks for the copyright or SPDX marker in the first few
//!    lines after any encoding declaration. It only decides whether the new
//!    header is *inserted* or *replaces* an existing block; it says nothing
//!    about validity.
//! 2. When a block is present, its extent is the contiguous run of lines
//!    starting with the comment prefix, plus one trailing blank line if there
//!    is one. Walking the run instead of assuming a fixed size handles headers
//!    with extra, missing or multi-line notices.
//!
//! A contiguous comment run is taken as a whole, so an unrelated comment glued
//! directly to the header (or a shebang sitting where the header should start)
//! is replaced along with it.
//!
//! Unlike validation, failing to read the file here is a hard error: a batch
//! must not emit fixes computed from content it could not see.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::diff::unified_diff;
use crate::encoding::detect_in_lines;
use crate::header::{COPYRIGHT_MARKER, SPDX_MARKER};
use crate::policy::HeaderPolicy;
use crate::processor::FileIO;
use crate::rules::HeaderRules;

/// Number of lines after the header start searched for header markers.
pub const PRESENCE_SCAN_LINES: usize = 5;

/// Errors raised while generating a patch.
#[derive(Debug, Error)]
pub enum PatchError {
  /// The file could not be read, so no fix can be computed for it.
  #[error("Could not read {}: {source}", .path.display())]
  Unreadable {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// How the header was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum PatchKind {
  /// No header-like block existed; the header was inserted.
  Inserted,
  /// An existing block of `removed` lines was replaced.
  Replaced { removed: usize },
}

/// The fix for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
  pub original: Vec<String>,
  pub corrected: Vec<String>,
  pub kind: PatchKind,
  /// Unified diff from `original` to `corrected`, empty if they are equal.
  pub diff: String,
}

/// Returns whether a header-like block seems to start at `header_start`.
pub fn has_header_block<S: AsRef<str>>(lines: &[S], header_start: usize) -> bool {
  lines
    .iter()
    .skip(header_start)
    .take(PRESENCE_SCAN_LINES)
    .any(|line| {
      let line = line.as_ref();
      line.contains(COPYRIGHT_MARKER) || line.contains(SPDX_MARKER)
    })
}

/// Returns the exclusive end of the comment block starting at `header_start`.
///
/// The block is the run of lines beginning with `comment_prefix`, followed by
/// at most one blank separator line. The walk stops at end of input.
pub fn header_block_end<S: AsRef<str>>(lines: &[S], header_start: usize, comment_prefix: &str) -> usize {
  let mut end = header_start;
  while end < lines.len() && lines[end].as_ref().starts_with(comment_prefix) {
    end += 1;
  }
  if end < lines.len() && lines[end].as_ref().trim().is_empty() {
    end += 1;
  }
  end
}

/// Builds the corrected lines from `original`.
///
/// `expected` is the synthesized header; a blank separator line is added after
/// it. Everything outside the replaced range is kept verbatim and in order.
pub fn apply_header(
  original: &[String],
  expected: &[String],
  comment_prefix: &str,
  header_start: usize,
) -> (Vec<String>, PatchKind) {
  let header_start = header_start.min(original.len());

  let block: Vec<String> = expected
    .iter()
    .cloned()
    .chain(std::iter::once(String::new()))
    .collect();

  let (block_end, kind) = if has_header_block(original, header_start) {
    let end = header_block_end(original, header_start, comment_prefix);
    (
      end,
      PatchKind::Replaced {
        removed: end - header_start,
      },
    )
  } else {
    (header_start, PatchKind::Inserted)
  };

  let mut corrected = Vec::with_capacity(original.len() + block.len());
  corrected.extend_from_slice(&original[..header_start]);
  corrected.extend(block);
  corrected.extend_from_slice(&original[block_end..]);
  (corrected, kind)
}

/// Label used in the diff's file header: the path as given, without a
/// leading separator, so that `patch -p1` strips the `a/`/`b/` prefix only.
pub fn diff_label(path: &Path) -> String {
  path.to_string_lossy().trim_start_matches('/').to_string()
}

/// Generates header fixes against a set of [`HeaderRules`].
pub struct PatchGenerator<'a> {
  rules: &'a HeaderRules,
}

impl<'a> PatchGenerator<'a> {
  pub const fn new(rules: &'a HeaderRules) -> Self {
    Self { rules }
  }

  /// Computes the fix for the file at `path`.
  ///
  /// Returns `Ok(None)` for unsupported file types, which never need one.
  pub fn generate(&self, path: &Path) -> Result<Option<Patch>, PatchError> {
    let original = FileIO::read_all_lines(path).map_err(|source| PatchError::Unreadable {
      path: path.to_path_buf(),
      source,
    })?;

    let Some(policy) = self.rules.classify(path) else {
      return Ok(None);
    };

    Ok(Some(self.generate_for_lines(path, policy, original)))
  }

  /// Computes the fix for already-read content.
  pub fn generate_for_lines(&self, path: &Path, policy: &HeaderPolicy, original: Vec<String>) -> Patch {
    let encoding_line = if policy.encoding_declaration {
      detect_in_lines(&original)
    } else {
      None
    };
    let header_start = encoding_line.map_or(0, |idx| idx + 1);

    let expected = self.rules.template.expected_lines(Some(policy), self.rules.year);
    let (corrected, kind) = apply_header(&original, &expected, &policy.comment_prefix, header_start);

    let label = diff_label(path);
    let diff = unified_diff(&format!("a/{label}"), &format!("b/{label}"), &original, &corrected);
    debug!("Generated {:?} fix for {}", kind, path.display());

    Patch {
      original,
      corrected,
      kind,
      diff,
    }
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;
  use crate::validator::validate_lines;

  const YEAR: i32 = 2025;

  fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
  }

  fn python() -> HeaderPolicy {
    HeaderPolicy::new("#", false, true)
  }

  fn cpp() -> HeaderPolicy {
    HeaderPolicy::new("//", true, false)
  }

  #[test]
  fn test_has_header_block() {
    let content = lines("#!/usr/bin/env python3\nimport os\n# Copyright (C) 2020 Someone\n");
    assert!(has_header_block(&content, 0));
    assert!(has_header_block(&content, 2));
    assert!(!has_header_block(&lines("import os\n"), 0));
    assert!(has_header_block(&lines("// SPDX-License-Identifier: MIT\n"), 0));
  }

  #[test]
  fn test_presence_scan_is_bounded() {
    let content = lines("a\nb\nc\nd\ne\n# Copyright (C) 2020 Late\n");
    assert!(!has_header_block(&content, 0));
    assert!(has_header_block(&content, 1));
  }

  #[test]
  fn test_header_block_end_consumes_one_blank_line() {
    let content = lines("// a\n// b\n\n\nint x;\n");
    assert_eq!(header_block_end(&content, 0, "//"), 3);
  }

  #[test]
  fn test_header_block_end_stops_at_eof() {
    let content = lines("# a\n# b\n");
    assert_eq!(header_block_end(&content, 0, "#"), 2);
    assert_eq!(header_block_end(&content, 2, "#"), 2);
  }

  #[test]
  fn test_header_block_end_whitespace_line_is_blank() {
    let content = lines("# a\n   \nx = 1\n");
    assert_eq!(header_block_end(&content, 0, "#"), 2);
  }

  #[test]
  fn test_insert_into_file_without_header() {
    let rules = HeaderRules::builtin(YEAR);
    let generator = PatchGenerator::new(&rules);
    let patch = generator.generate_for_lines(Path::new("tools/run.py"), &python(), lines("import os\nprint(1)\n"));

    assert_eq!(patch.kind, PatchKind::Inserted);
    assert_eq!(
      patch.corrected,
      vec![
        "# Copyright (C) 2018-2025 Intel Corporation",
        "# SPDX-License-Identifier: Apache-2.0",
        "",
        "import os",
        "print(1)",
      ]
    );
  }

  #[test]
  fn test_replace_larger_block() {
    let rules = HeaderRules::builtin(YEAR);
    let generator = PatchGenerator::new(&rules);
    let original = lines(
      "// Copyright (C) 2018-2020 Intel Corporation\n// SPDX-License-Identifier: Apache-2.0\n// extra\n// more\n//\n\n#include <x>\nint y;\n",
    );
    let patch = generator.generate_for_lines(Path::new("a.cpp"), &cpp(), original);

    assert_eq!(patch.kind, PatchKind::Replaced { removed: 6 });
    assert_eq!(
      patch.corrected,
      vec![
        "// Copyright (C) 2018-2025 Intel Corporation",
        "// SPDX-License-Identifier: Apache-2.0",
        "//",
        "",
        "#include <x>",
        "int y;",
      ]
    );
  }

  #[test]
  fn test_replace_without_separator_line() {
    let rules = HeaderRules::builtin(YEAR);
    let generator = PatchGenerator::new(&rules);
    let original = lines("# Copyright (C) 2019 Intel Corporation\nimport os\n");
    let patch = generator.generate_for_lines(Path::new("a.py"), &python(), original);

    assert_eq!(patch.kind, PatchKind::Replaced { removed: 1 });
    assert_eq!(patch.corrected[2], "");
    assert_eq!(patch.corrected[3], "import os");
  }

  #[test]
  fn test_encoding_line_is_preserved() {
    let rules = HeaderRules::builtin(YEAR);
    let generator = PatchGenerator::new(&rules);
    let original = lines("# -*- coding: utf-8 -*-\nimport os\n");
    let patch = generator.generate_for_lines(Path::new("a.py"), &python(), original);

    assert_eq!(patch.kind, PatchKind::Inserted);
    assert_eq!(patch.corrected[0], "# -*- coding: utf-8 -*-");
    assert_eq!(patch.corrected[1], "# Copyright (C) 2018-2025 Intel Corporation");
    assert_eq!(patch.corrected[4], "import os");
  }

  #[test]
  fn test_corrected_content_validates() {
    let rules = HeaderRules::builtin(YEAR);
    let generator = PatchGenerator::new(&rules);
    let policy = python();
    let expected = rules.template.expected_lines(Some(&policy), YEAR);

    for text in [
      "",
      "import os\n",
      "# Copyright 2000\n# stale\n\nx = 1\n",
      "# coding: latin-1\n# Copyright 2000\nx = 1\n",
      "#!/usr/bin/env python3\n# coding: utf-8\n\n\nx = 1\n",
    ] {
      let patch = generator.generate_for_lines(Path::new("a.py"), &policy, lines(text));
      let start = detect_in_lines(&patch.corrected).map_or(0, |idx| idx + 1);
      assert!(
        validate_lines(&expected, &patch.corrected[start..]),
        "fix for {text:?} does not validate: {:?}",
        patch.corrected
      );
    }
  }

  #[test]
  fn test_diff_labels_strip_leading_separator() {
    let rules = HeaderRules::builtin(YEAR);
    let generator = PatchGenerator::new(&rules);
    let patch = generator.generate_for_lines(Path::new("/abs/dir/x.py"), &python(), lines("x = 1\n"));
    assert!(patch.diff.starts_with("--- a/abs/dir/x.py\n+++ b/abs/dir/x.py\n"));
    assert_eq!(diff_label(Path::new("src/a.cpp")), "src/a.cpp");
  }

  #[test]
  fn test_generate_is_stable() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("a.cpp");
    std::fs::write(&path, "// Copyright 2000\n\nint main() {}\n").expect("write file");

    let rules = HeaderRules::builtin(YEAR);
    let generator = PatchGenerator::new(&rules);
    let first = generator.generate(&path).expect("readable").expect("supported");
    let second = generator.generate(&path).expect("readable").expect("supported");
    assert_eq!(first.diff, second.diff);
    assert!(!first.diff.is_empty());
  }

  #[test]
  fn test_generate_unsupported_is_none() {
    let temp_dir = tempdir().expect("create temp dir");
    let path = temp_dir.path().join("notes.md");
    std::fs::write(&path, "# Notes\n").expect("write file");

    let rules = HeaderRules::builtin(YEAR);
    assert!(PatchGenerator::new(&rules).generate(&path).expect("readable").is_none());
  }

  #[test]
  fn test_generate_unreadable_is_an_error() {
    let temp_dir = tempdir().expect("create temp dir");
    let rules = HeaderRules::builtin(YEAR);
    let err = PatchGenerator::new(&rules)
      .generate(&temp_dir.path().join("missing.cpp"))
      .expect_err("missing file must fail");
    assert!(matches!(err, PatchError::Unreadable { .. }));
    assert!(err.to_string().contains("missing.cpp"));
  }
}
