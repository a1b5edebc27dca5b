//! # Patch tests
//!
//! Exercise the validator and the patch generator through the library API,
//! applying the produced diffs to check that they really fix the header.

mod common;

use std::fs;
use std::path::Path;

use common::{CPP_HEADER, PY_HEADER, TEST_YEAR, apply_unified_diff, write_file};
use headercheck::patch::{PatchError, PatchGenerator, PatchKind};
use headercheck::rules::HeaderRules;
use headercheck::validator::HeaderValidator;
use tempfile::tempdir;

/// Generates the fix for `path`, applies it in place and returns the new content.
fn fix_in_place(rules: &HeaderRules, path: &Path) -> anyhow::Result<String> {
  let original = fs::read_to_string(path)?;
  let patch = PatchGenerator::new(rules)
    .generate(path)?
    .ok_or_else(|| anyhow::anyhow!("no patch for {}", path.display()))?;
  let fixed = apply_unified_diff(&original, &patch.diff)?;
  fs::write(path, &fixed)?;
  Ok(fixed)
}

#[test]
fn test_applied_fix_validates() -> anyhow::Result<()> {
  let temp_dir = tempdir()?;
  let rules = HeaderRules::builtin(TEST_YEAR);
  let validator = HeaderValidator::new(&rules);

  let cases = [
    ("missing.cpp", "#include <vector>\n\nint main() {}\n"),
    ("stale.h", "// Copyright (C) 2018-2020 Intel Corporation\n// SPDX-License-Identifier: Apache-2.0\n//\n\n#pragma once\n"),
    ("wrong_holder.py", "# Copyright (C) 2018-2025 Someone Else\n# SPDX-License-Identifier: Apache-2.0\n\nprint('x')\n"),
    ("encoded.py", "# -*- coding: utf-8 -*-\nimport sys\n"),
    ("spdx_only.hpp", "// SPDX-License-Identifier: MIT\nstruct S {};\n"),
    ("tiny.py", "x = 1\n"),
    ("stray_blank.cpp", "  \n// Copyright (C) 2018-2020 Intel Corporation\nint x;\n"),
    ("stray_blank.py", " \t\n# Copyright (C) 2018-2020 Intel Corporation\nimport os\n"),
  ];

  for (name, content) in cases {
    let path = write_file(temp_dir.path(), name, content)?;
    assert!(!validator.is_valid(&path), "{name} should start invalid");

    fix_in_place(&rules, &path)?;
    assert!(validator.is_valid(&path), "{name} should be valid after the fix");
  }
  Ok(())
}

#[test]
fn test_malformed_hunk_header_is_rejected() {
  let original = "a\nb\n";
  // Body has one old line but the header claims two on the new side
  assert!(apply_unified_diff(original, "--- a/f\n+++ b/f\n@@ -1 +1,2 @@\n-a\n+c\n").is_err());
  // New start disagrees with where the hunk lands
  assert!(apply_unified_diff(original, "--- a/f\n+++ b/f\n@@ -1,2 +2,3 @@\n+c\n a\n b\n").is_err());
  assert_eq!(
    apply_unified_diff(original, "--- a/f\n+++ b/f\n@@ -1,2 +1,3 @@\n+c\n a\n b\n").expect("well-formed"),
    "c\na\nb\n"
  );
}

#[test]
fn test_fixed_file_needs_no_further_patch() -> anyhow::Result<()> {
  let temp_dir = tempdir()?;
  let rules = HeaderRules::builtin(TEST_YEAR);
  let path = write_file(temp_dir.path(), "a.cpp", "int a;\n")?;

  let fixed = fix_in_place(&rules, &path)?;
  assert_eq!(fixed, format!("{CPP_HEADER}int a;\n"));

  let patch = PatchGenerator::new(&rules)
    .generate(&path)?
    .ok_or_else(|| anyhow::anyhow!("supported file"))?;
  assert!(patch.diff.is_empty());
  assert_eq!(patch.kind, PatchKind::Replaced { removed: 4 });
  Ok(())
}

#[test]
fn test_same_year_gives_identical_diffs() -> anyhow::Result<()> {
  let temp_dir = tempdir()?;
  let path = write_file(temp_dir.path(), "tool.py", "# Copyright 2010 X\n# more\nimport os\n")?;

  let first = PatchGenerator::new(&HeaderRules::builtin(TEST_YEAR)).generate(&path)?;
  let second = PatchGenerator::new(&HeaderRules::builtin(TEST_YEAR)).generate(&path)?;
  assert_eq!(first, second);

  let other_year = PatchGenerator::new(&HeaderRules::builtin(TEST_YEAR + 1)).generate(&path)?;
  assert_ne!(first, other_year);
  Ok(())
}

#[test]
fn test_insertion_removes_nothing() -> anyhow::Result<()> {
  let temp_dir = tempdir()?;
  let rules = HeaderRules::builtin(TEST_YEAR);
  let content = "# just a comment\nimport os\n";
  let path = write_file(temp_dir.path(), "tool.py", content)?;

  let patch = PatchGenerator::new(&rules)
    .generate(&path)?
    .ok_or_else(|| anyhow::anyhow!("supported file"))?;
  assert_eq!(patch.kind, PatchKind::Inserted);
  assert!(!patch.diff.lines().any(|line| line.starts_with('-') && !line.starts_with("---")));
  assert_eq!(apply_unified_diff(content, &patch.diff)?, format!("{PY_HEADER}{content}"));
  Ok(())
}

#[test]
fn test_unsupported_file_has_no_patch() -> anyhow::Result<()> {
  let temp_dir = tempdir()?;
  let rules = HeaderRules::builtin(TEST_YEAR);
  let path = write_file(temp_dir.path(), "notes.md", "hello\n")?;

  assert!(HeaderValidator::new(&rules).is_valid(&path));
  assert!(PatchGenerator::new(&rules).generate(&path)?.is_none());
  Ok(())
}

#[test]
fn test_unreadable_file_is_patch_error() -> anyhow::Result<()> {
  let temp_dir = tempdir()?;
  let rules = HeaderRules::builtin(TEST_YEAR);
  let path = temp_dir.path().join("gone.cpp");

  // Validation degrades to invalid, patch generation refuses
  assert!(!HeaderValidator::new(&rules).is_valid(&path));
  let err = PatchGenerator::new(&rules).generate(&path).expect_err("unreadable");
  assert!(matches!(err, PatchError::Unreadable { .. }));
  assert!(err.to_string().contains("gone.cpp"));
  Ok(())
}
