#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Year passed to every test run so expectations do not depend on the clock.
pub const TEST_YEAR: i32 = 2025;

/// The Python header for [`TEST_YEAR`], followed by its blank separator.
pub const PY_HEADER: &str = "# Copyright (C) 2018-2025 Intel Corporation\n# SPDX-License-Identifier: Apache-2.0\n\n";

/// The C++ header for [`TEST_YEAR`], followed by its blank separator.
pub const CPP_HEADER: &str =
  "// Copyright (C) 2018-2025 Intel Corporation\n// SPDX-License-Identifier: Apache-2.0\n//\n\n";

/// Writes `content` to `name` under `dir`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(name);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Writes the candidate list `changed_files.txt` under `dir`.
pub fn write_changed_list(dir: &Path, names: &[&str]) -> Result<PathBuf> {
  write_file(dir, "changed_files.txt", &(names.join("\n") + "\n"))
}

/// Parses one side of a hunk header (`-3,4`, `+1`, `-0,0`) into start and length.
fn parse_range(range: &str) -> Result<(usize, usize)> {
  let range = &range[1..];
  let (start, len) = match range.split_once(',') {
    Some((start, len)) => (start.parse()?, len.parse()?),
    None => (range.parse()?, 1),
  };
  Ok((start, len))
}

/// A hunk as announced by its header, plus the body lines that followed it.
struct Hunk<'a> {
  old: (usize, usize),
  new: (usize, usize),
  body: Vec<&'a str>,
}

fn parse_hunks(diff: &str) -> Result<Vec<Hunk<'_>>> {
  let mut hunks: Vec<Hunk<'_>> = Vec::new();
  for line in diff.lines() {
    if line.starts_with("--- ") || line.starts_with("+++ ") {
      if !hunks.is_empty() {
        bail!("file header {line:?} after the first hunk");
      }
      continue;
    }
    if let Some(header) = line.strip_prefix("@@ ") {
      let header = header.strip_suffix(" @@").context("malformed hunk header")?;
      let (old, new) = header.split_once(' ').context("malformed hunk header")?;
      if !old.starts_with('-') || !new.starts_with('+') {
        bail!("malformed hunk header {line:?}");
      }
      hunks.push(Hunk {
        old: parse_range(old)?,
        new: parse_range(new)?,
        body: Vec::new(),
      });
      continue;
    }
    match hunks.last_mut() {
      Some(hunk) => hunk.body.push(line),
      None => bail!("diff line {line:?} before any hunk header"),
    }
  }
  Ok(hunks)
}

/// Applies a single-file unified diff to `original`, as strictly as `patch`.
///
/// Both ranges of every hunk header are checked: the number of context and
/// removed lines must equal the old length, the number of context and added
/// lines the new length, and the new start must agree with where the hunk
/// lands in the output. Context and removed lines must match the original.
pub fn apply_unified_diff(original: &str, diff: &str) -> Result<String> {
  let old: Vec<&str> = original.lines().collect();
  let mut out: Vec<String> = Vec::new();
  let mut pos = 0;

  for hunk in parse_hunks(diff)? {
    let (old_start, old_len) = hunk.old;
    let (new_start, new_len) = hunk.new;

    let copy_until = if old_len == 0 { old_start } else { old_start - 1 };
    if copy_until < pos || copy_until > old.len() {
      bail!("hunk at old line {old_start} is out of order or out of range");
    }
    out.extend(old[pos..copy_until].iter().map(|line| line.to_string()));
    pos = copy_until;

    let expected_new = if new_len == 0 { new_start } else { new_start - 1 };
    if out.len() != expected_new {
      bail!("hunk claims new start {new_start}, but lands after line {}", out.len());
    }

    let (mut seen_old, mut seen_new) = (0, 0);
    for line in hunk.body {
      if let Some(added) = line.strip_prefix('+') {
        out.push(added.to_string());
        seen_new += 1;
      } else if let Some(removed) = line.strip_prefix('-') {
        if old.get(pos) != Some(&removed) {
          bail!("removed line {removed:?} does not match original line {}", pos + 1);
        }
        pos += 1;
        seen_old += 1;
      } else if let Some(context) = line.strip_prefix(' ') {
        if old.get(pos) != Some(&context) {
          bail!("context line {context:?} does not match original line {}", pos + 1);
        }
        out.push(context.to_string());
        pos += 1;
        seen_old += 1;
        seen_new += 1;
      } else {
        bail!("unexpected diff line {line:?}");
      }
    }

    if (seen_old, seen_new) != (old_len, new_len) {
      bail!(
        "hunk header -{old_start},{old_len} +{new_start},{new_len} does not match its body ({seen_old} old, {seen_new} new lines)"
      );
    }
  }

  out.extend(old[pos..].iter().map(|line| line.to_string()));
  Ok(out.iter().map(|line| format!("{line}\n")).collect())
}

/// Splits a combined patch into its per-file diffs.
pub fn split_combined_diff(combined: &str) -> Vec<String> {
  let mut diffs: Vec<String> = Vec::new();
  for line in combined.lines() {
    if line.starts_with("--- ") {
      diffs.push(String::new());
    }
    if line.is_empty() {
      continue;
    }
    if let Some(current) = diffs.last_mut() {
      current.push_str(line);
      current.push('\n');
    }
  }
  diffs
}
