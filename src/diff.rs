//! # Diff Module
//!
//! This module renders unified diffs between the original and the corrected
//! lines of a file, and optionally echoes them to the terminal.
//!
//! The output follows the conventional layout understood by `patch` and
//! `git apply`: a `---`/`+++` file header, then hunks introduced by
//! `@@ -start,len +start,len @@` with three lines of context.

use std::ops::Range;
use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::{Algorithm, ChangeTag, DiffOp, TextDiff};

/// Lines of unchanged context around each hunk.
pub const CONTEXT_LINES: usize = 3;

/// Renders a unified diff between two line sequences.
///
/// Lines are given without terminators; every emitted line ends in `\n`.
/// Returns an empty string when the sequences are equal.
pub fn unified_diff<O, N>(from_label: &str, to_label: &str, old: &[O], new: &[N]) -> String
where
  O: AsRef<str>,
  N: AsRef<str>,
{
  let old: Vec<&str> = old.iter().map(|line| line.as_ref()).collect();
  let new: Vec<&str> = new.iter().map(|line| line.as_ref()).collect();

  let diff = TextDiff::configure().algorithm(Algorithm::Myers).diff_slices(old.as_slice(), new.as_slice());
  let groups = diff.grouped_ops(CONTEXT_LINES);
  if groups.is_empty() {
    return String::new();
  }

  let mut out = String::new();
  out.push_str(&format!("--- {from_label}\n"));
  out.push_str(&format!("+++ {to_label}\n"));

  for group in &groups {
    let (old_start, old_end) = hunk_span(group.iter().map(DiffOp::old_range));
    let (new_start, new_end) = hunk_span(group.iter().map(DiffOp::new_range));
    out.push_str(&format!(
      "@@ -{} +{} @@\n",
      format_range(old_start, old_end),
      format_range(new_start, new_end)
    ));

    for op in group {
      for change in diff.iter_changes(op) {
        let sign = match change.tag() {
          ChangeTag::Delete => '-',
          ChangeTag::Insert => '+',
          ChangeTag::Equal => ' ',
        };
        out.push_str(&format!("{sign}{}\n", change.value()));
      }
    }
  }

  out
}

/// Extent of one side of a hunk.
///
/// Ops of a group are not always ordered on both sides: Myers may place a
/// delete before an equal run whose new-side index is lower. The span is
/// therefore taken over every non-empty range, and only falls back to the
/// first (empty) range when the side has no lines in the hunk at all.
fn hunk_span(ranges: impl Iterator<Item = Range<usize>>) -> (usize, usize) {
  let mut span: Option<(usize, usize)> = None;
  let mut anchor = None;
  for range in ranges {
    anchor.get_or_insert(range.start);
    if range.is_empty() {
      continue;
    }
    span = Some(match span {
      Some((start, end)) => (start.min(range.start), end.max(range.end)),
      None => (range.start, range.end),
    });
  }
  span.unwrap_or_else(|| {
    let start = anchor.unwrap_or(0);
    (start, start)
  })
}

/// Formats a hunk range the way `diff -u` does: a single line is written as
/// its 1-based number, an empty range as `start,0` pointing at the line before.
fn format_range(start: usize, end: usize) -> String {
  let len = end - start;
  match len {
    1 => format!("{}", start + 1),
    0 => format!("{start},0"),
    _ => format!("{},{len}", start + 1),
  }
}

/// Echoes rendered diffs to stderr when enabled.
pub struct DiffManager {
  /// Whether to show diffs on stderr
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Prints `diff` for `path` to stderr with colorized `+`/`-` lines.
  pub fn display_diff(&self, path: &Path, diff: &str) {
    if !self.show_diff || diff.is_empty() {
      return;
    }

    eprintln!("Diff for {}:", path.display());
    for line in diff.lines() {
      if line.starts_with("+++") || line.starts_with("---") {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.bold()));
      } else if line.starts_with("@@") {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.cyan()));
      } else if line.starts_with('+') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green()));
      } else if line.starts_with('-') {
        eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red()));
      } else {
        eprintln!("{line}");
      }
    }
    eprintln!();
  }
}
