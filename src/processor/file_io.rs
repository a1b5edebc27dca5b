//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Lines are returned without their terminators (`\n` or `\r\n`), a leading
//! UTF-8 byte order mark is dropped, and invalid UTF-8 is replaced rather than
//! rejected, so any text file can be checked.

use std::fs::File;
use std::io::{BufRead as _, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Reads at most `max_lines` lines from the start of a file.
  ///
  /// Only as much of the file as needed is read, which keeps validation cheap
  /// on large sources.
  pub fn read_head_lines(path: &Path, max_lines: usize) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut lines = Vec::with_capacity(max_lines);
    let mut buf = Vec::new();
    while lines.len() < max_lines {
      buf.clear();
      let read = reader
        .read_until(b'\n', &mut buf)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
      if read == 0 {
        break;
      }
      let bytes = if lines.is_empty() {
        buf.strip_prefix(UTF8_BOM).unwrap_or(&buf[..])
      } else {
        &buf[..]
      };
      lines.push(Self::decode_line(bytes));
    }

    Ok(lines)
  }

  /// Reads the whole file as a list of lines.
  ///
  /// Returns the raw I/O error so callers can attach their own error type.
  pub fn read_all_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    Ok(String::from_utf8_lossy(bytes).lines().map(str::to_string).collect())
  }

  /// Write file content.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }

  fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
  }
}
