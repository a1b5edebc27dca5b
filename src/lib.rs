//! # headercheck
//!
//! A tool that checks a list of changed source files for the required
//! copyright and SPDX license header, and writes a patch that fixes the files
//! that lack it.
//!
//! `headercheck` never modifies source files. It reports the non-compliant
//! paths and emits a unified diff that can be applied with `patch -p1`.
//!
//! ## Features
//!
//! * Per-family header policies (comment prefix, trailing blank comment line)
//! * Python encoding declarations on the first two lines are kept in place
//! * Existing headers of any length are replaced, missing ones are inserted
//! * Concurrent checks with results reported in input order
//! * Optional TOML configuration for the holder, license and extra families
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use headercheck::patch::PatchGenerator;
//! use headercheck::rules::HeaderRules;
//! use headercheck::validator::HeaderValidator;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let rules = HeaderRules::builtin(2025);
//!     let path = Path::new("src/main.cpp");
//!
//!     if !HeaderValidator::new(&rules).is_valid(path) {
//!         if let Some(patch) = PatchGenerator::new(&rules).generate(path)? {
//!             print!("{}", patch.diff);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`policy`] - File families and their header policies
//! * [`header`] - Expected header lines for a family and year
//! * [`validator`] - Exact header validation
//! * [`patch`] - Header fixes and their unified diffs
//! * [`processor`] - Batch checking of a candidate list
//!
//! [`policy`]: crate::policy
//! [`header`]: crate::header
//! [`validator`]: crate::validator
//! [`patch`]: crate::patch
//! [`processor`]: crate::processor

pub mod cli;
pub mod config;
pub mod diff;
pub mod encoding;
pub mod header;
pub mod logging;
pub mod output;
pub mod patch;
pub mod policy;
pub mod processor;
pub mod report;
pub mod rules;
pub mod validator;
