//! # Check Command
//!
//! This module implements the header check over a list of changed files.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::load_config;
use crate::diff::DiffManager;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_files_ok, print_blank_line, print_file_status, print_issues, print_nothing_to_check, print_patch_hint,
  print_start_message, print_summary,
};
use crate::patch::PatchError;
use crate::processor::{Processor, read_candidate_list};
use crate::report::{
  BatchSummary, DEFAULT_DIFF_FILE, DEFAULT_ISSUES_FILE, ReportGenerator, non_compliant_paths, write_artifacts,
};
use crate::rules::HeaderRules;
use crate::verbose_log;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
  /// File listing the changed files to check, one path per line
  #[arg(value_name = "CHANGED_FILES")]
  pub changed_files: PathBuf,

  /// Year used as the end of the copyright range (default: current year)
  #[arg(long)]
  pub year: Option<i32>,

  /// Path to config file (default: .headercheck.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Where to write the list of files with header issues
  #[arg(long, value_name = "FILE", default_value = DEFAULT_ISSUES_FILE)]
  pub issues_file: PathBuf,

  /// Where to write the combined patch fixing the headers
  #[arg(long, value_name = "FILE", default_value = DEFAULT_DIFF_FILE)]
  pub diff_file: PathBuf,

  /// Generate a JSON report of header status and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Print the diff of each fix to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Number of files checked concurrently (default: number of CPUs)
  #[arg(long, short = 'j', value_name = "N")]
  pub jobs: Option<usize>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the list of files with issues
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Builds the rules of this run from the optional config file.
fn build_rules(args: &CheckArgs, year: i32) -> Result<HeaderRules> {
  let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
  let config = load_config(args.config.as_deref(), &cwd, args.no_config)?;

  match config {
    Some(config) => {
      debug!("Using configuration file for header settings");
      Ok(config.rules(year)?)
    }
    None => Ok(HeaderRules::builtin(year)),
  }
}

/// Run the check command with the given arguments
pub async fn run_check(args: CheckArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  // The clock is read once; every file of the batch sees this year.
  let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
  debug!("Checking headers for year {year}");

  let rules = build_rules(&args, year)?;

  if !args.changed_files.is_file() {
    eprintln!("Error: File {} not found", args.changed_files.display());
    process::exit(1);
  }
  let candidates = read_candidate_list(&args.changed_files)?;
  verbose_log!(
    "Read {} candidates from {}",
    candidates.len(),
    args.changed_files.display()
  );

  let jobs = args.jobs.unwrap_or_else(num_cpus::get);
  let processor = Processor::new(rules, jobs);
  let (checkable, skipped) = processor.plan(candidates);

  if checkable.is_empty() {
    print_nothing_to_check();
    if let Some(ref report_path) = args.report_json {
      ReportGenerator::new(report_path).generate(&skipped, year)?;
    }
    return Ok(());
  }

  print_start_message(checkable.len());

  let diff_manager = DiffManager::new(args.show_diff);
  let start_time = Instant::now();

  let result = processor
    .process(checkable, |record| {
      print_file_status(record);
      if let Some(ref diff) = record.diff {
        diff_manager.display_diff(&record.path, diff);
      }
    })
    .await;

  let mut records = match result {
    Ok(records) => records,
    Err(e) => {
      eprintln!("Error: {e:#}");
      if let Some(PatchError::Unreadable { path, .. }) = e.downcast_ref::<PatchError>() {
        eprintln!(
          "File '{}' was identified as having copyright issues but cannot be read for generating fixes.",
          path.display()
        );
      }
      process::exit(1);
    }
  };
  debug!("Checked {} files in {:.2?}", records.len(), start_time.elapsed());

  records.extend(skipped);
  print_summary(&BatchSummary::from_records(&records));

  if let Some(ref report_path) = args.report_json {
    ReportGenerator::new(report_path).generate(&records, year)?;
    verbose_log!("Wrote JSON report to {}", report_path.display());
  }

  let issues = non_compliant_paths(&records);
  print_blank_line();

  if issues.is_empty() {
    print_all_files_ok();
    return Ok(());
  }

  print_issues(&issues);
  write_artifacts(&records, &args.issues_file, &args.diff_file)?;
  print_blank_line();
  print_patch_hint(&args.issues_file, &args.diff_file);

  process::exit(1);
}
