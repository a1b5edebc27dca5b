//! # headercheck
//!
//! Checks that changed source files carry the required copyright header.

use anyhow::Result;
use headercheck::cli::{Cli, run_check};

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_check(cli.check_args).await
}
