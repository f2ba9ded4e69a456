//! Implementation of the `toolstage stage` command.
//!
//! Loads the resolved dependency set and copies tool binaries into the staging
//! directories next to the build root.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use toolstage_lib::layout::Destination;
use toolstage_lib::recipe::Recipe;
use toolstage_lib::stage::{StageOptions, StageReport, stage};

use super::StageArgs;
use crate::output::{
  OutputFormat, format_bytes, format_duration, print_info, print_json, print_stat, print_success, print_warning,
};

pub fn cmd_stage(args: &StageArgs, dry_run: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let layout = args.layout()?;
  let deps = args.load_deps()?;
  let bin_dir = layout.bin_dir();

  let recipe = Recipe::default();
  let missing = recipe.check(&deps);

  let report = stage(&deps, &layout, &StageOptions { dry_run }).context("Staging failed")?;
  info!(bin = %bin_dir.display(), copied = report.copied.len(), "staged tools");

  if output.is_json() {
    return print_json(&report);
  }

  println!();
  if dry_run {
    print_info("Dry run - no files copied");
  } else {
    print_success("Staging complete!");
  }
  for tool in &missing {
    print_warning(&format!("Tool requirement {} not in dependency set", tool));
  }

  print_stat("Staging directory", &bin_dir.display().to_string());
  print_stat("Dependencies", &deps.len().to_string());
  print_stat("Files", &report.copied.len().to_string());
  for destination in Destination::ALL {
    print_stat(&format!("  {}", destination), &report.count_for(destination).to_string());
  }
  print_stat("Size", &format_bytes(staged_bytes(&report)));
  if !report.skipped.is_empty() {
    print_stat("Skipped (no bindirs)", &report.skipped.join(", "));
  }
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}

fn staged_bytes(report: &StageReport) -> u64 {
  report
    .copied
    .iter()
    .filter_map(|op| std::fs::metadata(&op.source).ok())
    .map(|m| m.len())
    .sum()
}
