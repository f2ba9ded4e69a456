//! Implementation of the `toolstage plan` command.
//!
//! Prints the copies `stage` would perform without touching the filesystem.

use anyhow::{Context, Result};

use toolstage_lib::stage::plan;

use super::StageArgs;
use crate::output::{OutputFormat, print_info, print_json, print_list_item, print_planned_copy};

pub fn cmd_plan(args: &StageArgs, verbose: bool, output: OutputFormat) -> Result<()> {
  let layout = args.layout()?;
  let deps = args.load_deps()?;

  let plan = plan(&deps, &layout).context("Failed to plan staging")?;

  if output.is_json() {
    return print_json(&plan);
  }

  if plan.ops.is_empty() {
    print_info("Nothing to stage");
  }

  for op in &plan.ops {
    let origin = format!("{}, {} [{}]", op.rule, op.dependency, op.context.as_str());
    print_planned_copy(&op.target, &origin, verbose.then_some(op.source.as_path()));
  }

  for reference in &plan.skipped {
    print_list_item(&format!("{} (no bindirs)", reference));
  }

  println!();
  println!("Would copy {} file(s)", plan.ops.len());

  Ok(())
}
