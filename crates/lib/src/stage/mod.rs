//! Artifact staging.
//!
//! Copies tool binaries out of each resolved dependency's first binary
//! directory into the shared staging directories. Staging is split in two:
//! [`plan`] enumerates sources and computes targets without writing anything,
//! and [`stage`] executes the plan in order.
//!
//! There is no rollback. When a copy fails, files copied before it stay in
//! place and the error is returned to the caller.

pub mod rules;
pub mod types;

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::deps::{Dependency, DependencySet};
use crate::layout::{Destination, Layout};
use crate::util::path::slash_relative;

pub use rules::{COPY_RULES, CompiledRule, CopyRule};
pub use types::{CopyOp, ErrorKind, StageError, StageOptions, StagePlan, StageReport};

/// A file found in a binary directory.
struct SourceFile {
  path: PathBuf,
  /// Path below the binary directory, exactly as on disk.
  relative: PathBuf,
  /// `relative` with forward slashes, for pattern matching only.
  match_name: String,
}

/// Every file below `bindir`, sorted by path.
fn list_sources(bindir: &Path) -> Result<Vec<SourceFile>, StageError> {
  let mut files = Vec::new();

  for entry in WalkDir::new(bindir).min_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(bindir).to_path_buf();
      StageError::io(path, e.into())
    })?;

    // Symlinks to files count as files; the copy follows them.
    if !entry.path().is_file() {
      continue;
    }

    let Ok(relative) = entry.path().strip_prefix(bindir) else {
      continue;
    };
    let Some(match_name) = slash_relative(entry.path(), bindir) else {
      continue;
    };

    files.push(SourceFile {
      path: entry.path().to_path_buf(),
      relative: relative.to_path_buf(),
      match_name,
    });
  }

  Ok(files)
}

fn resolve_destinations(layout: &Layout) -> BTreeMap<Destination, PathBuf> {
  Destination::ALL
    .into_iter()
    .map(|destination| (destination, layout.destination(destination)))
    .collect()
}

fn plan_dependency(
  dep: &Dependency,
  bindir: &Path,
  rules: &[CompiledRule],
  destinations: &BTreeMap<Destination, PathBuf>,
  ops: &mut Vec<CopyOp>,
) -> Result<(), StageError> {
  if !bindir.is_dir() {
    warn!(dependency = %dep.reference, bindir = %bindir.display(), "binary directory does not exist, nothing to stage");
    return Ok(());
  }

  if dep.bindirs.len() > 1 {
    debug!(dependency = %dep.reference, ignored = dep.bindirs.len() - 1, "only the first binary directory is staged");
  }

  let sources = list_sources(bindir)?;

  for rule in rules {
    let Some(dest_dir) = destinations.get(&rule.rule.destination) else {
      continue;
    };

    for source in sources.iter().filter(|s| rule.matches(&s.match_name)) {
      ops.push(CopyOp {
        dependency: dep.reference.clone(),
        context: dep.context,
        rule: rule.rule.name,
        destination: rule.rule.destination,
        source: source.path.clone(),
        target: dest_dir.join(&source.relative),
      });
    }
  }

  Ok(())
}

/// Compute the copies staging would perform, in execution order.
///
/// Order is dependency order, then rule order, then sorted source path. Reads
/// the binary directories but writes nothing.
pub fn plan(deps: &DependencySet, layout: &Layout) -> Result<StagePlan, StageError> {
  let rules = rules::compile_all()?;
  let destinations = resolve_destinations(layout);

  let mut result = StagePlan::default();

  for dep in deps.iter() {
    match dep.primary_bindir() {
      Some(bindir) => plan_dependency(dep, bindir, &rules, &destinations, &mut result.ops)?,
      None => {
        debug!(dependency = %dep.reference, "no binary directories, skipping");
        result.skipped.push(dep.reference.clone());
      }
    }
  }

  Ok(result)
}

/// Perform the copies of a plan in order.
///
/// Destination directories are created as needed. Existing targets are
/// overwritten, so when two dependencies provide the same file the later one wins.
pub fn execute(plan: &StagePlan) -> Result<(), StageError> {
  let mut created: HashSet<PathBuf> = HashSet::new();

  for op in &plan.ops {
    if let Some(parent) = op.target.parent() {
      if !created.contains(parent) {
        fs::create_dir_all(parent).map_err(|e| StageError::io(parent, e))?;
        created.insert(parent.to_path_buf());
      }
    }

    fs::copy(&op.source, &op.target).map_err(|e| StageError::io(&op.target, e))?;
    debug!(
      dependency = %op.dependency,
      rule = op.rule,
      source = %op.source.display(),
      target = %op.target.display(),
      "staged"
    );
  }

  Ok(())
}

/// Stage the tool binaries of `deps` under `layout`.
pub fn stage(deps: &DependencySet, layout: &Layout, options: &StageOptions) -> Result<StageReport, StageError> {
  let start = Instant::now();
  let plan = plan(deps, layout)?;

  if !options.dry_run {
    execute(&plan)?;
  }

  info!(
    dependencies = deps.len(),
    copied = plan.ops.len(),
    skipped = plan.skipped.len(),
    dry_run = options.dry_run,
    elapsed_ms = start.elapsed().as_millis() as u64,
    "staging complete"
  );

  Ok(StageReport {
    copied: plan.ops,
    skipped: plan.skipped,
    dry_run: options.dry_run,
  })
}

/// Load a dependency file and stage it.
pub fn stage_file(deps_file: &Path, layout: &Layout, options: &StageOptions) -> Result<StageReport, StageError> {
  let deps = DependencySet::load(deps_file)?;
  stage(&deps, layout, options)
}
