mod info;
mod plan;
mod requires;
mod stage;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use toolstage_lib::consts::BUILD_ROOT_ENV;
use toolstage_lib::deps::DependencySet;
use toolstage_lib::layout::{self, Layout};

pub use info::cmd_info;
pub use plan::cmd_plan;
pub use requires::cmd_requires;
pub use stage::cmd_stage;

/// Inputs shared by `stage` and `plan`.
#[derive(Debug, Args)]
pub struct StageArgs {
  /// Resolved dependency set (JSON) written by the package manager
  #[arg(short, long)]
  pub deps: PathBuf,

  /// Build output root [env: TOOLSTAGE_BUILD_ROOT]
  #[arg(short, long, conflicts_with = "source_dir")]
  pub build_root: Option<PathBuf>,

  /// Source tree using the cmake layout (`<source>/build/<build-type>`)
  #[arg(long)]
  pub source_dir: Option<PathBuf>,

  /// Build type for the cmake layout
  #[arg(long, default_value = "Release")]
  pub build_type: String,

  /// Components to climb above the build root before `bin` [env: TOOLSTAGE_ASCEND]
  #[arg(long)]
  pub ascend: Option<usize>,
}

impl StageArgs {
  /// Pick the build root from flags, then the environment.
  pub fn layout(&self) -> Result<Layout> {
    let root = match (&self.build_root, &self.source_dir) {
      (Some(root), _) => root.clone(),
      (None, Some(source)) => Layout::cmake(source, &self.build_type).build_root().to_path_buf(),
      (None, None) => match layout::build_root_from_env() {
        Some(root) => root,
        None => bail!("No build root: pass --build-root, --source-dir, or set {}", BUILD_ROOT_ENV),
      },
    };

    let ascend = self.ascend.unwrap_or_else(layout::ascend_from_env);
    let resolved = Layout::resolve(&root).context("Failed to resolve build root")?;
    Ok(resolved.with_ascend(ascend))
  }

  pub fn load_deps(&self) -> Result<DependencySet> {
    DependencySet::load(&self.deps).with_context(|| format!("Failed to load dependencies: {}", self.deps.display()))
  }
}
