//! Build directory layout.
//!
//! The build root follows the cmake convention of `<source>/build/<build_type>`.
//! Staged tools go to a `bin` directory found by climbing a fixed number of
//! levels above the build root (never past the filesystem root), so every build type of every checkout
//! under the same parent shares one tool directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::consts::{ASCEND_ENV, BUILD_ROOT_ENV, DEFAULT_ASCEND};
use crate::util::path::ascend;

#[derive(Debug, Error)]
pub enum LayoutError {
  #[error("failed to resolve build root {}: {source}", .path.display())]
  Resolve {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Staging directories, relative to the shared `bin` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
  /// `bin/` itself: assemblers and ragel.
  Bin,
  /// `bin/bison/bin/`
  BisonBin,
  /// `bin/m4/bin/`
  M4Bin,
  /// `bin/bison/res/`: receives every file of every dependency.
  BisonRes,
}

impl Destination {
  pub const ALL: [Destination; 4] = [
    Destination::Bin,
    Destination::BisonBin,
    Destination::M4Bin,
    Destination::BisonRes,
  ];

  /// Path below `bin/`, slash separated. Empty for `bin/` itself.
  pub fn relative(&self) -> &'static str {
    match self {
      Destination::Bin => "",
      Destination::BisonBin => "bison/bin",
      Destination::M4Bin => "m4/bin",
      Destination::BisonRes => "bison/res",
    }
  }
}

impl fmt::Display for Destination {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Destination::Bin => write!(f, "bin"),
      other => write!(f, "bin/{}", other.relative()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  build_root: PathBuf,
  ascend: usize,
}

impl Layout {
  pub fn new(build_root: impl Into<PathBuf>) -> Self {
    Self {
      build_root: build_root.into(),
      ascend: DEFAULT_ASCEND,
    }
  }

  /// Layout of a cmake single-config build: `<source>/build/<build_type>`.
  pub fn cmake(source_dir: &Path, build_type: &str) -> Self {
    Self::new(source_dir.join("build").join(build_type))
  }

  /// Make the build root absolute so climbing does not depend on the working directory.
  ///
  /// Existing roots are canonicalized; roots not created yet are made absolute lexically.
  pub fn resolve(build_root: &Path) -> Result<Self, LayoutError> {
    let resolved = if build_root.exists() {
      dunce::canonicalize(build_root)
    } else {
      std::path::absolute(build_root)
    }
    .map_err(|source| LayoutError::Resolve {
      path: build_root.to_path_buf(),
      source,
    })?;

    Ok(Self::new(resolved))
  }

  pub fn with_ascend(mut self, ascend: usize) -> Self {
    self.ascend = ascend;
    self
  }

  pub fn build_root(&self) -> &Path {
    &self.build_root
  }

  pub fn ascend(&self) -> usize {
    self.ascend
  }

  /// The shared tool directory: `<build root>` followed by `ascend` `..` components, then `bin`.
  ///
  /// Climbing past the filesystem root stays at the root.
  pub fn bin_dir(&self) -> PathBuf {
    ascend(&self.build_root, self.ascend).join("bin")
  }

  pub fn destination(&self, destination: Destination) -> PathBuf {
    let mut dir = self.bin_dir();
    for part in destination.relative().split('/').filter(|p| !p.is_empty()) {
      dir.push(part);
    }
    dir
  }
}

/// Build root named by the environment, if any.
pub fn build_root_from_env() -> Option<PathBuf> {
  std::env::var_os(BUILD_ROOT_ENV)
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
}

/// Ascent depth from the environment, falling back to the default.
pub fn ascend_from_env() -> usize {
  match std::env::var(ASCEND_ENV) {
    Ok(value) => match value.trim().parse() {
      Ok(n) => n,
      Err(_) => {
        warn!(value = %value, default = DEFAULT_ASCEND, "ignoring invalid {}", ASCEND_ENV);
        DEFAULT_ASCEND
      }
    },
    Err(_) => DEFAULT_ASCEND,
  }
}
