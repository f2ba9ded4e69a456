//! Resolved dependency set.
//!
//! The package manager writes the resolved graph as JSON; this module reads it,
//! checks required fields, and anchors relative binary directories to the file
//! that named them.

mod types;

use std::path::Path;

use tracing::debug;

pub use types::{DepContext, Dependency, DependencySet, DepsError};
use types::RawDocument;

impl DependencySet {
  /// Parse a dependency document.
  ///
  /// Relative binary directories are joined onto `base` when one is given.
  pub fn from_json(json: &str, base: Option<&Path>) -> Result<Self, DepsError> {
    let document: RawDocument = serde_json::from_str(json)?;

    let mut dependencies = Vec::new();
    for (index, raw) in document.into_entries().into_iter().enumerate() {
      let mut dep = raw.validate(index)?;
      if let Some(base) = base {
        dep.bindirs = dep
          .bindirs
          .into_iter()
          .map(|dir| if dir.is_relative() { base.join(dir) } else { dir })
          .collect();
      }
      dependencies.push(dep);
    }

    Ok(Self { dependencies })
  }

  /// Read a dependency file from disk.
  pub fn load(path: &Path) -> Result<Self, DepsError> {
    let json = std::fs::read_to_string(path).map_err(|source| DepsError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let base = path.parent().filter(|p| !p.as_os_str().is_empty());
    let set = Self::from_json(&json, base)?;
    debug!(path = %path.display(), count = set.len(), "loaded dependency set");
    Ok(set)
  }
}
