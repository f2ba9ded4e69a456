//! Resolved dependency metadata.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading the resolved dependency set.
#[derive(Debug, Error)]
pub enum DepsError {
  /// The dependency file could not be read.
  #[error("failed to read dependency file {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The dependency file is not valid JSON or has the wrong shape.
  #[error("malformed dependency metadata: {0}")]
  Parse(#[from] serde_json::Error),

  /// A dependency entry lacks a field every entry must carry.
  #[error("dependency #{index} is missing required field '{field}'")]
  MissingField { index: usize, field: &'static str },
}

/// Which side of the graph a dependency was resolved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepContext {
  /// Linked into the product.
  #[default]
  Host,
  /// Runs during the build (tool requirement).
  Build,
}

impl DepContext {
  pub fn as_str(&self) -> &'static str {
    match self {
      DepContext::Host => "host",
      DepContext::Build => "build",
    }
  }
}

/// A dependency resolved by the package manager.
///
/// Only the binary directories matter for staging; the reference is carried
/// for logs and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
  /// Package reference, usually `name/version`.
  pub reference: String,
  /// Directories holding the package's executables, in package-manager order.
  pub bindirs: Vec<PathBuf>,
  pub context: DepContext,
}

impl Dependency {
  pub fn new(reference: impl Into<String>, bindirs: Vec<PathBuf>) -> Self {
    Self {
      reference: reference.into(),
      bindirs,
      context: DepContext::default(),
    }
  }

  pub fn with_context(mut self, context: DepContext) -> Self {
    self.context = context;
    self
  }

  /// Package name: the reference up to the first `/`.
  pub fn name(&self) -> &str {
    self.reference.split('/').next().unwrap_or(&self.reference)
  }

  /// The directory staging reads from. Later entries are never consulted.
  pub fn primary_bindir(&self) -> Option<&Path> {
    self.bindirs.first().map(PathBuf::as_path)
  }
}

/// The ordered set of dependencies handed over by the package manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
  pub dependencies: Vec<Dependency>,
}

impl DependencySet {
  pub fn new(dependencies: Vec<Dependency>) -> Self {
    Self { dependencies }
  }

  pub fn len(&self) -> usize {
    self.dependencies.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dependencies.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Dependency> {
    self.dependencies.iter()
  }

  /// Look up a dependency by package name.
  pub fn find(&self, name: &str) -> Option<&Dependency> {
    self.dependencies.iter().find(|d| d.name() == name)
  }
}

impl FromIterator<Dependency> for DependencySet {
  fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
    Self {
      dependencies: iter.into_iter().collect(),
    }
  }
}

/// On-disk form of a dependency, before required fields are checked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDependency {
  #[serde(rename = "ref")]
  pub reference: Option<String>,
  pub bindirs: Option<Vec<PathBuf>>,
  #[serde(default)]
  pub context: DepContext,
}

impl RawDependency {
  pub(crate) fn validate(self, index: usize) -> Result<Dependency, DepsError> {
    let reference = self
      .reference
      .filter(|r| !r.trim().is_empty())
      .ok_or(DepsError::MissingField { index, field: "ref" })?;
    let bindirs = self.bindirs.ok_or(DepsError::MissingField {
      index,
      field: "bindirs",
    })?;

    Ok(Dependency {
      reference,
      bindirs,
      context: self.context,
    })
  }
}

/// Top-level document: either `{ "dependencies": [...] }` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawDocument {
  Wrapped { dependencies: Vec<RawDependency> },
  Bare(Vec<RawDependency>),
}

impl RawDocument {
  pub(crate) fn into_entries(self) -> Vec<RawDependency> {
    match self {
      RawDocument::Wrapped { dependencies } => dependencies,
      RawDocument::Bare(dependencies) => dependencies,
    }
  }
}
