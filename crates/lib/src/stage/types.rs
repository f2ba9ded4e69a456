//! Types for the staging pass.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::deps::{DepContext, DepsError};
use crate::layout::{Destination, LayoutError};

/// Coarse classification of a staging failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// Reading a source or writing a destination failed.
  Io,
  /// Dependency metadata lacks a required field.
  NotFound,
  /// Dependency metadata or a copy pattern is unusable.
  Config,
}

/// Errors that abort a staging pass.
#[derive(Debug, Error)]
pub enum StageError {
  /// Filesystem failure while enumerating, creating directories, or copying.
  #[error("io error at {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A copy rule's pattern failed to parse.
  #[error("invalid copy pattern '{pattern}': {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: glob::PatternError,
  },

  #[error(transparent)]
  Layout(#[from] LayoutError),

  #[error(transparent)]
  Deps(#[from] DepsError),
}

impl StageError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    StageError::Io {
      path: path.into(),
      source,
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      StageError::Io { .. } => ErrorKind::Io,
      StageError::Pattern { .. } => ErrorKind::Config,
      StageError::Layout(LayoutError::Resolve { .. }) => ErrorKind::Io,
      StageError::Deps(DepsError::Read { .. }) => ErrorKind::Io,
      StageError::Deps(DepsError::Parse(_)) => ErrorKind::Config,
      StageError::Deps(DepsError::MissingField { .. }) => ErrorKind::NotFound,
    }
  }
}

/// One planned file copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyOp {
  /// Reference of the dependency the file comes from.
  pub dependency: String,
  /// Graph side the dependency was resolved for.
  pub context: DepContext,
  /// Name of the rule that selected the file.
  pub rule: &'static str,
  pub destination: Destination,
  pub source: PathBuf,
  pub target: PathBuf,
}

/// Ordered copy operations for a dependency set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StagePlan {
  pub ops: Vec<CopyOp>,
  /// Dependencies without any binary directory.
  pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StageOptions {
  /// Plan only; leave the filesystem untouched.
  pub dry_run: bool,
}

/// Outcome of a staging pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageReport {
  /// Copies performed, or that would be performed on a dry run.
  pub copied: Vec<CopyOp>,
  pub skipped: Vec<String>,
  pub dry_run: bool,
}

impl StageReport {
  pub fn count_for(&self, destination: Destination) -> usize {
    self.copied.iter().filter(|op| op.destination == destination).count()
  }

  pub fn is_empty(&self) -> bool {
    self.copied.is_empty()
  }
}
