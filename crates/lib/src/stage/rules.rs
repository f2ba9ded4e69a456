//! The fixed table of copy rules.

use glob::{MatchOptions, Pattern};
use serde::Serialize;

use crate::layout::Destination;
use crate::stage::types::StageError;

/// A name pattern and the staging directory its matches are copied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyRule {
  pub name: &'static str,
  pub pattern: &'static str,
  pub destination: Destination,
}

/// Applied in this order to every dependency's first binary directory.
///
/// The last rule matches everything, so `bin/bison/res` ends up holding a copy
/// of every staged file.
pub static COPY_RULES: [CopyRule; 6] = [
  CopyRule {
    name: "yasm",
    pattern: "*yasm*",
    destination: Destination::Bin,
  },
  CopyRule {
    name: "bison",
    pattern: "bison*",
    destination: Destination::BisonBin,
  },
  CopyRule {
    name: "m4",
    pattern: "m4*",
    destination: Destination::M4Bin,
  },
  CopyRule {
    name: "ragel",
    pattern: "ragel*",
    destination: Destination::Bin,
  },
  CopyRule {
    name: "ytasm",
    pattern: "ytasm*",
    destination: Destination::Bin,
  },
  CopyRule {
    name: "bison-res",
    pattern: "*",
    destination: Destination::BisonRes,
  },
];

/// `*` spans `/`, and names compare case-insensitively only on Windows.
pub fn match_options() -> MatchOptions {
  MatchOptions {
    case_sensitive: !cfg!(windows),
    require_literal_separator: false,
    require_literal_leading_dot: false,
  }
}

/// A rule with its pattern parsed.
#[derive(Debug, Clone)]
pub struct CompiledRule {
  pub rule: &'static CopyRule,
  pattern: Pattern,
}

impl CompiledRule {
  pub fn compile(rule: &'static CopyRule) -> Result<Self, StageError> {
    let pattern = Pattern::new(rule.pattern).map_err(|source| StageError::Pattern {
      pattern: rule.pattern.to_string(),
      source,
    })?;
    Ok(Self { rule, pattern })
  }

  /// Match a slash-separated path relative to the binary directory.
  pub fn matches(&self, relative: &str) -> bool {
    self.pattern.matches_with(relative, match_options())
  }
}

pub fn compile_all() -> Result<Vec<CompiledRule>, StageError> {
  COPY_RULES.iter().map(CompiledRule::compile).collect()
}
