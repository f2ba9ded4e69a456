//! Types for the build recipe.

use std::fmt;

use serde::Serialize;

use crate::platform::os::Os;

/// A `name/version` package reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageRef {
  pub name: String,
  pub version: String,
}

impl PackageRef {
  pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      version: version.into(),
    }
  }
}

impl fmt::Display for PackageRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.name, self.version)
  }
}

/// Settings the package manager must supply to configure the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
  Os,
  Compiler,
  BuildType,
  Arch,
}

impl Setting {
  pub fn as_str(&self) -> &'static str {
    match self {
      Setting::Os => "os",
      Setting::Compiler => "compiler",
      Setting::BuildType => "build_type",
      Setting::Arch => "arch",
    }
  }
}

/// A host requirement, optionally limited to one target OS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
  pub package: PackageRef,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub only_on: Option<Os>,
}

impl Requirement {
  pub fn applies_to(&self, os: Os) -> bool {
    self.only_on.is_none_or(|only| only == os)
  }
}

/// Build-system files the package manager generates for the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Generator {
  CMakeDeps,
  CMakeToolchain,
}

impl fmt::Display for Generator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Generator::CMakeDeps => write!(f, "CMakeDeps"),
      Generator::CMakeToolchain => write!(f, "CMakeToolchain"),
    }
  }
}
