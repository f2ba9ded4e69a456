//! Build recipe declarations.
//!
//! The recipe is static data: which settings the build consumes, which
//! packages it links against on which OS, and which tools must be available at
//! build time. Resolving any of it is the package manager's job.

mod types;

use serde::Serialize;

use crate::deps::DependencySet;
use crate::platform::os::Os;

pub use types::{Generator, PackageRef, Requirement, Setting};

/// Declarations of the native build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
  pub settings: Vec<Setting>,
  pub requires: Vec<Requirement>,
  pub tool_requires: Vec<PackageRef>,
  pub generators: Vec<Generator>,
}

impl Default for Recipe {
  fn default() -> Self {
    Self {
      settings: vec![Setting::Os, Setting::Compiler, Setting::BuildType, Setting::Arch],
      requires: vec![Requirement {
        package: PackageRef::new("linux-headers-generic", "6.5.9"),
        only_on: Some(Os::Linux),
      }],
      tool_requires: vec![
        PackageRef::new("bison", "3.8.2"),
        PackageRef::new("m4", "1.4.19"),
        PackageRef::new("ragel", "6.10"),
        PackageRef::new("yasm", "1.3.0"),
      ],
      generators: vec![Generator::CMakeDeps, Generator::CMakeToolchain],
    }
  }
}

impl Recipe {
  /// Host requirements that apply when targeting `os`.
  pub fn requirements_for(&self, os: Os) -> Vec<&PackageRef> {
    self
      .requires
      .iter()
      .filter(|r| r.applies_to(os))
      .map(|r| &r.package)
      .collect()
  }

  /// Tool requirements with no same-named package in `deps`.
  ///
  /// A missing tool only means its staging rules will match nothing; callers
  /// report these as warnings, never as errors.
  pub fn check(&self, deps: &DependencySet) -> Vec<&PackageRef> {
    self
      .tool_requires
      .iter()
      .filter(|tool| deps.find(&tool.name).is_none())
      .collect()
  }
}
