//! Host detection.
//!
//! The recipe limits some host requirements to one target OS; when no OS is
//! given, the running one is assumed. `toolstage info` prints the pair as
//! `<arch>-<os>`.

pub mod arch;
pub mod os;

use std::fmt;

use serde::Serialize;

use arch::Arch;
use os::Os;

/// The machine toolstage runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// `None` on an architecture or OS the recipe has no notion of.
  pub fn current() -> Option<Self> {
    Some(Self::new(Arch::current()?, Os::current()?))
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.arch, self.os)
  }
}
