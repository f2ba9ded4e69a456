//! Lexical path helpers.
//!
//! Staging destinations are computed from the build root without touching the
//! filesystem, so `..` has to be resolved on the path text itself.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without consulting the filesystem.
///
/// A `..` directly under the root (or a drive prefix) is dropped. Leading `..`
/// components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out: Vec<Component<'_>> = Vec::new();

  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match out.last() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => out.push(component),
      },
      other => out.push(other),
    }
  }

  out.iter().collect()
}

/// Append `count` `..` components to `path` and normalize the result.
///
/// Climbing stops at the root, the same way the OS resolves `/..`. A relative
/// path that runs out of components keeps the extra `..`.
pub fn ascend(path: &Path, count: usize) -> PathBuf {
  let mut climbed = path.to_path_buf();
  climbed.extend(std::iter::repeat_n(Component::ParentDir, count));
  normalize(&climbed)
}

/// Render a path relative to `base` with forward slashes.
///
/// Glob patterns are matched against this form so the same pattern behaves the
/// same on every platform.
pub fn slash_relative(path: &Path, base: &Path) -> Option<String> {
  let relative = path.strip_prefix(base).ok()?;
  let parts: Vec<String> = relative
    .components()
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect();
  Some(parts.join("/"))
}
