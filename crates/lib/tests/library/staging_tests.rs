//! End-to-end staging through the public API.

use std::path::PathBuf;

use tempfile::TempDir;
use toolstage_lib::deps::{Dependency, DependencySet};
use toolstage_lib::layout::{Destination, Layout};
use toolstage_lib::recipe::Recipe;
use toolstage_lib::stage::{ErrorKind, StageOptions, stage, stage_file};

struct Fixture {
  temp: TempDir,
}

impl Fixture {
  fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// `<temp>/checkout/src/app/out/build/Release`: the default layout stages into `<temp>/checkout/bin`.
  fn layout(&self) -> Layout {
    let root = self.temp.path().join("checkout/src/app/out/build/Release");
    std::fs::create_dir_all(&root).unwrap();
    Layout::resolve(&root).unwrap()
  }

  fn bin(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap().join("checkout").join("bin")
  }

  fn package(&self, name: &str, files: &[&str]) -> PathBuf {
    let dir = self.temp.path().join("packages").join(name).join("bin");
    std::fs::create_dir_all(&dir).unwrap();
    for file in files {
      std::fs::write(dir.join(file), name).unwrap();
    }
    dir
  }
}

#[test]
fn full_tool_set_is_staged() {
  let fx = Fixture::new();
  let deps: DependencySet = vec![
    Dependency::new("bison/3.8.2", vec![fx.package("bison", &["bison", "yacc"])]),
    Dependency::new("m4/1.4.19", vec![fx.package("m4", &["m4"])]),
    Dependency::new("ragel/6.10", vec![fx.package("ragel", &["ragel"])]),
    Dependency::new("yasm/1.3.0", vec![fx.package("yasm", &["yasm", "vsyasm"])]),
    Dependency::new("linux-headers-generic/6.5.9", vec![]),
  ]
  .into_iter()
  .collect();

  assert!(Recipe::default().check(&deps).is_empty());

  let report = stage(&deps, &fx.layout(), &StageOptions::default()).unwrap();

  assert_eq!(report.count_for(Destination::BisonBin), 1);
  assert_eq!(report.count_for(Destination::M4Bin), 1);
  assert_eq!(report.count_for(Destination::Bin), 3);
  assert_eq!(report.count_for(Destination::BisonRes), 6);
  assert_eq!(report.skipped, vec!["linux-headers-generic/6.5.9"]);

  let bin = fx.bin();
  for staged in ["ragel", "yasm", "vsyasm", "bison/bin/bison", "m4/bin/m4", "bison/res/yacc"] {
    assert!(bin.join(staged).is_file(), "{staged} should be staged");
  }
  assert!(!bin.join("bison/bin/yacc").exists());
}

#[test]
fn targets_are_a_function_of_root_and_rule() {
  let fx = Fixture::new();
  let deps: DependencySet = vec![Dependency::new("bison/3.8.2", vec![fx.package("bison", &["bison"])])]
    .into_iter()
    .collect();

  let report = stage(&deps, &fx.layout(), &StageOptions { dry_run: true }).unwrap();
  let targets: Vec<PathBuf> = report.copied.iter().map(|op| op.target.clone()).collect();

  assert_eq!(
    targets,
    vec![fx.bin().join("bison/bin/bison"), fx.bin().join("bison/res/bison")]
  );
}

#[test]
fn malformed_metadata_file_is_a_config_error() {
  let fx = Fixture::new();
  let file = fx.temp.path().join("deps.json");
  std::fs::write(&file, "[{ \"ref\": ").unwrap();

  let err = stage_file(&file, &fx.layout(), &StageOptions::default()).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn empty_dependency_set_is_a_no_op() {
  let fx = Fixture::new();
  let report = stage(&DependencySet::default(), &fx.layout(), &StageOptions::default()).unwrap();

  assert!(report.is_empty());
  assert!(!fx.bin().exists());
}
