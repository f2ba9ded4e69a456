use predicates::prelude::*;

use super::common::{TestEnv, list_files};

#[test]
fn stage_copies_tools_into_layout() {
  let env = TestEnv::new();
  let bison = env.package("bison", &["bison", "m4"]);
  let yasm = env.package("yasm", &["yasm-1.3.0.exe"]);
  let ragel = env.package("ragel", &["ragel"]);
  let deps = env.deps_file(&[
    ("bison/3.8.2", vec![bison]),
    ("yasm/1.3.0", vec![yasm]),
    ("ragel/6.10", vec![ragel]),
  ]);

  env
    .stage_cmd(&deps)
    .assert()
    .success()
    .stdout(predicate::str::contains("Staging complete"));

  let bin = env.staged_bin();
  assert_eq!(list_files(&bin.join("bison/bin")), vec!["bison"]);
  assert_eq!(list_files(&bin.join("m4/bin")), vec!["m4"]);
  assert_eq!(
    list_files(&bin.join("bison/res")),
    vec!["bison", "m4", "ragel", "yasm-1.3.0.exe"]
  );
  assert!(bin.join("yasm-1.3.0.exe").is_file());
  assert!(bin.join("ragel").is_file());
}

#[test]
fn stage_with_empty_bindirs_creates_nothing() {
  let env = TestEnv::new();
  let deps = env.deps_file(&[("linux-headers-generic/6.5.9", vec![])]);

  env
    .stage_cmd(&deps)
    .assert()
    .success()
    .stdout(predicate::str::contains("linux-headers-generic/6.5.9"));

  assert!(!env.staged_bin().exists());
}

#[test]
fn stage_warns_about_missing_tool_requirements() {
  let env = TestEnv::new();
  let yasm = env.package("yasm", &["yasm"]);
  let deps = env.deps_file(&[("yasm/1.3.0", vec![yasm])]);

  let output = env.stage_cmd(&deps).output().unwrap();
  assert!(output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  for tool in ["bison/3.8.2", "m4/1.4.19", "ragel/6.10"] {
    assert_eq!(stderr.matches(tool).count(), 1, "{tool} should be reported once:\n{stderr}");
  }
  assert!(!stderr.contains("yasm/1.3.0"));
}

#[test]
fn stage_dry_run_leaves_filesystem_alone() {
  let env = TestEnv::new();
  let m4 = env.package("m4", &["m4"]);
  let deps = env.deps_file(&[("m4/1.4.19", vec![m4])]);

  env
    .stage_cmd(&deps)
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert!(!env.staged_bin().exists());
}

#[test]
fn stage_json_report_lists_copies() {
  let env = TestEnv::new();
  let m4 = env.package("m4", &["m4"]);
  let deps = env.deps_file(&[("m4/1.4.19", vec![m4])]);

  let output = env.stage_cmd(&deps).args(["-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let copied = report["copied"].as_array().unwrap();
  assert_eq!(copied.len(), 2);
  assert_eq!(copied[0]["rule"], "m4");
  assert_eq!(copied[0]["destination"], "m4_bin");
  assert_eq!(copied[0]["context"], "host");
  assert_eq!(copied[1]["destination"], "bison_res");
  assert_eq!(report["dry_run"], false);
}

#[test]
fn stage_twice_is_idempotent() {
  let env = TestEnv::new();
  let bison = env.package("bison", &["bison", "share/bison/skeletons/c.m4"]);
  let deps = env.deps_file(&[("bison/3.8.2", vec![bison])]);

  env.stage_cmd(&deps).assert().success();
  let first = list_files(&env.staged_bin());
  env.stage_cmd(&deps).assert().success();
  let second = list_files(&env.staged_bin());

  assert_eq!(first, second);
  assert!(first.contains(&"bison/res/share/bison/skeletons/c.m4".to_string()));
}

#[test]
fn stage_uses_cmake_layout_from_source_dir() {
  let env = TestEnv::new();
  let ragel = env.package("ragel", &["ragel"]);
  let deps = env.deps_file(&[("ragel/6.10", vec![ragel])]);
  let source = env.path().join("w/src/app/cmake");
  std::fs::create_dir_all(&source).unwrap();

  env
    .cmd()
    .arg("stage")
    .arg("--deps")
    .arg(&deps)
    .arg("--source-dir")
    .arg(&source)
    .args(["--build-type", "Debug"])
    .assert()
    .success();

  // <source>/build/Debug climbs five components to <temp>/w.
  assert!(env.staged_bin().join("ragel").is_file());
}

#[test]
fn stage_reads_build_root_and_ascend_from_env() {
  let env = TestEnv::new();
  let yasm = env.package("yasm", &["yasm"]);
  let deps = env.deps_file(&[("yasm/1.3.0", vec![yasm])]);
  let root = env.path().join("w/build/Release");
  std::fs::create_dir_all(&root).unwrap();

  env
    .cmd()
    .arg("stage")
    .arg("--deps")
    .arg(&deps)
    .env("TOOLSTAGE_BUILD_ROOT", &root)
    .env("TOOLSTAGE_ASCEND", "2")
    .assert()
    .success();

  assert!(env.staged_bin().join("yasm").is_file());
}

#[test]
fn stage_fails_on_missing_bindirs_field() {
  let env = TestEnv::new();
  let deps = env.write_json("deps.json", &serde_json::json!([{ "ref": "bison/3.8.2" }]));

  env
    .stage_cmd(&deps)
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing required field 'bindirs'"));
}

#[test]
fn stage_fails_without_build_root() {
  let env = TestEnv::new();
  let deps = env.deps_file(&[]);

  env
    .cmd()
    .arg("stage")
    .arg("--deps")
    .arg(&deps)
    .assert()
    .failure()
    .stderr(predicate::str::contains("No build root"));
}

#[test]
fn stage_with_ascent_past_filesystem_root_and_nothing_to_stage_succeeds() {
  let env = TestEnv::new();
  let deps = env.deps_file(&[("zlib/1.3", vec![])]);

  let output = env.stage_cmd(&deps).args(["--ascend", "1000", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert!(report["copied"].as_array().unwrap().is_empty());
  assert_eq!(report["skipped"][0], "zlib/1.3");
  assert!(!env.staged_bin().exists());
}
