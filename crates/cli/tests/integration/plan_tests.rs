use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plan_lists_targets_without_copying() {
  let env = TestEnv::new();
  let bison = env.package("bison", &["bison"]);
  let deps = env.deps_file(&[("bison/3.8.2", vec![bison]), ("zlib/1.3", vec![])]);

  env
    .cmd()
    .arg("plan")
    .arg("--deps")
    .arg(&deps)
    .arg("--build-root")
    .arg(env.build_root())
    .assert()
    .success()
    .stdout(predicate::str::contains("bison-res"))
    .stdout(predicate::str::contains("zlib/1.3 (no bindirs)"))
    .stdout(predicate::str::contains("Would copy 2 file(s)"));

  assert!(!env.staged_bin().exists());
}

#[test]
fn plan_shows_dependency_context() {
  let env = TestEnv::new();
  let m4 = env.package("m4", &["m4"]);
  let deps = env.write_json(
    "deps.json",
    &serde_json::json!([{ "ref": "m4/1.4.19", "bindirs": [m4], "context": "build" }]),
  );

  env
    .cmd()
    .arg("plan")
    .arg("--deps")
    .arg(&deps)
    .arg("--build-root")
    .arg(env.build_root())
    .assert()
    .success()
    .stdout(predicate::str::contains("(m4, m4/1.4.19 [build])"))
    .stdout(predicate::str::contains("(bison-res, m4/1.4.19 [build])"));
}

#[test]
fn plan_json_output_is_valid() {
  let env = TestEnv::new();
  let ragel = env.package("ragel", &["ragel"]);
  let deps = env.deps_file(&[("ragel/6.10", vec![ragel])]);

  let output = env
    .cmd()
    .arg("plan")
    .arg("--deps")
    .arg(&deps)
    .arg("--build-root")
    .arg(env.build_root())
    .args(["-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let ops = plan["ops"].as_array().unwrap();
  assert_eq!(ops.len(), 2);
  assert_eq!(ops[0]["rule"], "ragel");
  assert_eq!(ops[0]["dependency"], "ragel/6.10");
}
