use toolstage_lib::layout::{ascend_from_env, build_root_from_env};
use toolstage_lib::platform::Platform;

pub fn cmd_info() {
  println!("toolstage v{}", env!("CARGO_PKG_VERSION"));
  println!("System:");
  match Platform::current() {
    Some(platform) => println!("Platform: {}", platform),
    _ => println!("Could not detect platform."),
  }
  println!("Ascend: {}", ascend_from_env());
  match build_root_from_env() {
    Some(root) => println!("Build root: {}", root.display()),
    None => println!("Build root: (not set)"),
  }
}
