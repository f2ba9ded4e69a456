use anyhow::{Result, anyhow};

use toolstage_lib::platform::os::Os;
use toolstage_lib::recipe::Recipe;

use crate::output::{OutputFormat, print_json, print_list_item};

/// Print the recipe's declarations for `os`, defaulting to the running OS.
pub fn cmd_requires(os: Option<Os>, output: OutputFormat) -> Result<()> {
  let os = os
    .or_else(Os::current)
    .ok_or_else(|| anyhow!("Unsupported OS; pass --os"))?;

  let recipe = Recipe::default();
  let requires = recipe.requirements_for(os);

  if output.is_json() {
    let settings: Vec<&str> = recipe.settings.iter().map(|s| s.as_str()).collect();
    let json = serde_json::json!({
      "os": os,
      "settings": settings,
      "requires": requires.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
      "tool_requires": recipe.tool_requires.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
      "generators": recipe.generators.iter().map(|g| g.to_string()).collect::<Vec<_>>(),
    });
    return print_json(&json);
  }

  let settings: Vec<&str> = recipe.settings.iter().map(|s| s.as_str()).collect();
  println!("Settings: {}", settings.join(", "));

  println!("Requires ({}):", os);
  if requires.is_empty() {
    println!("  (none)");
  }
  for package in requires {
    print_list_item(&package.to_string());
  }

  println!("Tool requires:");
  for package in &recipe.tool_requires {
    print_list_item(&package.to_string());
  }

  let generators: Vec<String> = recipe.generators.iter().map(|g| g.to_string()).collect();
  println!("Generators: {}", generators.join(", "));

  Ok(())
}
