mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use toolstage_lib::platform::os::Os;

use crate::cmd::{StageArgs, cmd_info, cmd_plan, cmd_requires, cmd_stage};
use crate::output::{OutputFormat, print_error};

/// toolstage - stage build-tool binaries from resolved dependencies
#[derive(Parser)]
#[command(name = "toolstage")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Copy tool binaries out of the dependencies' binary directories
  Stage {
    #[command(flatten)]
    args: StageArgs,

    /// Report what would be copied without copying
    #[arg(long)]
    dry_run: bool,
  },

  /// Show the copies `stage` would perform
  Plan {
    #[command(flatten)]
    args: StageArgs,
  },

  /// Show settings, requirements and tool requirements of the build recipe
  Requires {
    /// Target OS (linux, darwin, windows); defaults to the running OS
    #[arg(long)]
    os: Option<Os>,
  },

  /// Display platform and configuration information
  Info,
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::Stage { args, dry_run } => cmd_stage(&args, dry_run, cli.output),
    Commands::Plan { args } => cmd_plan(&args, cli.verbose, cli.output),
    Commands::Requires { os } => cmd_requires(os, cli.output),
    Commands::Info => {
      cmd_info();
      Ok(())
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
