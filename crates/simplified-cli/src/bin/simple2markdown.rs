//! `simple2markdown`: render a simplified record as Markdown.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use simplified_cli::{AppInfo, Settings, commands, init_tracing};

#[derive(Parser)]
#[command(
  name = "simple2markdown",
  about = "Render a simplified InvenioRDM record as Markdown",
  disable_version_flag = true
)]
struct Cli {
  /// Print the license and exit.
  #[arg(long)]
  license: bool,

  /// Print the version and exit.
  #[arg(short = 'V', long)]
  version: bool,

  /// Optional settings file (TOML, YAML or JSON).
  #[arg(short, long, env = "SIMPLIFIED_CONFIG")]
  config: Option<PathBuf>,

  /// RECORD [OUTPUT]; `-` for standard input or output.
  #[arg(value_name = "FILE")]
  files: Vec<String>,
}

fn main() -> ExitCode {
  init_tracing();
  let cli = Cli::parse();
  let app = AppInfo::new("simple2markdown");

  match run(&cli, &app) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("{}: {err:#}", app.name);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: &Cli, app: &AppInfo) -> anyhow::Result<()> {
  if cli.license {
    print!("{}", app.license_text());
    return Ok(());
  }
  if cli.version {
    println!("{}", app.version_line());
    return Ok(());
  }

  // Nothing in rendering is configurable yet, but a bad file should still
  // be reported.
  Settings::load(cli.config.as_deref())?;

  match cli.files.as_slice() {
    [input] => commands::markdown(input, None),
    [input, out] => commands::markdown(input, Some(out.as_str())),
    _ => anyhow::bail!("expected a record file, try --help"),
  }
}
