//! `simpleutil`: pretty-print a simplified record, or diff two of them.
//!
//! ```text
//! simpleutil record.json [OUTPUT]
//! simpleutil --diff old.json new.json [OUTPUT]
//! ```
//!
//! A file name of `-` reads standard input or writes standard output.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use simplified_cli::{AppInfo, Settings, commands, init_tracing};

#[derive(Parser)]
#[command(
  name = "simpleutil",
  about = "Pretty-print or diff simplified InvenioRDM records",
  disable_version_flag = true
)]
struct Cli {
  /// Compare OLD and NEW and write the `[old, new]` difference pair.
  #[arg(long)]
  diff: bool,

  /// Print the license and exit.
  #[arg(long)]
  license: bool,

  /// Print the version and exit.
  #[arg(short = 'V', long)]
  version: bool,

  /// Optional settings file (TOML, YAML or JSON).
  #[arg(short, long, env = "SIMPLIFIED_CONFIG")]
  config: Option<PathBuf>,

  /// RECORD [OUTPUT], or OLD NEW [OUTPUT] with `--diff`.
  #[arg(value_name = "FILE")]
  files: Vec<String>,
}

fn main() -> ExitCode {
  init_tracing();
  let cli = Cli::parse();
  let app = AppInfo::new("simpleutil");

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

  let settings = Settings::load(cli.config.as_deref())?;
  let files: Vec<&str> = cli.files.iter().map(String::as_str).collect();

  if cli.diff {
    match files.as_slice() {
      [old, new] => commands::diff(old, new, None, &settings),
      [old, new, out] => commands::diff(old, new, Some(*out), &settings),
      _ => anyhow::bail!("--diff expects OLD and NEW record files"),
    }
  } else {
    match files.as_slice() {
      [input] => commands::pretty_print(input, None, &settings),
      [input, out] => commands::pretty_print(input, Some(*out), &settings),
      _ => anyhow::bail!("expected a record file, try --help"),
    }
  }
}
