//! Output settings, read from an optional config file and the environment.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use simplified_core::codec::DEFAULT_INDENT;

/// Environment variables with this prefix override file settings,
/// e.g. `SIMPLIFIED_INDENT=2`.
pub const ENV_PREFIX: &str = "SIMPLIFIED";

/// Largest accepted `indent`.
pub const MAX_INDENT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  /// Spaces per indent level in JSON output.
  #[serde(default = "default_indent")]
  pub indent: usize,
}

fn default_indent() -> usize { DEFAULT_INDENT }

impl Default for Settings {
  fn default() -> Self { Self { indent: DEFAULT_INDENT } }
}

impl Settings {
  /// Load settings from `path` (TOML, JSON or YAML, by extension) if given,
  /// then apply `SIMPLIFIED_*` environment overrides.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
      builder = builder.add_source(config::File::from(path).required(true));
    }
    let settings = builder
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()
      .context("failed to read settings")?;

    let settings: Self = settings
      .try_deserialize()
      .context("failed to deserialise Settings")?;
    if settings.indent > MAX_INDENT {
      anyhow::bail!(
        "indent must be at most {MAX_INDENT}, got {}",
        settings.indent
      );
    }
    Ok(settings)
  }
}
