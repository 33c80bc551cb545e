//! Shared plumbing for the `simpleutil` and `simple2markdown` binaries.
//!
//! Binaries build an [`AppInfo`] and a [`Settings`] in `main` and pass them
//! down explicitly; nothing here reads global state.

pub mod commands;
pub mod io;
pub mod settings;

pub use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const LICENSE_TEMPLATE: &str = include_str!("license.txt");

/// Name and version a binary reports in its banners.
#[derive(Debug, Clone)]
pub struct AppInfo {
  pub name:    String,
  pub version: &'static str,
}

impl AppInfo {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:    name.into(),
      version: env!("CARGO_PKG_VERSION"),
    }
  }

  /// `"<name> <version>"`, as printed by `--version`.
  pub fn version_line(&self) -> String {
    format!("{} {}", self.name, self.version)
  }

  pub fn license_text(&self) -> String {
    LICENSE_TEMPLATE
      .replace("{app_name}", &self.name)
      .replace("{version}", self.version)
  }
}

/// Install the tracing subscriber. Logs go to stderr so they never mix with
/// record output; the level defaults to `warn` and follows `RUST_LOG`.
pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn banners_use_app_name() {
    let info = AppInfo::new("simpleutil");
    assert_eq!(
      info.version_line(),
      format!("simpleutil {}", env!("CARGO_PKG_VERSION"))
    );
    assert!(info.license_text().starts_with("simpleutil "));
    assert!(!info.license_text().contains("{app_name}"));
  }
}
