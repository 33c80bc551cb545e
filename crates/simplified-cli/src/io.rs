//! File and stdio plumbing. A path of `-` means stdin or stdout.

use std::{
  fs,
  io::{self, Read, Write},
};

use anyhow::Context as _;
use simplified_core::Record;
use tracing::debug;

pub const STDIO: &str = "-";

/// Read all of `path`, or stdin for `-`.
pub fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
  if path == STDIO {
    let mut buf = Vec::new();
    io::stdin()
      .read_to_end(&mut buf)
      .context("failed to read standard input")?;
    return Ok(buf);
  }
  fs::read(path).with_context(|| format!("failed to read {path}"))
}

/// Read and decode one record.
pub fn read_record(path: &str) -> anyhow::Result<Record> {
  let src = read_input(path)?;
  debug!(path, bytes = src.len(), "decoding record");
  Record::from_json(&src).with_context(|| format!("{path}: invalid record"))
}

/// Write `bytes` followed by a newline to `path`, or stdout when `path` is
/// `None` or `-`.
pub fn write_output(path: Option<&str>, bytes: &[u8]) -> anyhow::Result<()> {
  match path {
    Some(path) if path != STDIO => {
      let mut out = fs::File::create(path)
        .with_context(|| format!("failed to create {path}"))?;
      out
        .write_all(bytes)
        .and_then(|()| out.write_all(b"\n"))
        .with_context(|| format!("failed to write {path}"))
    }
    _ => {
      let mut out = io::stdout().lock();
      out
        .write_all(bytes)
        .and_then(|()| out.write_all(b"\n"))
        .and_then(|()| out.flush())
        .context("failed to write standard output")
    }
  }
}
