//! The three operations the binaries expose.

use anyhow::Context as _;
use simplified_core::diff::diff_as_json_with_indent;
use tracing::info;

use crate::{
  Settings,
  io::{STDIO, read_record, write_output},
};

/// Decode a record and write it back out pretty-printed.
pub fn pretty_print(
  input: &str,
  output: Option<&str>,
  settings: &Settings,
) -> anyhow::Result<()> {
  let record = read_record(input)?;
  let src = record
    .to_json_pretty(settings.indent)
    .context("failed to encode record")?;
  write_output(output, &src)
}

/// Diff two records and write the `[old, new]` JSON array.
pub fn diff(
  old: &str,
  new: &str,
  output: Option<&str>,
  settings: &Settings,
) -> anyhow::Result<()> {
  if old == STDIO && new == STDIO {
    anyhow::bail!("only one of the records to compare can be read from standard input");
  }
  let old_record = read_record(old)?;
  let new_record = read_record(new)?;
  info!(old, new, "comparing records");

  let src = diff_as_json_with_indent(
    Some(&old_record),
    Some(&new_record),
    settings.indent,
  )
  .context("failed to encode diff")?;
  write_output(output, &src)
}

/// Decode a record and write it as Markdown.
pub fn markdown(input: &str, output: Option<&str>) -> anyhow::Result<()> {
  let record = read_record(input)?;
  let md = simplified_markdown::render(&record);
  write_output(output, md.trim_end().as_bytes())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn diff_writes_pair() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.json");
    let out = dir.path().join("diff.json");
    fs::write(&old, r#"{"metadata":{"title":"InvenioRDM","version":"v1.0"}}"#).unwrap();
    fs::write(&new, r#"{"metadata":{"title":"InvenioRDM","version":"v2.0"}}"#).unwrap();

    diff(
      old.to_str().unwrap(),
      new.to_str().unwrap(),
      out.to_str(),
      &Settings::default(),
    )
    .unwrap();

    let got: serde_json::Value =
      serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(
      got,
      serde_json::json!([
        { "metadata": { "version": "v1.0" } },
        { "metadata": { "version": "v2.0" } }
      ])
    );
  }

  #[test]
  fn diff_refuses_two_stdin_inputs() {
    let err = diff(STDIO, STDIO, None, &Settings::default()).unwrap_err();
    assert!(err.to_string().contains("standard input"));
  }

  #[test]
  fn pretty_print_honours_indent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let out = dir.path().join("out.json");
    fs::write(&input, r#"{"id":"x","metadata":{"title":"T"}}"#).unwrap();

    pretty_print(
      input.to_str().unwrap(),
      out.to_str(),
      &Settings { indent: 2 },
    )
    .unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text, "{\n  \"id\": \"x\",\n  \"metadata\": {\n    \"title\": \"T\"\n  }\n}\n");
  }
}
