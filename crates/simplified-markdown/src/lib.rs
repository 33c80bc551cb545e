//! Markdown rendering for simplified records.
//!
//! Produces a readable view of a record for review and as a visual
//! reference for the data structures. Pure and synchronous.
//!
//! # Quick start
//!
//! ```no_run
//! use simplified_core::Record;
//!
//! let record = Record::from_json(br#"{"metadata": {"title": "InvenioRDM"}}"#).unwrap();
//! print!("{}", simplified_markdown::render(&record));
//! ```

mod render;

use simplified_core::Record;

/// Render `record` as a Markdown document ending in a newline.
pub fn render(record: &Record) -> String { render::render(record) }
