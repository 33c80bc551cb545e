//! Core types for the simplified record format.
//!
//! A simplified record is the intermediate JSON shape used to move
//! bibliographic and data metadata from an EPrints repository into an
//! InvenioRDM repository. This crate holds the schema, the JSON codec
//! helpers, and the structural [`diff`] engine. It has no I/O of its own.

pub mod codec;
pub mod diff;
pub mod error;
pub mod files;
pub mod metadata;
pub mod person;
pub mod record;
mod wire;

pub use diff::{Diff, diff_as_json};
pub use error::{Error, Result};
pub use record::Record;
pub use wire::LocalizedText;

#[cfg(test)]
mod tests;
