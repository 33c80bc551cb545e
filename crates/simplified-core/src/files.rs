//! The `files` block: the manifest of files attached to a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wire::{is_empty, nullable, nullable_entries};

/// Files attached to a record, keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Files {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub enabled:         bool,
  #[serde(deserialize_with = "nullable_entries", skip_serializing_if = "is_empty")]
  pub entries:         BTreeMap<String, Entry>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub default_preview: String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub sizes:           Vec<String>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub formats:         Vec<String>,
  /// Display order of `entries`, by file name.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub order:           Vec<String>,
  /// Schema-less; compared as a whole by the diff engine.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub locations:       serde_json::Map<String, serde_json::Value>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub count:           u64,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub total_bytes:     u64,
}

impl Files {
  /// Entries in display order: those named in `order` first, then the rest
  /// by file name.
  pub fn ordered_entries(&self) -> Vec<(&str, &Entry)> {
    let mut out: Vec<(&str, &Entry)> = self
      .order
      .iter()
      .filter_map(|name| {
        self
          .entries
          .get_key_value(name)
          .map(|(k, v)| (k.as_str(), v))
      })
      .collect();
    for (name, entry) in &self.entries {
      if !self.order.contains(name) {
        out.push((name.as_str(), entry));
      }
    }
    out
  }
}

/// One stored file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub bucket_id:     String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub version_id:    String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub file_id:       String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub backend:       String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub storage_class: String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub key:           String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub mimetype:      String,
  /// Size in bytes.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub size:          u64,
  /// Algorithm-prefixed digest, e.g. `md5:ae98c6b9...`.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub checksum:      String,
}
