//! The top-level record and its administrative sub-blocks.
//!
//! A [`Record`] mirrors the JSON document exchanged between the repository
//! systems. Wire names are fixed and serialize in declaration order; empty
//! values are omitted (see [`crate::wire`]).

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  codec,
  files::Files,
  metadata::Metadata,
  wire::{is_empty, nullable, nullable_entries, nullable_items, rfc3339},
};

/// Open-ended extension map (e.g. `journal:journal`, `caltech:groups`).
pub type CustomFields = serde_json::Map<String, serde_json::Value>;

// ─── Record ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
  #[serde(
    rename = "$schema",
    deserialize_with = "nullable",
    skip_serializing_if = "is_empty"
  )]
  pub schema:        String,
  /// Persistent identifier of this specific version.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:            String,
  /// Identifier shared by all versions of the record.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent:        Option<RecordIdentifier>,
  /// System-managed external identifiers (DOI, OAI, handles) by scheme.
  #[serde(deserialize_with = "nullable_entries", skip_serializing_if = "is_empty")]
  pub pids:          BTreeMap<String, PersistentIdentifier>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub access:        Option<RecordAccess>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metadata:      Option<Metadata>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub files:         Option<Files>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub custom_fields: CustomFields,
  /// Deaccession information.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tombstone:     Option<Tombstone>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub versions:      Option<Versions>,
  #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
  pub created:       Option<DateTime<FixedOffset>>,
  #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
  pub updated:       Option<DateTime<FixedOffset>>,
}

impl Record {
  /// Decode a record from its JSON wire form.
  pub fn from_json(src: &[u8]) -> Result<Self> { codec::decode(src) }

  /// Encode the record as pretty-printed JSON.
  pub fn to_json_pretty(&self, indent: usize) -> Result<Vec<u8>> {
    codec::encode_pretty(self, indent)
  }

  /// The record title, if the metadata block carries one.
  pub fn title(&self) -> Option<&str> {
    self
      .metadata
      .as_ref()
      .map(|m| m.title.as_str())
      .filter(|t| !t.is_empty())
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// The `parent` block: the identifier for all versions of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordIdentifier {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:          String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub access:      Option<ParentAccess>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub communities: Option<Communities>,
}

/// Ownership of the record as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentAccess {
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub owned_by: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Communities {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub default: String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub ids:     Vec<String>,
}

/// A repository account, referenced by owners and tombstones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub user:         i64,
  /// Not part of the repository schema; kept for reporting.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub display_name: String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub email:        String,
}

/// An entry of the `pids` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistentIdentifier {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub identifier: String,
  /// Provider id used internally by the repository, e.g. `datacite`.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub provider:   String,
  /// Client id for the external registration service.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub client:     String,
}

// ─── Access ──────────────────────────────────────────────────────────────────

/// Record-level access control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordAccess {
  /// `"public"` or `"restricted"`.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub record:  String,
  /// `"public"` or `"restricted"`.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub files:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub embargo: Option<Embargo>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub status:  String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Embargo {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub active: bool,
  /// ISO date the embargo lifts, e.g. `2131-01-01`. Required when active.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub until:  String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub reason: String,
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tombstone {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub reason:     String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub category:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub removed_by: Option<User>,
  #[serde(serialize_with = "rfc3339", skip_serializing_if = "Option::is_none")]
  pub timestamp:  Option<DateTime<FixedOffset>>,
}

/// Position of this record in its version chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Versions {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub is_latest:       bool,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub is_latest_draft: bool,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub index:           u64,
}
