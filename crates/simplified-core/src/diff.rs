//! Structural diff: two records in, two sparse records out.
//!
//! A field is present in either output only if it differed between the
//! inputs. Composites that implement [`Diff`] (the record and its metadata
//! block) are diffed field by field; every other field is compared as a
//! whole and copied out in full when it differs.

use serde_json::Value;
use tracing::{debug, trace};

use crate::{
  Result,
  codec::{self, DEFAULT_INDENT},
  files::Files,
  metadata::Metadata,
  record::{CustomFields, Record},
};

/// Field-by-field comparison producing sparse copies of both sides.
pub trait Diff: Sized {
  /// Returns `(old_sparse, new_sparse)`, where only fields that differ
  /// between `self` and `other` are populated.
  fn diff(&self, other: &Self) -> (Self, Self);
}

/// Diff two possibly-absent values.
///
/// When exactly one side is absent, the present side is returned in full in
/// its own slot without field-by-field comparison.
pub fn diff<T: Diff + Clone>(
  old: Option<&T>,
  new: Option<&T>,
) -> (Option<T>, Option<T>) {
  match (old, new) {
    (Some(old), Some(new)) => {
      let (old, new) = old.diff(new);
      (Some(old), Some(new))
    }
    (old, new) => (old.cloned(), new.cloned()),
  }
}

/// Diff two records and encode the pair as a pretty-printed JSON array
/// `[old_sparse, new_sparse]`.
pub fn diff_as_json(old: Option<&Record>, new: Option<&Record>) -> Result<Vec<u8>> {
  diff_as_json_with_indent(old, new, DEFAULT_INDENT)
}

pub fn diff_as_json_with_indent(
  old: Option<&Record>,
  new: Option<&Record>,
  indent: usize,
) -> Result<Vec<u8>> {
  let pair = diff(old, new);
  codec::encode_pretty(&pair, indent)
}

// ─── Record ──────────────────────────────────────────────────────────────────

impl Diff for Record {
  fn diff(&self, other: &Self) -> (Self, Self) {
    let mut old = Record::default();
    let mut new = Record::default();

    (old.schema, new.schema) = changed("$schema", &self.schema, &other.schema);
    (old.id, new.id) = changed("id", &self.id, &other.id);
    (old.parent, new.parent) = changed("parent", &self.parent, &other.parent);
    (old.pids, new.pids) = changed("pids", &self.pids, &other.pids);
    (old.access, new.access) = changed("access", &self.access, &other.access);
    (old.metadata, new.metadata) = match (&self.metadata, &other.metadata) {
      (Some(a), Some(b)) if a != b => {
        trace!(field = "metadata", "field differs");
        let (a, b) = a.diff(b);
        (Some(a), Some(b))
      }
      (a, b) => changed("metadata", a, b),
    };
    (old.files, new.files) =
      changed_by("files", &self.files, &other.files, same_files);
    (old.custom_fields, new.custom_fields) = changed_by(
      "custom_fields",
      &self.custom_fields,
      &other.custom_fields,
      same_map,
    );
    (old.tombstone, new.tombstone) =
      changed("tombstone", &self.tombstone, &other.tombstone);
    (old.versions, new.versions) =
      changed("versions", &self.versions, &other.versions);
    (old.created, new.created) =
      changed("created", &self.created, &other.created);
    (old.updated, new.updated) =
      changed("updated", &self.updated, &other.updated);

    let identical = old == Record::default() && new == Record::default();
    debug!(old_id = %self.id, new_id = %other.id, identical, "diffed records");
    (old, new)
  }
}

// ─── Metadata ────────────────────────────────────────────────────────────────

impl Diff for Metadata {
  fn diff(&self, other: &Self) -> (Self, Self) {
    let mut old = Metadata::default();
    let mut new = Metadata::default();

    (old.resource_type, new.resource_type) =
      changed("resource_type", &self.resource_type, &other.resource_type);
    (old.creators, new.creators) =
      changed("creators", &self.creators, &other.creators);
    (old.title, new.title) = changed("title", &self.title, &other.title);
    (old.publication_date, new.publication_date) = changed(
      "publication_date",
      &self.publication_date,
      &other.publication_date,
    );
    (old.additional_titles, new.additional_titles) = changed(
      "additional_titles",
      &self.additional_titles,
      &other.additional_titles,
    );
    (old.description, new.description) =
      changed("description", &self.description, &other.description);
    (old.additional_descriptions, new.additional_descriptions) = changed(
      "additional_descriptions",
      &self.additional_descriptions,
      &other.additional_descriptions,
    );
    (old.rights, new.rights) = changed("rights", &self.rights, &other.rights);
    (old.contributors, new.contributors) =
      changed("contributors", &self.contributors, &other.contributors);
    (old.subjects, new.subjects) =
      changed("subjects", &self.subjects, &other.subjects);
    (old.languages, new.languages) =
      changed("languages", &self.languages, &other.languages);
    (old.dates, new.dates) = changed("dates", &self.dates, &other.dates);
    (old.version, new.version) =
      changed("version", &self.version, &other.version);
    (old.publisher, new.publisher) =
      changed("publisher", &self.publisher, &other.publisher);
    (old.identifiers, new.identifiers) =
      changed("identifiers", &self.identifiers, &other.identifiers);
    (old.related_identifiers, new.related_identifiers) = changed(
      "related_identifiers",
      &self.related_identifiers,
      &other.related_identifiers,
    );
    (old.funding, new.funding) =
      changed("funding", &self.funding, &other.funding);

    (old, new)
  }
}

// ─── Field comparison ────────────────────────────────────────────────────────

/// Both defaults when `old == new`, otherwise full copies of both.
///
/// chrono's `DateTime` equality compares instants, so timestamps written
/// with different offsets are equal when they denote the same moment.
fn changed<T>(field: &'static str, old: &T, new: &T) -> (T, T)
where
  T: PartialEq + Clone + Default,
{
  changed_by(field, old, new, |a, b| a == b)
}

fn changed_by<T, F>(field: &'static str, old: &T, new: &T, same: F) -> (T, T)
where
  T: Clone + Default,
  F: Fn(&T, &T) -> bool,
{
  if same(old, new) {
    return (T::default(), T::default());
  }
  trace!(field, "field differs");
  (old.clone(), new.clone())
}

fn same_files(a: &Option<Files>, b: &Option<Files>) -> bool {
  match (a, b) {
    (None, None) => true,
    (Some(a), Some(b)) => {
      same_map(&a.locations, &b.locations)
        && a.enabled == b.enabled
        && a.entries == b.entries
        && a.default_preview == b.default_preview
        && a.sizes == b.sizes
        && a.formats == b.formats
        && a.order == b.order
        && a.count == b.count
        && a.total_bytes == b.total_bytes
    }
    _ => false,
  }
}

fn same_map(a: &CustomFields, b: &CustomFields) -> bool {
  a.len() == b.len()
    && a
      .iter()
      .all(|(k, va)| b.get(k).is_some_and(|vb| same_value(va, vb)))
}

/// Deep equality over untyped JSON. Numbers compare by value, so `1` and
/// `1.0` are equal; array order matters.
pub fn same_value(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Number(x), Value::Number(y)) => {
      if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        x == y
      } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        x == y
      } else {
        x.as_f64() == y.as_f64()
      }
    }
    (Value::Array(x), Value::Array(y)) => {
      x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_value(x, y))
    }
    (Value::Object(x), Value::Object(y)) => same_map(x, y),
    (a, b) => a == b,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
