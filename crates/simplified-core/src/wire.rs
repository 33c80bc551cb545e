//! Serde helpers shared by the schema types.
//!
//! The wire format drops empty values on output and treats `null` as absent
//! on input, so every non-optional field carries the same pair of attributes:
//! `deserialize_with = "nullable"` and `skip_serializing_if = "is_empty"`.
//! Collections of records use `nullable_items` or `nullable_entries`
//! instead, which also drop `null` elements.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Deserializer, Serializer};

/// Localized text keyed by language code, e.g. `{"en": "Journal Article"}`.
pub type LocalizedText = BTreeMap<String, String>;

/// Deserialize `T`, mapping an explicit JSON `null` to `T::default()`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a sequence, skipping `null` elements. A `null` sequence is
/// empty.
pub(crate) fn nullable_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
  Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

/// Deserialize a map, skipping entries whose value is `null`.
pub(crate) fn nullable_entries<'de, D, K, V>(
  deserializer: D,
) -> Result<BTreeMap<K, V>, D::Error>
where
  D: Deserializer<'de>,
  K: Deserialize<'de> + Ord,
  V: Deserialize<'de>,
{
  let entries = Option::<BTreeMap<K, Option<V>>>::deserialize(deserializer)?;
  Ok(
    entries
      .unwrap_or_default()
      .into_iter()
      .filter_map(|(k, v)| Some((k, v?)))
      .collect(),
  )
}

/// Serialize a timestamp as RFC 3339 with its own offset, so `+00:00` stays
/// `+00:00` rather than becoming `Z`.
pub(crate) fn rfc3339<S: Serializer>(
  value: &Option<DateTime<FixedOffset>>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  match value {
    Some(t) => {
      serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }
    None => serializer.serialize_none(),
  }
}

/// True when `value` equals its type's default (`""`, `0`, `false`, empty
/// collection). Such values are omitted from the wire format.
pub(crate) fn is_empty<T: Default + PartialEq>(value: &T) -> bool {
  *value == T::default()
}
