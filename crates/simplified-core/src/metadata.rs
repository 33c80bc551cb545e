//! Descriptive metadata: the `metadata` block of a record.
//!
//! This is where most of the bibliographic content of an EPrints record is
//! mapped when it moves into an InvenioRDM-style repository.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wire::{LocalizedText, is_empty, nullable, nullable_items};

// ─── Vocabulary terms ────────────────────────────────────────────────────────

/// A controlled vocabulary term, e.g. a resource type, a language, or the
/// relation type of a related identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeDetail {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:    String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub name:  String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub title: LocalizedText,
}

impl TypeDetail {
  /// A term that only carries its vocabulary id.
  pub fn with_id(id: impl Into<String>) -> Self {
    Self { id: id.into(), ..Self::default() }
  }
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// A scheme/value pair such as an ORCID, DOI, ROR, ISNI or bibcode.
///
/// Also used for related identifiers, where `relation_type` and
/// `resource_type` describe the link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identifier {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:            String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub scheme:        String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub identifier:    String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub name:          String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub relation_type: Option<TypeDetail>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_type: Option<TypeDetail>,
}

impl Identifier {
  pub fn new(scheme: impl Into<String>, identifier: impl Into<String>) -> Self {
    Self {
      scheme: scheme.into(),
      identifier: identifier.into(),
      ..Self::default()
    }
  }
}

// ─── Creators and contributors ───────────────────────────────────────────────

/// A person or organization credited on the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Creator {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub person_or_org: Option<PersonOrOrg>,
  /// Selected from a customizable controlled vocabulary.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role:          Option<Role>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub affiliations:  Vec<Affiliation>,
}

/// Either a person or a corporate entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonOrOrg {
  /// Local person/organization id used to cross-walk data between library
  /// systems. Not part of the InvenioRDM schema.
  #[serde(
    rename = "cl_identifier",
    deserialize_with = "nullable",
    skip_serializing_if = "is_empty"
  )]
  pub id:          String,
  /// `"personal"` or `"organizational"`.
  #[serde(
    rename = "type",
    deserialize_with = "nullable",
    skip_serializing_if = "is_empty"
  )]
  pub kind:        String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub given_name:  String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub family_name: String,
  /// Display name for a person, or the corporate name for an organization.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub name:        String,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub identifiers: Vec<Identifier>,
}

/// Relationship of a creator or contributor to the work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:    String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub title: LocalizedText,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub props: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Affiliation {
  /// Organization id from the controlled vocabulary (e.g. a ROR id).
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:   String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub name: String,
}

// ─── Titles, descriptions, rights ────────────────────────────────────────────

/// An additional title (subtitle, translated title, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleDetail {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub title: String,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind:  Option<TypeDetail>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lang:  Option<TypeDetail>,
}

/// An additional description, e.g. methods, acknowledgements or a copyright
/// statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub description: String,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind:        Option<TypeDetail>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lang:        Option<TypeDetail>,
}

/// A license or rights statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Right {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:          String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub title:       LocalizedText,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub description: LocalizedText,
  /// Link to the full license text.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub link:        String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub props:       BTreeMap<String, String>,
}

// ─── Subjects and dates ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:      String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub subject: String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub scheme:  String,
}

/// A dated event in the life of the resource. `date` is kept as text since
/// it may be an EDTF interval such as `1939/1945`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateType {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub date:        String,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind:        Option<TypeDetail>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub description: String,
}

// ─── Funding ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Funder {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub funder:     Option<FunderRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub award:      Option<Award>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub references: Vec<Identifier>,
}

/// The funding organization, usually a ROR id plus a display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunderRef {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:   String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub name: String,
}

/// A grant or award, either by vocabulary id or by number and title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Award {
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub id:          String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub number:      String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub title:       LocalizedText,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub identifiers: Vec<Identifier>,
}

// ─── Metadata ────────────────────────────────────────────────────────────────

/// The descriptive metadata block. Fields serialize in declaration order.
///
/// This is the only part of a record with its own sparse diff; see
/// [`crate::diff::Diff`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_type:           Option<TypeDetail>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub creators:                Vec<Creator>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub title:                   String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub publication_date:        String,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub additional_titles:       Vec<TitleDetail>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub description:             String,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub additional_descriptions: Vec<Description>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub rights:                  Vec<Right>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub contributors:            Vec<Creator>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub subjects:                Vec<Subject>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub languages:               Vec<TypeDetail>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub dates:                   Vec<DateType>,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub version:                 String,
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub publisher:               String,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub identifiers:             Vec<Identifier>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub related_identifiers:     Vec<Identifier>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub funding:                 Vec<Funder>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn type_is_a_wire_keyword() {
    let d: Description = serde_json::from_str(
      r#"{"description": "Bla", "type": {"id": "methods"}, "lang": {"id": "eng"}}"#,
    )
    .unwrap();
    assert_eq!(d.kind, Some(TypeDetail::with_id("methods")));

    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["type"]["id"], "methods");
    assert!(json.get("kind").is_none());
  }

  #[test]
  fn localized_titles_decode() {
    let t: TypeDetail = serde_json::from_str(
      r#"{"id": "publication-article", "title": {"de": "Zeitschriftenartikel", "en": "Journal Article"}}"#,
    )
    .unwrap();
    assert_eq!(t.title.get("en").map(String::as_str), Some("Journal Article"));
  }

  #[test]
  fn person_or_org_uses_wire_names() {
    let p = PersonOrOrg {
      id: "Nielsen-L-H".into(),
      kind: "personal".into(),
      family_name: "Nielsen".into(),
      ..PersonOrOrg::default()
    };
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "cl_identifier": "Nielsen-L-H",
        "type": "personal",
        "family_name": "Nielsen",
      })
    );
  }

  #[test]
  fn empty_metadata_serializes_to_empty_object() {
    let json = serde_json::to_string(&Metadata::default()).unwrap();
    assert_eq!(json, "{}");
  }
}
