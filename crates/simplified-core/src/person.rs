//! People vocabulary entries.
//!
//! A [`Person`] is the shape used when generating a people vocabulary for
//! the target repository. Unlike [`crate::metadata::PersonOrOrg`] it carries
//! affiliations directly.

use serde::{Deserialize, Serialize};

use crate::{
  metadata::{Affiliation, Identifier},
  wire::{is_empty, nullable, nullable_items},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
  /// Display name, conventionally `"Family, Given"`.
  #[serde(deserialize_with = "nullable", skip_serializing_if = "is_empty")]
  pub name:         String,
  #[serde(
    rename = "sort_name",
    deserialize_with = "nullable",
    skip_serializing_if = "is_empty"
  )]
  pub sort:         String,
  #[serde(
    rename = "family_name",
    deserialize_with = "nullable",
    skip_serializing_if = "is_empty"
  )]
  pub family:       String,
  #[serde(
    rename = "given_name",
    deserialize_with = "nullable",
    skip_serializing_if = "is_empty"
  )]
  pub given:        String,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub identifiers:  Vec<Identifier>,
  #[serde(deserialize_with = "nullable_items", skip_serializing_if = "is_empty")]
  pub affiliations: Vec<Affiliation>,
}

impl Person {
  /// The value of the first identifier with the given scheme.
  pub fn get_identifier(&self, scheme: &str) -> Option<&str> {
    self
      .identifiers
      .iter()
      .find(|id| id.scheme == scheme)
      .map(|id| id.identifier.as_str())
  }

  /// Fill in missing name parts the way the target repository derives them.
  ///
  /// - A `"Family, Given"` name with no parts is split into family/given.
  /// - An empty name or sort name is built from family and given.
  pub fn resolve(&mut self) {
    if !self.name.is_empty()
      && self.family.is_empty()
      && self.given.is_empty()
      && self.name.contains(", ")
    {
      let parts: Vec<&str> = self.name.split(',').collect();
      if let [family, given] = parts.as_slice() {
        self.family = family.trim().to_string();
        self.given = given.trim().to_string();
      }
    }
    if self.family.is_empty() || self.given.is_empty() {
      return;
    }
    if self.name.is_empty() {
      self.name = self.sortable_name();
    }
    if self.sort.is_empty() {
      self.sort = self.sortable_name();
    }
  }

  /// True if an affiliation with the same id and name is present.
  pub fn has_affiliation(&self, target: &Affiliation) -> bool {
    self.affiliations.iter().any(|a| a == target)
  }

  fn sortable_name(&self) -> String {
    format!("{}, {}", self.family, self.given)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn adhikari() -> Person {
    Person {
      name: "Adhikari, Rana X.".into(),
      family: "Adhikari".into(),
      given: "Rana X.".into(),
      identifiers: vec![
        Identifier::new("orcid", "0000-0002-5731-5076"),
        Identifier::new("clpid", "Adhikari-R-X"),
      ],
      affiliations: vec![Affiliation {
        id:   "05dxps055".into(),
        name: "Caltech".into(),
      }],
      ..Person::default()
    }
  }

  #[test]
  fn serializes_with_vocabulary_names() {
    let json = serde_json::to_value(adhikari()).unwrap();
    assert_eq!(json["family_name"], "Adhikari");
    assert_eq!(json["given_name"], "Rana X.");
    assert!(json.get("sort_name").is_none());
    assert_eq!(json["identifiers"][1]["scheme"], "clpid");
  }

  #[test]
  fn get_identifier_by_scheme() {
    let p = adhikari();
    assert_eq!(p.get_identifier("clpid"), Some("Adhikari-R-X"));
    assert_eq!(p.get_identifier("isni"), None);
  }

  #[test]
  fn resolve_splits_name() {
    let mut p = Person { name: "Doe, Jane".into(), ..Person::default() };
    p.resolve();
    assert_eq!(p.family, "Doe");
    assert_eq!(p.given, "Jane");
    assert_eq!(p.sort, "Doe, Jane");
  }

  #[test]
  fn resolve_builds_name_from_parts() {
    let mut p = Person {
      family: "Doe".into(),
      given: "Jane".into(),
      ..Person::default()
    };
    p.resolve();
    assert_eq!(p.name, "Doe, Jane");
    assert_eq!(p.sort, "Doe, Jane");
  }

  #[test]
  fn resolve_leaves_ambiguous_name_alone() {
    let mut p = Person {
      name: "Doe, Jane, Jr.".into(),
      ..Person::default()
    };
    p.resolve();
    assert!(p.family.is_empty());
    assert!(p.sort.is_empty());
  }

  #[test]
  fn has_affiliation_needs_id_and_name() {
    let p = adhikari();
    assert!(p.has_affiliation(&Affiliation {
      id:   "05dxps055".into(),
      name: "Caltech".into(),
    }));
    assert!(!p.has_affiliation(&Affiliation {
      id:   "05dxps055".into(),
      name: "California Institute of Technology".into(),
    }));
  }
}
