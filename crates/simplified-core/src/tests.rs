//! Decoding and round-trip tests against realistic repository payloads.

use chrono::{DateTime, Datelike};
use serde_json::json;

use crate::{
  Diff, Error, Record,
  codec::{DEFAULT_INDENT, decode},
  metadata::{Creator, Identifier, Metadata, PersonOrOrg, TypeDetail},
  record::{PersistentIdentifier, RecordIdentifier},
};

const DRAFT: &str = include_str!("testdata/draft.json");
const PUBLISHED: &str = include_str!("testdata/published.json");

fn draft() -> Record { Record::from_json(DRAFT.as_bytes()).expect("draft") }

fn published() -> Record {
  Record::from_json(PUBLISHED.as_bytes()).expect("published")
}

// ─── Decoding ────────────────────────────────────────────────────────────────

#[test]
fn draft_decodes_and_ignores_unknown_keys() {
  let rec = draft();
  assert_eq!(rec.pids["doi"], PersistentIdentifier {
    identifier: "10.5281/inveniordm.1234".into(),
    provider:   "datacite".into(),
    client:     "inveniordm".into(),
  });

  let meta = rec.metadata.as_ref().unwrap();
  assert_eq!(meta.title, "InvenioRDM");
  assert_eq!(meta.creators.len(), 1);
  assert_eq!(meta.creators[0].affiliations.len(), 2);
  assert_eq!(meta.languages.len(), 2);
  assert_eq!(meta.related_identifiers[0].relation_type.as_ref().unwrap().id, "iscitedby");
  assert_eq!(meta.funding[0].award.as_ref().unwrap().id, "00k4n6c32::755021");

  let access = rec.access.as_ref().unwrap();
  assert!(access.embargo.as_ref().unwrap().active);

  let files = rec.files.as_ref().unwrap();
  assert_eq!(files.entries["big-dataset.zip"].size, 1114324524355);
  assert!(rec.custom_fields.is_empty());
}

#[test]
fn published_record_decodes_nulls_as_absent() {
  let rec = published();

  let versions = rec.versions.as_ref().expect("versions");
  assert!(versions.is_latest);
  assert!(versions.is_latest_draft);
  assert_eq!(versions.index, 2);

  let embargo = rec.access.as_ref().unwrap().embargo.as_ref().unwrap();
  assert!(!embargo.active);
  assert!(embargo.reason.is_empty());

  let parent = rec.parent.as_ref().unwrap();
  assert_eq!(parent.access.as_ref().unwrap().owned_by[0].user, 13);

  let created = rec.created.expect("created");
  assert_eq!(created.year(), 2023);
  assert_eq!(rec.custom_fields["journal:journal"]["volume"], "120");
}

#[test]
fn mistyped_payload_is_a_decode_error() {
  let err = Record::from_json(br#"{"metadata": {"title": 42}}"#).unwrap_err();
  assert!(matches!(err, Error::Decode(_)));

  let err = Record::from_json(br#"{"created": "last tuesday"}"#).unwrap_err();
  assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn null_collection_elements_are_skipped() {
  let rec = Record::from_json(
    br#"{
      "pids": { "doi": null, "oai": { "identifier": "oai:authors.library.caltech.edu:1" } },
      "metadata": {
        "creators": [null, { "person_or_org": { "type": "personal", "name": "Doe, Jane" } }],
        "funding": [null]
      },
      "files": { "entries": { "a.txt": null, "b.txt": { "size": 3 } } }
    }"#,
  )
  .unwrap();

  assert_eq!(rec.pids.keys().collect::<Vec<_>>(), ["oai"]);
  let meta = rec.metadata.as_ref().unwrap();
  assert_eq!(meta.creators.len(), 1);
  assert!(meta.funding.is_empty());
  let files = rec.files.as_ref().unwrap();
  assert_eq!(files.entries.keys().collect::<Vec<_>>(), ["b.txt"]);
}

#[test]
fn missing_fields_default() {
  let rec = Record::from_json(b"{}").unwrap();
  assert_eq!(rec, Record::default());
  assert_eq!(rec.title(), None);
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[test]
fn round_trip_preserves_record() {
  for rec in [draft(), published()] {
    let src = rec.to_json_pretty(DEFAULT_INDENT).unwrap();
    let back: Record = decode(&src).unwrap();
    assert_eq!(back, rec);
  }
}

#[test]
fn round_trip_keeps_timestamp_offset() {
  let rec = published();
  let src = rec.to_json_pretty(2).unwrap();
  let text = String::from_utf8(src).unwrap();
  assert!(text.contains("\"created\": \"2023-12-12T20:21:52.455369+00:00\""));
  assert!(!text.contains("455369Z"));
}

#[test]
fn built_record_round_trips() {
  let rec = Record {
    id: "abc12-3de45".into(),
    parent: Some(RecordIdentifier {
      id: "parent-1".into(),
      ..RecordIdentifier::default()
    }),
    metadata: Some(Metadata {
      resource_type: Some(TypeDetail::with_id("publication-article")),
      title: "A title".into(),
      creators: vec![Creator {
        person_or_org: Some(PersonOrOrg {
          kind: "organizational".into(),
          name: "The Unseen University".into(),
          identifiers: vec![Identifier::new("ror", "05dxps055")],
          ..PersonOrOrg::default()
        }),
        ..Creator::default()
      }],
      ..Metadata::default()
    }),
    created: DateTime::parse_from_rfc3339("2024-02-29T12:00:00-08:00").ok(),
    ..Record::default()
  };

  let src = rec.to_json_pretty(DEFAULT_INDENT).unwrap();
  assert_eq!(Record::from_json(&src).unwrap(), rec);
}

#[test]
fn output_omits_empty_values_and_keeps_declaration_order() {
  let rec: Record = serde_json::from_value(json!({
    "updated": "2024-01-01T00:00:00Z",
    "metadata": { "version": "v2", "title": "T", "publisher": "" },
    "id": "x",
    "$schema": "local://records/record-v6.0.0.json"
  }))
  .unwrap();

  let text = String::from_utf8(rec.to_json_pretty(1).unwrap()).unwrap();
  let pos = |key: &str| text.find(&format!("\"{key}\"")).unwrap();
  assert!(pos("$schema") < pos("id"));
  assert!(pos("id") < pos("metadata"));
  assert!(pos("metadata") < pos("updated"));
  assert!(pos("title") < pos("version"));
  assert!(!text.contains("publisher"));
}

// ─── Fixture diff ────────────────────────────────────────────────────────────

#[test]
fn fixtures_diff_reports_only_changed_metadata() {
  let old = published();
  let mut new = old.clone();
  new.metadata.as_mut().unwrap().publisher = "PNAS".into();

  let (o, n) = old.diff(&new);
  assert_eq!(
    serde_json::to_value(&o).unwrap(),
    json!({ "metadata": { "publisher": "National Academy of Sciences" } })
  );
  assert_eq!(
    serde_json::to_value(&n).unwrap(),
    json!({ "metadata": { "publisher": "PNAS" } })
  );
}

#[test]
fn reordered_funding_is_a_change() {
  let old = published();
  let mut new = old.clone();
  new.metadata.as_mut().unwrap().funding.reverse();

  let (o, n) = old.diff(&new);
  assert_eq!(o.metadata.unwrap().funding, old.metadata.unwrap().funding);
  assert_eq!(n.metadata.unwrap().funding.len(), 2);
}
