//! Record → Markdown renderer.
//!
//! Output is a flat document: a level-one heading with the title, a summary
//! list, then one level-two section per populated block. Empty sections are
//! skipped entirely.

use chrono::{DateTime, FixedOffset};
use simplified_core::{
  LocalizedText, Record,
  files::Files,
  metadata::{Creator, Funder, Identifier, Metadata, PersonOrOrg, TypeDetail},
  record::{RecordAccess, Tombstone},
};

// ─── Escaping ────────────────────────────────────────────────────────────────

/// Escape characters with inline meaning in Markdown: `\`, `*`, `_`, `` ` ``,
/// `[`, `]`.
pub(crate) fn escape_inline(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

fn table_cell(s: &str) -> String { escape_inline(s).replace('|', "\\|") }

// ─── Value helpers ───────────────────────────────────────────────────────────

/// English text if present, otherwise the first language in key order.
fn localized(text: &LocalizedText) -> Option<&str> {
  text
    .get("en")
    .or_else(|| text.values().next())
    .map(String::as_str)
    .filter(|s| !s.trim().is_empty())
}

fn term(t: &TypeDetail) -> String {
  if let Some(title) = localized(&t.title) {
    escape_inline(title)
  } else if !t.name.is_empty() {
    escape_inline(&t.name)
  } else {
    escape_inline(&t.id)
  }
}

fn identifier(id: &Identifier) -> String {
  let value = if id.identifier.is_empty() { &id.id } else { &id.identifier };
  if id.scheme.is_empty() {
    escape_inline(value)
  } else {
    format!("{}: {}", escape_inline(&id.scheme), escape_inline(value))
  }
}

fn display_name(p: &PersonOrOrg) -> String {
  if !p.name.is_empty() {
    return escape_inline(&p.name);
  }
  match (p.family_name.is_empty(), p.given_name.is_empty()) {
    (false, false) => {
      escape_inline(&format!("{}, {}", p.family_name, p.given_name))
    }
    (false, true) => escape_inline(&p.family_name),
    (true, false) => escape_inline(&p.given_name),
    (true, true) => escape_inline(&p.id),
  }
}

fn creator(c: &Creator) -> String {
  let mut line = c
    .person_or_org
    .as_ref()
    .map(display_name)
    .unwrap_or_default();

  if let Some(p) = &c.person_or_org
    && !p.identifiers.is_empty()
  {
    let ids: Vec<String> = p.identifiers.iter().map(identifier).collect();
    line.push_str(&format!(" ({})", ids.join(", ")));
  }
  if let Some(role) = &c.role {
    let role = if role.id.is_empty() {
      localized(&role.title).map(escape_inline).unwrap_or_default()
    } else {
      escape_inline(&role.id)
    };
    if !role.is_empty() {
      line.push_str(&format!(", *{role}*"));
    }
  }
  let affiliations: Vec<String> = c
    .affiliations
    .iter()
    .map(|a| if a.name.is_empty() { &a.id } else { &a.name })
    .filter(|s| !s.is_empty())
    .map(|s| escape_inline(s))
    .collect();
  if !affiliations.is_empty() {
    line.push_str(&format!("; {}", affiliations.join("; ")));
  }
  line
}

fn funder(f: &Funder) -> String {
  let mut parts: Vec<String> = Vec::new();
  if let Some(org) = &f.funder {
    let name = if org.name.is_empty() { &org.id } else { &org.name };
    parts.push(escape_inline(name));
  }
  if let Some(award) = &f.award {
    let mut a = String::new();
    if !award.number.is_empty() {
      a.push_str(&escape_inline(&award.number));
    } else if !award.id.is_empty() {
      a.push_str(&escape_inline(&award.id));
    }
    if let Some(title) = localized(&award.title) {
      a.push_str(&format!(" \"{}\"", escape_inline(title)));
    }
    if !a.is_empty() {
      parts.push(format!("award {a}"));
    }
  }
  parts.join(", ")
}

fn timestamp(t: &DateTime<FixedOffset>) -> String { t.to_rfc3339() }

fn human_size(bytes: u64) -> String {
  const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
  let mut size = bytes as f64;
  let mut unit = 0;
  while size >= 1024.0 && unit < UNITS.len() - 1 {
    size /= 1024.0;
    unit += 1;
  }
  if unit == 0 {
    format!("{bytes} B")
  } else {
    format!("{size:.1} {}", UNITS[unit])
  }
}

// ─── Document builder ────────────────────────────────────────────────────────

/// Appends a `## heading` followed by one bullet per item, skipping the
/// section when there are no items.
fn bullet_section(lines: &mut Vec<String>, heading: &str, items: Vec<String>) {
  if items.is_empty() {
    return;
  }
  lines.push(format!("## {heading}"));
  lines.push(String::new());
  for item in items {
    lines.push(format!("- {item}"));
  }
  lines.push(String::new());
}

fn summary_item(items: &mut Vec<String>, label: &str, value: &str) {
  if !value.is_empty() {
    items.push(format!("**{label}**: {}", escape_inline(value)));
  }
}

// ─── Sections ────────────────────────────────────────────────────────────────

fn summary(record: &Record) -> Vec<String> {
  let mut items = Vec::new();
  summary_item(&mut items, "ID", &record.id);
  if let Some(parent) = &record.parent {
    summary_item(&mut items, "Parent", &parent.id);
  }
  summary_item(&mut items, "Schema", &record.schema);
  if let Some(m) = &record.metadata {
    if let Some(rt) = &m.resource_type {
      items.push(format!("**Resource type**: {}", term(rt)));
    }
    summary_item(&mut items, "Publication date", &m.publication_date);
    summary_item(&mut items, "Publisher", &m.publisher);
    summary_item(&mut items, "Version", &m.version);
  }
  items
}

fn metadata_sections(lines: &mut Vec<String>, m: &Metadata) {
  bullet_section(
    lines,
    "Additional titles",
    m.additional_titles
      .iter()
      .map(|t| match &t.kind {
        Some(kind) => format!("{} ({})", escape_inline(&t.title), term(kind)),
        None => escape_inline(&t.title),
      })
      .collect(),
  );
  bullet_section(lines, "Creators", m.creators.iter().map(creator).collect());
  bullet_section(
    lines,
    "Contributors",
    m.contributors.iter().map(creator).collect(),
  );

  if !m.description.is_empty() {
    lines.push("## Description".to_string());
    lines.push(String::new());
    lines.push(m.description.clone());
    lines.push(String::new());
  }
  for d in &m.additional_descriptions {
    let heading = d.kind.as_ref().map(term).unwrap_or_else(|| "Note".into());
    lines.push(format!("### {heading}"));
    lines.push(String::new());
    lines.push(d.description.clone());
    lines.push(String::new());
  }

  bullet_section(
    lines,
    "Subjects",
    m.subjects
      .iter()
      .map(|s| if s.subject.is_empty() { &s.id } else { &s.subject })
      .map(|s| escape_inline(s))
      .collect(),
  );
  bullet_section(lines, "Languages", m.languages.iter().map(term).collect());
  bullet_section(
    lines,
    "Dates",
    m.dates
      .iter()
      .map(|d| {
        let mut line = escape_inline(&d.date);
        if let Some(kind) = &d.kind {
          line.push_str(&format!(" ({})", term(kind)));
        }
        if !d.description.is_empty() {
          line.push_str(&format!(": {}", escape_inline(&d.description)));
        }
        line
      })
      .collect(),
  );
  bullet_section(
    lines,
    "Rights",
    m.rights
      .iter()
      .map(|r| {
        let name = localized(&r.title)
          .map(escape_inline)
          .unwrap_or_else(|| escape_inline(&r.id));
        if r.link.is_empty() {
          name
        } else {
          format!("[{name}]({})", r.link)
        }
      })
      .collect(),
  );
  bullet_section(
    lines,
    "Identifiers",
    m.identifiers.iter().map(identifier).collect(),
  );
  bullet_section(
    lines,
    "Related identifiers",
    m.related_identifiers
      .iter()
      .map(|id| match &id.relation_type {
        Some(rel) => format!("{} {}", term(rel), identifier(id)),
        None => identifier(id),
      })
      .collect(),
  );
  bullet_section(lines, "Funding", m.funding.iter().map(funder).collect());
}

fn access_items(access: &RecordAccess) -> Vec<String> {
  let mut items = Vec::new();
  summary_item(&mut items, "Record", &access.record);
  summary_item(&mut items, "Files", &access.files);
  summary_item(&mut items, "Status", &access.status);
  if let Some(e) = access.embargo.as_ref().filter(|e| e.active) {
    let mut line = format!("**Embargoed until**: {}", escape_inline(&e.until));
    if !e.reason.is_empty() {
      line.push_str(&format!(" ({})", escape_inline(&e.reason)));
    }
    items.push(line);
  }
  items
}

fn files_table(lines: &mut Vec<String>, files: &Files) {
  let entries = files.ordered_entries();
  if entries.is_empty() {
    return;
  }
  lines.push("## Files".to_string());
  lines.push(String::new());
  lines.push("| Name | Type | Size | Checksum |".to_string());
  lines.push("| ---- | ---- | ---- | -------- |".to_string());
  for (name, entry) in entries {
    lines.push(format!(
      "| {} | {} | {} | {} |",
      table_cell(name),
      table_cell(&entry.mimetype),
      human_size(entry.size),
      table_cell(&entry.checksum),
    ));
  }
  lines.push(String::new());
}

fn tombstone_items(t: &Tombstone) -> Vec<String> {
  let mut items = Vec::new();
  summary_item(&mut items, "Reason", &t.reason);
  summary_item(&mut items, "Category", &t.category);
  if let Some(user) = &t.removed_by {
    let who = if user.display_name.is_empty() {
      user.user.to_string()
    } else {
      user.display_name.clone()
    };
    summary_item(&mut items, "Removed by", &who);
  }
  if let Some(ts) = &t.timestamp {
    items.push(format!("**Removed**: {}", timestamp(ts)));
  }
  items
}

// ─── Entry point ─────────────────────────────────────────────────────────────

pub(crate) fn render(record: &Record) -> String {
  let mut lines: Vec<String> = Vec::new();

  let title = record.title().unwrap_or("Untitled");
  lines.push(format!("# {}", escape_inline(title)));
  lines.push(String::new());
  for item in summary(record) {
    lines.push(format!("- {item}"));
  }
  if lines.len() > 2 {
    lines.push(String::new());
  }

  if let Some(m) = &record.metadata {
    metadata_sections(&mut lines, m);
  }

  bullet_section(
    &mut lines,
    "Persistent identifiers",
    record
      .pids
      .iter()
      .map(|(scheme, pid)| {
        let mut line =
          format!("{}: {}", escape_inline(scheme), escape_inline(&pid.identifier));
        if !pid.provider.is_empty() {
          line.push_str(&format!(" ({})", escape_inline(&pid.provider)));
        }
        line
      })
      .collect(),
  );
  if let Some(access) = &record.access {
    bullet_section(&mut lines, "Access", access_items(access));
  }
  if let Some(files) = &record.files {
    files_table(&mut lines, files);
  }
  bullet_section(
    &mut lines,
    "Custom fields",
    record
      .custom_fields
      .iter()
      .map(|(k, v)| format!("{}: `{v}`", escape_inline(k)))
      .collect(),
  );
  if let Some(t) = &record.tombstone {
    bullet_section(&mut lines, "Tombstone", tombstone_items(t));
  }

  let mut history = Vec::new();
  if let Some(ts) = &record.created {
    history.push(format!("**Created**: {}", timestamp(ts)));
  }
  if let Some(ts) = &record.updated {
    history.push(format!("**Updated**: {}", timestamp(ts)));
  }
  if let Some(v) = &record.versions {
    history.push(format!("**Version index**: {}", v.index));
    if v.is_latest {
      history.push("**Latest version**".to_string());
    }
  }
  bullet_section(&mut lines, "History", history);

  while lines.last().is_some_and(String::is_empty) {
    lines.pop();
  }
  lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_inline_markup() {
    assert_eq!(escape_inline("a_b*c[d]"), "a\\_b\\*c\\[d\\]");
  }

  #[test]
  fn table_cells_escape_pipes() {
    let mut files = Files::default();
    files.entries.insert("a|b.txt".into(), simplified_core::files::Entry {
      mimetype: "text/plain|x".into(),
      checksum: "md5:1|2".into(),
      size: 3,
      ..Default::default()
    });

    let mut lines = Vec::new();
    files_table(&mut lines, &files);
    assert_eq!(
      lines[4],
      "| a\\|b.txt | text/plain\\|x | 3 B | md5:1\\|2 |"
    );
  }

  #[test]
  fn human_sizes() {
    assert_eq!(human_size(512), "512 B");
    assert_eq!(human_size(2048), "2.0 KiB");
    assert_eq!(human_size(12166506), "11.6 MiB");
  }

  #[test]
  fn localized_prefers_english() {
    let mut t = LocalizedText::new();
    t.insert("de".into(), "Zeitschriftenartikel".into());
    assert_eq!(localized(&t), Some("Zeitschriftenartikel"));
    t.insert("en".into(), "Journal Article".into());
    assert_eq!(localized(&t), Some("Journal Article"));
    t.insert("en".into(), " ".into());
    assert_eq!(localized(&t), None);
  }
}
