//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. The content index is stored
//! as compact JSON. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use syllabus_core::{
  classroom::Classroom, content::ContentRecord, index::ContentIndex,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── ContentIndex ─────────────────────────────────────────────────────────────

pub fn encode_index(index: &ContentIndex) -> Result<String> {
  Ok(serde_json::to_string(index)?)
}

pub fn decode_index(s: &str) -> Result<ContentIndex> {
  Ok(serde_json::from_str(s)?)
}

// ─── LIKE patterns ────────────────────────────────────────────────────────────

/// A `LIKE ... ESCAPE '\'` pattern matching strings that start with
/// `prefix` lower-cased.
pub fn lower_prefix_pattern(prefix: &str) -> String {
  let mut pattern = String::with_capacity(prefix.len() + 1);
  for c in prefix.to_lowercase().chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values for one `content_records` row, in insert order.
pub fn record_columns(record: &ContentRecord) -> [String; 10] {
  [
    encode_uuid(record.id),
    encode_uuid(record.classroom_id),
    record.subject_title.clone(),
    record.chapter_title.clone(),
    record.topic_title.clone(),
    record.subject_title_lower(),
    record.chapter_title_lower(),
    record.topic_title_lower(),
    record.body.clone(),
    encode_dt(record.created_at),
  ]
}

/// Raw strings read directly from a `content_records` row. The lower-cased
/// columns are never read back; they are recomputed from the titles.
pub struct RawContentRecord {
  pub record_id:     String,
  pub classroom_id:  String,
  pub subject_title: String,
  pub chapter_title: String,
  pub topic_title:   String,
  pub body:          String,
  pub created_at:    String,
}

impl RawContentRecord {
  pub const COLUMNS: &'static str = "record_id, classroom_id, subject_title, \
                             chapter_title, topic_title, body, created_at";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:     row.get(0)?,
      classroom_id:  row.get(1)?,
      subject_title: row.get(2)?,
      chapter_title: row.get(3)?,
      topic_title:   row.get(4)?,
      body:          row.get(5)?,
      created_at:    row.get(6)?,
    })
  }

  pub fn into_record(self) -> Result<ContentRecord> {
    Ok(ContentRecord {
      id:            decode_uuid(&self.record_id)?,
      classroom_id:  decode_uuid(&self.classroom_id)?,
      subject_title: self.subject_title,
      chapter_title: self.chapter_title,
      topic_title:   self.topic_title,
      body:          self.body,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `classrooms` row.
pub struct RawClassroom {
  pub classroom_id: String,
  pub name:         String,
  pub created_at:   String,
}

impl RawClassroom {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      classroom_id: row.get(0)?,
      name:         row.get(1)?,
      created_at:   row.get(2)?,
    })
  }

  pub fn into_classroom(self) -> Result<Classroom> {
    Ok(Classroom {
      classroom_id: decode_uuid(&self.classroom_id)?,
      name:         self.name,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
