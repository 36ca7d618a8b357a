//! The ingest transaction, run on the connection thread.
//!
//! Read index → merge → insert records → replace index, all inside one
//! `IMMEDIATE` transaction. Taking the write lock up front means a second
//! ingest for the same classroom waits for this one and then merges against
//! the committed index, never a stale snapshot. Any error drops the
//! transaction, which rolls everything back.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, Transaction, TransactionBehavior};
use syllabus_core::{
  Merged,
  content::{ContentRecord, ParsedContent},
  merge_with_random_ids,
  store::IngestOutcome,
};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{decode_index, encode_dt, encode_index, encode_uuid, record_columns},
};

const INSERT_RECORDS: &str = "INSERT INTO content_records (
    record_id, classroom_id,
    subject_title, chapter_title, topic_title,
    subject_title_lower, chapter_title_lower, topic_title_lower,
    body, created_at
  ) VALUES ";

const RECORD_PLACEHOLDERS: &str = "(?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

pub(crate) fn ingest_blocking(
  conn: &mut rusqlite::Connection,
  classroom_id: Uuid,
  batch: &ParsedContent,
  created_at: DateTime<Utc>,
  chunk_size: usize,
) -> Result<IngestOutcome> {
  let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
  let id_str = encode_uuid(classroom_id);

  let exists = tx
    .query_row(
      "SELECT 1 FROM classrooms WHERE classroom_id = ?1",
      rusqlite::params![id_str],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if !exists {
    return Err(Error::ClassroomNotFound(classroom_id));
  }

  let current = tx
    .query_row(
      "SELECT index_json FROM content_indexes WHERE classroom_id = ?1",
      rusqlite::params![id_str],
      |row| row.get::<_, String>(0),
    )
    .optional()?
    .as_deref()
    .map(decode_index)
    .transpose()?
    .unwrap_or_default();

  let Merged { index, records } = merge_with_random_ids(&current, batch)?;
  let records: Vec<ContentRecord> = records
    .into_iter()
    .map(|r| r.into_record(classroom_id, created_at))
    .collect();

  // Records first: the index must never point at rows that do not exist.
  for (n, chunk) in records.chunks(chunk_size).enumerate() {
    insert_records(&tx, chunk)?;
    tracing::debug!(%classroom_id, chunk = n, rows = chunk.len(), "wrote record chunk");
  }

  tx.execute(
    "INSERT INTO content_indexes (classroom_id, index_json, updated_at)
     VALUES (?1, ?2, ?3)
     ON CONFLICT (classroom_id) DO UPDATE
       SET index_json = excluded.index_json,
           updated_at = excluded.updated_at",
    rusqlite::params![id_str, encode_index(&index)?, encode_dt(created_at)],
  )?;

  tx.commit()?;

  Ok(IngestOutcome { index, records })
}

/// Insert one chunk of records with a single multi-row statement.
fn insert_records(tx: &Transaction<'_>, chunk: &[ContentRecord]) -> Result<()> {
  if chunk.is_empty() {
    return Ok(());
  }
  let sql = format!(
    "{INSERT_RECORDS}{}",
    vec![RECORD_PLACEHOLDERS; chunk.len()].join(", ")
  );
  let values: Vec<String> = chunk.iter().flat_map(record_columns).collect();
  tx.execute(&sql, rusqlite::params_from_iter(values.iter()))?;
  Ok(())
}
