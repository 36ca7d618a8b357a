//! [`SqliteStore`] — the SQLite implementation of [`ContentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use syllabus_core::{
  classroom::Classroom,
  content::{ContentRecord, ParsedContent},
  index::ContentIndex,
  store::{ContentStore, IngestOutcome},
};

use crate::{
  Result,
  encode::{
    RawClassroom, RawContentRecord, decode_index, encode_dt, encode_uuid,
    lower_prefix_pattern,
  },
  ingest::ingest_blocking,
  schema::SCHEMA,
};

/// Records written per `INSERT` statement during an ingest.
pub const DEFAULT_WRITE_CHUNK_SIZE: usize = 500;

/// Upper bound on the chunk size; keeps each statement under SQLite's bound
/// parameter limit (ten parameters per record).
pub const MAX_WRITE_CHUNK_SIZE: usize = 3_000;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Syllabus content store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:             tokio_rusqlite::Connection,
  write_chunk_size: usize,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, write_chunk_size: DEFAULT_WRITE_CHUNK_SIZE };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, write_chunk_size: DEFAULT_WRITE_CHUNK_SIZE };
    store.init_schema().await?;
    Ok(store)
  }

  /// Set how many records go into each `INSERT` during an ingest, clamped to
  /// `1..=MAX_WRITE_CHUNK_SIZE`. All chunks still commit in one transaction.
  pub fn with_write_chunk_size(mut self, size: usize) -> Self {
    self.write_chunk_size = size.clamp(1, MAX_WRITE_CHUNK_SIZE);
    self
  }

  pub fn write_chunk_size(&self) -> usize { self.write_chunk_size }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── ContentStore impl ───────────────────────────────────────────────────────

impl ContentStore for SqliteStore {
  type Error = crate::Error;

  // ── Classrooms ────────────────────────────────────────────────────────────

  async fn create_classroom(&self, name: String) -> Result<Classroom> {
    let classroom = Classroom {
      classroom_id: Uuid::new_v4(),
      name,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(classroom.classroom_id);
    let name_str = classroom.name.clone();
    let at_str   = encode_dt(classroom.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO classrooms (classroom_id, name, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(classroom_id = %classroom.classroom_id, "created classroom");
    Ok(classroom)
  }

  async fn get_classroom(&self, id: Uuid) -> Result<Option<Classroom>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawClassroom> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT classroom_id, name, created_at FROM classrooms WHERE classroom_id = ?1",
            rusqlite::params![id_str],
            RawClassroom::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawClassroom::into_classroom).transpose()
  }

  async fn list_classrooms(&self) -> Result<Vec<Classroom>> {
    let raws: Vec<RawClassroom> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT classroom_id, name, created_at FROM classrooms
           ORDER BY created_at, rowid",
        )?;
        let rows = stmt
          .query_map([], RawClassroom::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClassroom::into_classroom).collect()
  }

  // ── Ingestion ─────────────────────────────────────────────────────────────

  async fn ingest(
    &self,
    classroom_id: Uuid,
    batch:        ParsedContent,
  ) -> Result<IngestOutcome> {
    let created_at = Utc::now();
    let chunk_size = self.write_chunk_size;
    let topics     = batch.topic_count();

    let outcome = self
      .conn
      .call(move |conn| {
        Ok(ingest_blocking(conn, classroom_id, &batch, created_at, chunk_size))
      })
      .await??;

    tracing::info!(
      %classroom_id,
      topics,
      records = outcome.records.len(),
      indexed = outcome.index.topic_count(),
      "ingested content batch"
    );
    Ok(outcome)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_index(&self, classroom_id: Uuid) -> Result<ContentIndex> {
    let id_str = encode_uuid(classroom_id);

    let json: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT index_json FROM content_indexes WHERE classroom_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    match json {
      Some(json) => decode_index(&json),
      None => Ok(ContentIndex::default()),
    }
  }

  async fn get_record(
    &self,
    classroom_id: Uuid,
    topic_id:     Uuid,
  ) -> Result<Option<ContentRecord>> {
    let classroom_str = encode_uuid(classroom_id);
    let topic_str     = encode_uuid(topic_id);

    let raw: Option<RawContentRecord> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM content_records
           WHERE classroom_id = ?1 AND record_id = ?2",
          RawContentRecord::COLUMNS
        );
        Ok(conn
          .query_row(
            &sql,
            rusqlite::params![classroom_str, topic_str],
            RawContentRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContentRecord::into_record).transpose()
  }

  async fn search_topics(
    &self,
    classroom_id: Uuid,
    prefix:       &str,
    limit:        usize,
  ) -> Result<Vec<ContentRecord>> {
    let classroom_str = encode_uuid(classroom_id);
    let pattern       = lower_prefix_pattern(prefix);
    let limit_val     = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawContentRecord> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM content_records
           WHERE classroom_id = ?1 AND topic_title_lower LIKE ?2 ESCAPE '\\'
           ORDER BY created_at, rowid
           LIMIT ?3",
          RawContentRecord::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![classroom_str, pattern, limit_val],
            RawContentRecord::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContentRecord::into_record).collect()
  }
}
