//! The `ContentStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `syllabus-store-sqlite`).
//! Higher layers (`syllabus-api`, `syllabus-server`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  classroom::Classroom,
  content::{ContentRecord, ParsedContent},
  index::ContentIndex,
};

/// What a successful [`ContentStore::ingest`] wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOutcome {
  /// The classroom's index after the merge.
  pub index:   ContentIndex,
  /// The records created by this batch, in batch order.
  pub records: Vec<ContentRecord>,
}

/// Abstraction over a Syllabus storage backend.
///
/// Records are append-only. The index is replaced as a whole on every ingest.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Classrooms ────────────────────────────────────────────────────────

  fn create_classroom(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Classroom, Self::Error>> + Send;

  /// Returns `None` if not found.
  fn get_classroom(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Classroom>, Self::Error>> + Send;

  fn list_classrooms(
    &self,
  ) -> impl Future<Output = Result<Vec<Classroom>, Self::Error>> + Send;

  // ── Ingestion ─────────────────────────────────────────────────────────

  /// Merge `batch` into the classroom's index and persist the new records
  /// together with the updated index.
  ///
  /// Implementations must make the read-merge-write atomic: no reader may see
  /// the index without its records, and two concurrent ingests into the same
  /// classroom must not both merge against the same snapshot.
  ///
  /// Fails if the classroom does not exist or any title in `batch` is empty;
  /// nothing is written in either case.
  fn ingest(
    &self,
    classroom_id: Uuid,
    batch: ParsedContent,
  ) -> impl Future<Output = Result<IngestOutcome, Self::Error>> + Send;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The classroom's current index; empty if nothing has been ingested.
  fn get_index(
    &self,
    classroom_id: Uuid,
  ) -> impl Future<Output = Result<ContentIndex, Self::Error>> + Send;

  /// A single topic record. Returns `None` if no record with `topic_id`
  /// belongs to the classroom.
  fn get_record(
    &self,
    classroom_id: Uuid,
    topic_id: Uuid,
  ) -> impl Future<Output = Result<Option<ContentRecord>, Self::Error>> + Send;

  /// Records whose topic title starts with `prefix`, compared
  /// case-insensitively, oldest first.
  fn search_topics(
    &self,
    classroom_id: Uuid,
    prefix: &str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<ContentRecord>, Self::Error>> + Send;
}
