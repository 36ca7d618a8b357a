//! Handlers for content ingestion.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/classrooms/:id/content` | Body: [`ParsedContent`] JSON; returns 201 + [`IngestOutcome`] |
//! | `POST` | `/classrooms/:id/content/raw` | Body: text handed to the configured parser; returns 201 + [`IngestOutcome`] |
//!
//! Both routes reject batches with no subjects, a subject with no chapters,
//! a chapter with no topics, or an empty title (400), before anything is
//! written.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use syllabus_core::{
  content::ParsedContent,
  parser::ContentParser,
  store::{ContentStore, IngestOutcome},
};
use uuid::Uuid;

use crate::{
  ApiState,
  error::ApiError,
  extract::{JsonBody, PathParams},
  require_classroom,
};

/// `POST /classrooms/:id/content`
pub async fn ingest<S, P>(
  State(state): State<ApiState<S, P>>,
  PathParams(id): PathParams<Uuid>,
  JsonBody(batch): JsonBody<ParsedContent>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  require_classroom(state.store.as_ref(), id).await?;
  let outcome = store_batch(state.store.as_ref(), id, batch).await?;
  Ok((StatusCode::CREATED, Json(outcome)))
}

/// `POST /classrooms/:id/content/raw` — body is free text for the parser.
pub async fn ingest_raw<S, P>(
  State(state): State<ApiState<S, P>>,
  PathParams(id): PathParams<Uuid>,
  text: String,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  require_classroom(state.store.as_ref(), id).await?;

  let batch = state.parser.parse(&text).await.map_err(|e| {
    tracing::warn!(classroom_id = %id, error = %e, "parser rejected submitted text");
    ApiError::Parse(Box::new(e))
  })?;

  let outcome = store_batch(state.store.as_ref(), id, batch).await?;
  Ok((StatusCode::CREATED, Json(outcome)))
}

/// Validate `batch` and ingest it. The classroom must already be checked.
async fn store_batch<S>(
  store: &S,
  id: Uuid,
  batch: ParsedContent,
) -> Result<IngestOutcome, ApiError>
where
  S: ContentStore,
{
  if let Err(e) = batch.ensure_non_empty().and_then(|()| batch.check_titles()) {
    tracing::warn!(classroom_id = %id, error = %e, "rejected content batch");
    return Err(e.into());
  }

  store.ingest(id, batch).await.map_err(ApiError::store)
}
