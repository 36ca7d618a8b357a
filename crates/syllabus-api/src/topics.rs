//! Handlers for `/classrooms/:id/topics` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/classrooms/:id/topics` | `?prefix=` required; optional `limit` (default 20, max 100) |
//! | `GET`  | `/classrooms/:id/topics/:topic_id` | 404 if the classroom or topic is not found |

use axum::{Json, extract::State};
use serde::Deserialize;
use syllabus_core::{
  content::ContentRecord, parser::ContentParser, store::ContentStore,
};
use uuid::Uuid;

use crate::{
  ApiState,
  error::ApiError,
  extract::{PathParams, QueryParams},
  require_classroom,
};

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  /// Case-insensitive topic title prefix.
  pub prefix: String,
  pub limit:  Option<usize>,
}

/// `GET /classrooms/:id/topics?prefix=<text>[&limit=<n>]`
pub async fn search<S, P>(
  State(state): State<ApiState<S, P>>,
  PathParams(id): PathParams<Uuid>,
  QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Vec<ContentRecord>>, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  require_classroom(state.store.as_ref(), id).await?;

  let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
  let records = state
    .store
    .search_topics(id, &params.prefix, limit)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(records))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /classrooms/:id/topics/:topic_id`
pub async fn get_one<S, P>(
  State(state): State<ApiState<S, P>>,
  PathParams((id, topic_id)): PathParams<(Uuid, Uuid)>,
) -> Result<Json<ContentRecord>, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  require_classroom(state.store.as_ref(), id).await?;

  let record = state
    .store
    .get_record(id, topic_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!("topic {topic_id} not found in classroom {id}"))
    })?;
  Ok(Json(record))
}
