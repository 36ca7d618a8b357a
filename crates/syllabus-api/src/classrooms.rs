//! Handlers for `/classrooms` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/classrooms` | All classrooms, oldest first |
//! | `POST` | `/classrooms` | Body: `{"name":"..."}`; returns 201 |
//! | `GET`  | `/classrooms/:id` | 404 if not found |
//! | `GET`  | `/classrooms/:id/index` | `{}` until content is ingested |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use syllabus_core::{
  classroom::Classroom, index::ContentIndex, parser::ContentParser,
  store::ContentStore,
};
use uuid::Uuid;

use crate::{
  ApiState,
  error::ApiError,
  extract::{JsonBody, PathParams},
  require_classroom,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /classrooms`
pub async fn list<S, P>(
  State(state): State<ApiState<S, P>>,
) -> Result<Json<Vec<Classroom>>, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  let classrooms = state
    .store
    .list_classrooms()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(classrooms))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /classrooms` — body: `{"name":"Period 3 Biology"}`
pub async fn create<S, P>(
  State(state): State<ApiState<S, P>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  let name = body.name.trim();
  if name.is_empty() {
    return Err(ApiError::BadRequest("classroom name must not be empty".into()));
  }
  let classroom = state
    .store
    .create_classroom(name.to_owned())
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(classroom)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /classrooms/:id`
pub async fn get_one<S, P>(
  State(state): State<ApiState<S, P>>,
  PathParams(id): PathParams<Uuid>,
) -> Result<Json<Classroom>, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  Ok(Json(require_classroom(state.store.as_ref(), id).await?))
}

// ─── Index ────────────────────────────────────────────────────────────────────

/// `GET /classrooms/:id/index`
pub async fn index<S, P>(
  State(state): State<ApiState<S, P>>,
  PathParams(id): PathParams<Uuid>,
) -> Result<Json<ContentIndex>, ApiError>
where
  S: ContentStore,
  P: ContentParser,
{
  require_classroom(state.store.as_ref(), id).await?;
  let index = state.store.get_index(id).await.map_err(ApiError::store)?;
  Ok(Json(index))
}
