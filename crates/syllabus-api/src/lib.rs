//! JSON REST API for Syllabus.
//!
//! Exposes an axum [`Router`] backed by any [`ContentStore`] and any
//! [`ContentParser`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", syllabus_api::api_router(store.clone(), parser.clone()))
//! ```

pub mod classrooms;
pub mod content;
pub mod error;
pub mod extract;
pub mod topics;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use syllabus_core::{parser::ContentParser, store::ContentStore};

pub use error::ApiError;

/// Shared state threaded through all API handlers.
pub struct ApiState<S, P> {
  pub store:  Arc<S>,
  pub parser: Arc<P>,
}

impl<S, P> Clone for ApiState<S, P> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), parser: Arc::clone(&self.parser) }
  }
}

/// Build a fully-materialised API router for `store` and `parser`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, P>(store: Arc<S>, parser: Arc<P>) -> Router<()>
where
  S: ContentStore + 'static,
  P: ContentParser + 'static,
{
  Router::new()
    // Classrooms
    .route(
      "/classrooms",
      get(classrooms::list::<S, P>).post(classrooms::create::<S, P>),
    )
    .route("/classrooms/{id}", get(classrooms::get_one::<S, P>))
    .route("/classrooms/{id}/index", get(classrooms::index::<S, P>))
    // Content ingestion
    .route("/classrooms/{id}/content", post(content::ingest::<S, P>))
    .route("/classrooms/{id}/content/raw", post(content::ingest_raw::<S, P>))
    // Topics
    .route("/classrooms/{id}/topics", get(topics::search::<S, P>))
    .route("/classrooms/{id}/topics/{topic_id}", get(topics::get_one::<S, P>))
    .with_state(ApiState { store, parser })
}

/// 404 unless the classroom exists.
pub(crate) async fn require_classroom<S>(
  store: &S,
  id: uuid::Uuid,
) -> Result<syllabus_core::classroom::Classroom, ApiError>
where
  S: ContentStore,
{
  store
    .get_classroom(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("classroom {id} not found")))
}
