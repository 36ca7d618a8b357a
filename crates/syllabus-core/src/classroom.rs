//! Classroom — the owner of one content index and its records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A classroom. Content can only be merged into a classroom that exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
  pub classroom_id: Uuid,
  pub name:         String,
  pub created_at:   DateTime<Utc>,
}
