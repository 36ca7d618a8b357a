//! SQLite backend for the Syllabus content store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod ingest;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DEFAULT_WRITE_CHUNK_SIZE, MAX_WRITE_CHUNK_SIZE, SqliteStore};

#[cfg(test)]
mod tests;
