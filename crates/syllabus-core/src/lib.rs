//! Core types, the content-tree merge, and trait definitions for Syllabus.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod classroom;
pub mod content;
pub mod error;
pub mod index;
pub mod merge;
pub mod parser;
pub mod store;

pub use error::{Error, Result};
pub use merge::{Merged, merge, merge_with_random_ids};
