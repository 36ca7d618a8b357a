//! The upstream parser boundary.
//!
//! Turning a document into [`ParsedContent`] is the job of an external,
//! nondeterministic service (an LLM). The merge never talks to it directly;
//! callers hold a [`ContentParser`] and hand its output to the store.

use std::future::Future;

use crate::{Error, Result, content::ParsedContent};

/// Anything that can turn free text into a [`ParsedContent`] batch.
pub trait ContentParser: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn parse(
    &self,
    text: &str,
  ) -> impl Future<Output = Result<ParsedContent, Self::Error>> + Send;
}

/// Strip a surrounding markdown code fence (```` ```json ```` … ```` ``` ````)
/// from a model response. Text without a fence is returned trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
  let trimmed = raw.trim();
  let Some(rest) = trimmed.strip_prefix("```") else {
    return trimmed;
  };
  // Drop the info string (`json`, `JSON`, …) on the opening line.
  let body = match rest.find('\n') {
    Some(newline) => &rest[newline + 1..],
    None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
  };
  body.strip_suffix("```").unwrap_or(body).trim()
}

/// Decode a model response into a batch, tolerating a markdown fence.
pub fn decode_llm_response(raw: &str) -> Result<ParsedContent> {
  serde_json::from_str(strip_code_fence(raw)).map_err(Error::Parse)
}

/// Treats its input as an already-generated model response.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedJsonParser;

impl ContentParser for FencedJsonParser {
  type Error = Error;

  async fn parse(&self, text: &str) -> Result<ParsedContent> {
    decode_llm_response(text)
  }
}

/// Returns the same batch for every input. For tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct StaticParser(pub ParsedContent);

impl ContentParser for StaticParser {
  type Error = Error;

  async fn parse(&self, _text: &str) -> Result<ParsedContent> {
    Ok(self.0.clone())
  }
}
