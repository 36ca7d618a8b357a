//! Content types — parsed batches coming in, topic records going out.
//!
//! A [`ParsedContent`] batch is what the upstream parser produces. The merge
//! turns each of its topics into a [`NewContentRecord`]; the store stamps it
//! with a classroom and a timestamp to make a [`ContentRecord`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Parsed batch ────────────────────────────────────────────────────────────

/// One batch of parsed educational content: subjects → chapters → topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContent {
  pub subjects: Vec<ParsedSubject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSubject {
  pub title:    String,
  pub chapters: Vec<ParsedChapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChapter {
  pub title:  String,
  pub topics: Vec<ParsedTopic>,
}

/// A single topic. `content` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTopic {
  pub title:   String,
  pub content: String,
}

impl ParsedContent {
  /// Total number of topics across all subjects and chapters.
  pub fn topic_count(&self) -> usize {
    self
      .subjects
      .iter()
      .flat_map(|s| &s.chapters)
      .map(|c| c.topics.len())
      .sum()
  }

  /// Reject any subject, chapter, or topic whose title is the empty string.
  pub fn check_titles(&self) -> Result<()> {
    for (si, subject) in self.subjects.iter().enumerate() {
      if subject.title.is_empty() {
        return Err(Error::MalformedBatch(format!(
          "subject #{si} has an empty title"
        )));
      }
      for (ci, chapter) in subject.chapters.iter().enumerate() {
        if chapter.title.is_empty() {
          return Err(Error::MalformedBatch(format!(
            "chapter #{ci} of subject {:?} has an empty title",
            subject.title
          )));
        }
        for (ti, topic) in chapter.topics.iter().enumerate() {
          if topic.title.is_empty() {
            return Err(Error::MalformedBatch(format!(
              "topic #{ti} of {:?} / {:?} has an empty title",
              subject.title, chapter.title
            )));
          }
        }
      }
    }
    Ok(())
  }

  /// Require at least one subject, every subject to have a chapter, and
  /// every chapter to have a topic. Callers run this before ingesting.
  pub fn ensure_non_empty(&self) -> Result<()> {
    if self.subjects.is_empty() {
      return Err(Error::EmptyBatch("batch contains no subjects".into()));
    }
    for subject in &self.subjects {
      if subject.chapters.is_empty() {
        return Err(Error::EmptyBatch(format!(
          "subject {:?} contains no chapters",
          subject.title
        )));
      }
      for chapter in &subject.chapters {
        if chapter.topics.is_empty() {
          return Err(Error::EmptyBatch(format!(
            "chapter {:?} of subject {:?} contains no topics",
            chapter.title, subject.title
          )));
        }
      }
    }
    Ok(())
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A topic record produced by the merge, before it has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentRecord {
  pub id:            Uuid,
  pub subject_title: String,
  pub chapter_title: String,
  /// The title as stored in the index, possibly with a ` (n)` suffix.
  pub topic_title:   String,
  pub body:          String,
}

impl NewContentRecord {
  pub fn into_record(
    self,
    classroom_id: Uuid,
    created_at: DateTime<Utc>,
  ) -> ContentRecord {
    ContentRecord {
      id: self.id,
      classroom_id,
      subject_title: self.subject_title,
      chapter_title: self.chapter_title,
      topic_title: self.topic_title,
      body: self.body,
      created_at,
    }
  }
}

/// One topic's full content. Never updated once written.
///
/// The lower-cased title keys used for case-insensitive lookups are always
/// derived from the title fields and are never stored on the struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
  pub id:            Uuid,
  pub classroom_id:  Uuid,
  pub subject_title: String,
  pub chapter_title: String,
  pub topic_title:   String,
  pub body:          String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:    DateTime<Utc>,
}

impl ContentRecord {
  pub fn subject_title_lower(&self) -> String { self.subject_title.to_lowercase() }

  pub fn chapter_title_lower(&self) -> String { self.chapter_title.to_lowercase() }

  pub fn topic_title_lower(&self) -> String { self.topic_title.to_lowercase() }
}
