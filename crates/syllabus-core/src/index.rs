//! ContentIndex — the per-classroom hierarchy used for browsing.
//!
//! Subject → chapter → ordered topic references. Both map levels keep
//! insertion order, and so does the JSON form: `{"Math": {"Algebra": [...]}}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pointer from the index to one [`ContentRecord`](crate::content::ContentRecord).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRef {
  pub id:    Uuid,
  /// The stored (post-disambiguation) topic title.
  pub title: String,
}

/// Chapter title → topics, in insertion order.
pub type ChapterMap = IndexMap<String, Vec<TopicRef>>;

/// The hierarchical index of one classroom.
///
/// Subject and chapter keys are matched exactly; `"Biology"` and `"biology"`
/// are different buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentIndex {
  subjects: IndexMap<String, ChapterMap>,
}

impl ContentIndex {
  pub fn new() -> Self { Self::default() }

  pub fn is_empty(&self) -> bool { self.subjects.is_empty() }

  /// Subject titles in insertion order.
  pub fn subject_titles(&self) -> impl Iterator<Item = &str> {
    self.subjects.keys().map(String::as_str)
  }

  pub fn chapters(&self, subject: &str) -> Option<&ChapterMap> {
    self.subjects.get(subject)
  }

  pub fn topics(&self, subject: &str, chapter: &str) -> Option<&[TopicRef]> {
    self
      .subjects
      .get(subject)
      .and_then(|chapters| chapters.get(chapter))
      .map(Vec::as_slice)
  }

  /// Every `(subject, chapter, topic)` entry, in index order.
  pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &TopicRef)> {
    self.subjects.iter().flat_map(|(subject, chapters)| {
      chapters.iter().flat_map(move |(chapter, topics)| {
        topics
          .iter()
          .map(move |topic| (subject.as_str(), chapter.as_str(), topic))
      })
    })
  }

  /// Number of topic references across the whole index.
  pub fn topic_count(&self) -> usize {
    self.subjects.values().flat_map(IndexMap::values).map(Vec::len).sum()
  }

  pub fn contains_id(&self, id: Uuid) -> bool {
    self.entries().any(|(_, _, topic)| topic.id == id)
  }

  /// The chapter map for `subject`, created empty if the subject is new.
  pub(crate) fn subject_entry(&mut self, subject: &str) -> &mut ChapterMap {
    self.subjects.entry(subject.to_owned()).or_default()
  }
}
