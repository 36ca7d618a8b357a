//! The content-tree merge.
//!
//! Folds a [`ParsedContent`] batch into an existing [`ContentIndex`]. The
//! merge is pure: it clones the index, appends to it, and hands back the new
//! index together with one [`NewContentRecord`] per incoming topic. Writing
//! both out as a single unit is the store's job.
//!
//! Existing entries are never reordered, renamed, or removed. New subjects,
//! chapters, and topics are appended in batch order.
//!
//! # Title collisions
//!
//! Stored topic titles are unique within a `(subject, chapter)` bucket. When
//! an incoming title is already taken, it gets a ` (n)` suffix, where `n - 1`
//! is the number of stored titles in the bucket that are either the title
//! itself or the title plus a ` (m)` suffix. If that suffixed title is taken
//! as well, `n` is bumped until it is free:
//!
//! | bucket before              | incoming  | stored       |
//! |----------------------------|-----------|--------------|
//! | `[]`                       | `Intro`   | `Intro`      |
//! | `[Intro]`                  | `Intro`   | `Intro (2)`  |
//! | `[Intro, Intro (2)]`       | `Intro`   | `Intro (3)`  |
//! | `[Intro (2)]`              | `Intro`   | `Intro`      |
//! | `[Intro, Intro (3)]`       | `Intro`   | `Intro (4)`  |

use uuid::Uuid;

use crate::{
  Result,
  content::{NewContentRecord, ParsedContent},
  index::{ContentIndex, TopicRef},
};

/// The result of a merge: the replacement index and the records it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
  pub index:   ContentIndex,
  /// One record per incoming topic, in batch order.
  pub records: Vec<NewContentRecord>,
}

/// Merge `batch` into a copy of `existing`, drawing topic ids from `next_id`.
///
/// `next_id` must never repeat an id and never return one already present in
/// `existing`. Fails with [`Error::MalformedBatch`](crate::Error::MalformedBatch)
/// before touching anything if any title in the batch is empty.
pub fn merge<F>(
  existing: &ContentIndex,
  batch: &ParsedContent,
  mut next_id: F,
) -> Result<Merged>
where
  F: FnMut() -> Uuid,
{
  batch.check_titles()?;

  let mut index = existing.clone();
  let mut records = Vec::with_capacity(batch.topic_count());

  for subject in &batch.subjects {
    let chapters = index.subject_entry(&subject.title);

    for chapter in &subject.chapters {
      let topics = chapters.entry(chapter.title.clone()).or_default();

      for topic in &chapter.topics {
        let title = disambiguate(topics, &topic.title);
        let id = next_id();

        topics.push(TopicRef { id, title: title.clone() });
        records.push(NewContentRecord {
          id,
          subject_title: subject.title.clone(),
          chapter_title: chapter.title.clone(),
          topic_title: title,
          body: topic.content.clone(),
        });
      }
    }
  }

  Ok(Merged { index, records })
}

/// [`merge`] with random v4 ids.
pub fn merge_with_random_ids(
  existing: &ContentIndex,
  batch: &ParsedContent,
) -> Result<Merged> {
  merge(existing, batch, Uuid::new_v4)
}

/// The title `title` should be stored under, given the bucket's current topics.
pub fn disambiguate(bucket: &[TopicRef], title: &str) -> String {
  let taken = |candidate: &str| bucket.iter().any(|t| t.title == candidate);

  if !taken(title) {
    return title.to_owned();
  }

  let k = bucket
    .iter()
    .filter(|t| is_variant_of(&t.title, title))
    .count();

  let mut n = k + 1;
  loop {
    let candidate = format!("{title} ({n})");
    if !taken(&candidate) {
      return candidate;
    }
    n += 1;
  }
}

/// `true` if `stored` is `base` or `base` followed by ` (n)`, `n >= 1`.
fn is_variant_of(stored: &str, base: &str) -> bool {
  if stored == base {
    return true;
  }
  stored
    .strip_prefix(base)
    .and_then(|rest| rest.strip_prefix(" ("))
    .and_then(|rest| rest.strip_suffix(')'))
    .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    .and_then(|n| n.parse::<u64>().ok())
    .is_some_and(|n| n >= 1)
}
