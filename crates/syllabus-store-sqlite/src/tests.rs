//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use syllabus_core::{
  content::{ParsedChapter, ParsedContent, ParsedSubject, ParsedTopic},
  store::ContentStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn topic(title: &str, content: &str) -> ParsedTopic {
  ParsedTopic { title: title.into(), content: content.into() }
}

fn batch(subject: &str, chapter: &str, topics: Vec<ParsedTopic>) -> ParsedContent {
  ParsedContent {
    subjects: vec![ParsedSubject {
      title:    subject.into(),
      chapters: vec![ParsedChapter { title: chapter.into(), topics }],
    }],
  }
}

async fn record_count(s: &SqliteStore) -> i64 {
  s.connection()
    .call(|conn| {
      Ok(conn.query_row("SELECT COUNT(*) FROM content_records", [], |r| r.get(0))?)
    })
    .await
    .unwrap()
}

// ─── Classrooms ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_classroom() {
  let s = store().await;

  let classroom = s.create_classroom("Period 3 Biology".into()).await.unwrap();
  let fetched = s.get_classroom(classroom.classroom_id).await.unwrap();
  assert_eq!(fetched, Some(classroom));
}

#[tokio::test]
async fn get_classroom_missing_returns_none() {
  let s = store().await;
  assert!(s.get_classroom(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_classrooms_in_creation_order() {
  let s = store().await;
  s.create_classroom("A".into()).await.unwrap();
  s.create_classroom("B".into()).await.unwrap();

  let names: Vec<_> = s
    .list_classrooms()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(names, ["A", "B"]);
}

// ─── Index ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn index_of_fresh_classroom_is_empty() {
  let s = store().await;
  let classroom = s.create_classroom("Empty".into()).await.unwrap();
  assert!(s.get_index(classroom.classroom_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn ingest_math_algebra_equations() {
  let s = store().await;
  let classroom = s.create_classroom("Algebra I".into()).await.unwrap();
  let id = classroom.classroom_id;

  let outcome = s
    .ingest(id, batch("Math", "Algebra", vec![
      topic("Equations", "Solve for x."),
      topic("Equations", "Two unknowns."),
    ]))
    .await
    .unwrap();

  let titles: Vec<_> = outcome.records.iter().map(|r| r.topic_title.as_str()).collect();
  assert_eq!(titles, ["Equations", "Equations (2)"]);
  assert_ne!(outcome.records[0].id, outcome.records[1].id);
  assert!(outcome.records.iter().all(|r| r.classroom_id == id));

  let stored = s.get_index(id).await.unwrap();
  assert_eq!(stored, outcome.index);
  let expected = serde_json::json!({
    "Math": { "Algebra": [
      { "id": outcome.records[0].id, "title": "Equations" },
      { "id": outcome.records[1].id, "title": "Equations (2)" },
    ]}
  });
  assert_eq!(serde_json::to_value(&stored).unwrap(), expected);

  for record in &outcome.records {
    let fetched = s.get_record(id, record.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(record));
  }
}

#[tokio::test]
async fn second_batch_merges_against_committed_index() {
  let s = store().await;
  let id = s.create_classroom("c".into()).await.unwrap().classroom_id;

  s.ingest(id, batch("English", "Basics", vec![topic("Intro", "")]))
    .await
    .unwrap();
  let second = s
    .ingest(id, batch("English", "Basics", vec![topic("Intro", ""), topic("Intro", "")]))
    .await
    .unwrap();

  let titles: Vec<_> = second
    .index
    .topics("English", "Basics")
    .unwrap()
    .iter()
    .map(|t| t.title.as_str())
    .collect();
  assert_eq!(titles, ["Intro", "Intro (2)", "Intro (3)"]);
  assert_eq!(second.records.len(), 2);
  assert_eq!(record_count(&s).await, 3);
}

#[tokio::test]
async fn concurrent_ingests_never_share_a_snapshot() {
  let s = store().await;
  let id = s.create_classroom("c".into()).await.unwrap().classroom_id;

  let tasks: Vec<_> = (0..16)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move {
        s.ingest(id, batch("English", "Basics", vec![topic("Intro", "")])).await
      })
    })
    .collect();
  for task in tasks {
    task.await.unwrap().unwrap();
  }

  let index = s.get_index(id).await.unwrap();
  let titles: HashSet<_> = index
    .topics("English", "Basics")
    .unwrap()
    .iter()
    .map(|t| t.title.clone())
    .collect();
  let expected: HashSet<_> = std::iter::once("Intro".to_owned())
    .chain((2..=16).map(|n| format!("Intro ({n})")))
    .collect();
  assert_eq!(titles, expected);
  assert_eq!(record_count(&s).await, 16);
}

#[tokio::test]
async fn every_indexed_topic_resolves_to_its_record() {
  let s = store().await.with_write_chunk_size(2);
  let id = s.create_classroom("c".into()).await.unwrap().classroom_id;

  let topics = (0..7).map(|i| topic(&format!("T{}", i % 3), &format!("body {i}"))).collect();
  s.ingest(id, batch("S", "C", topics)).await.unwrap();
  s.ingest(id, batch("S", "D", vec![topic("T0", "")])).await.unwrap();

  let index = s.get_index(id).await.unwrap();
  let mut seen = HashSet::new();
  for (subject, chapter, topic_ref) in index.entries() {
    let record = s.get_record(id, topic_ref.id).await.unwrap().unwrap();
    assert_eq!(record.topic_title, topic_ref.title);
    assert_eq!(record.subject_title, subject);
    assert_eq!(record.chapter_title, chapter);
    assert!(seen.insert(record.id));
  }
  assert_eq!(seen.len(), 8);
  assert_eq!(record_count(&s).await, 8);
}

#[tokio::test]
async fn ingest_into_missing_classroom_fails() {
  let s = store().await;
  let missing = Uuid::new_v4();

  let err = s
    .ingest(missing, batch("Math", "Algebra", vec![topic("Equations", "")]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ClassroomNotFound(id) if id == missing));
  assert_eq!(record_count(&s).await, 0);
}

#[tokio::test]
async fn malformed_batch_writes_nothing() {
  let s = store().await;
  let id = s.create_classroom("c".into()).await.unwrap().classroom_id;
  s.ingest(id, batch("Math", "Algebra", vec![topic("Equations", "")]))
    .await
    .unwrap();
  let before = s.get_index(id).await.unwrap();

  let mut bad = batch("Math", "Algebra", vec![topic("Graphs", "")]);
  bad.subjects[0].chapters.push(ParsedChapter {
    title:  "Geometry".into(),
    topics: vec![topic("", "no title")],
  });
  let err = s.ingest(id, bad).await.unwrap_err();

  assert!(matches!(err, Error::Core(syllabus_core::Error::MalformedBatch(_))));
  assert_eq!(s.get_index(id).await.unwrap(), before);
  assert_eq!(record_count(&s).await, 1);
}

#[tokio::test]
async fn whitespace_topic_title_is_stored_as_given() {
  let s = store().await;
  let id = s.create_classroom("c".into()).await.unwrap().classroom_id;

  let outcome = s
    .ingest(id, batch("Math", "Algebra", vec![topic(" ", "x"), topic(" ", "y")]))
    .await
    .unwrap();

  let titles: Vec<_> = outcome.records.iter().map(|r| r.topic_title.as_str()).collect();
  assert_eq!(titles, [" ", "  (2)"]);
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_record_is_scoped_to_classroom() {
  let s = store().await;
  let a = s.create_classroom("a".into()).await.unwrap().classroom_id;
  let b = s.create_classroom("b".into()).await.unwrap().classroom_id;

  let outcome = s
    .ingest(a, batch("Math", "Algebra", vec![topic("Equations", "")]))
    .await
    .unwrap();
  let topic_id = outcome.records[0].id;

  assert!(s.get_record(a, topic_id).await.unwrap().is_some());
  assert!(s.get_record(b, topic_id).await.unwrap().is_none());
  assert!(s.get_record(a, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn lower_columns_mirror_titles() {
  let s = store().await;
  let id = s.create_classroom("c".into()).await.unwrap().classroom_id;
  s.ingest(id, batch("Biology", "Cell Structure", vec![topic("DNA", "")]))
    .await
    .unwrap();

  let rows: Vec<(String, String, String, String, String, String)> = s
    .connection()
    .call(|conn| {
      let mut stmt = conn.prepare(
        "SELECT subject_title, subject_title_lower,
                chapter_title, chapter_title_lower,
                topic_title,   topic_title_lower
         FROM content_records",
      )?;
      let rows = stmt
        .query_map([], |r| {
          Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      Ok(rows)
    })
    .await
    .unwrap();

  assert_eq!(rows.len(), 1);
  let (subject, subject_lower, chapter, chapter_lower, topic, topic_lower) = &rows[0];
  assert_eq!(subject_lower, &subject.to_lowercase());
  assert_eq!(chapter_lower, &chapter.to_lowercase());
  assert_eq!(topic_lower, &topic.to_lowercase());
  assert_eq!(topic_lower, "dna");
}

#[tokio::test]
async fn search_topics_by_case_insensitive_prefix() {
  let s = store().await;
  let id = s.create_classroom("c".into()).await.unwrap().classroom_id;
  s.ingest(id, batch("Math", "Algebra", vec![
    topic("Equations", ""),
    topic("equivalence", ""),
    topic("Graphs", ""),
    topic("100% effort", ""),
    topic("100 problems", ""),
  ]))
  .await
  .unwrap();

  let titles = |records: Vec<syllabus_core::content::ContentRecord>| {
    records.into_iter().map(|r| r.topic_title).collect::<Vec<_>>()
  };

  let hits = s.search_topics(id, "EQU", 10).await.unwrap();
  assert_eq!(titles(hits), ["Equations", "equivalence"]);

  let hits = s.search_topics(id, "equ", 1).await.unwrap();
  assert_eq!(titles(hits), ["Equations"]);

  let hits = s.search_topics(id, "100%", 10).await.unwrap();
  assert_eq!(titles(hits), ["100% effort"]);

  let other = s.create_classroom("d".into()).await.unwrap().classroom_id;
  assert!(s.search_topics(other, "Equ", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn chunk_size_is_clamped() {
  let s = store().await;
  assert_eq!(s.write_chunk_size(), crate::DEFAULT_WRITE_CHUNK_SIZE);
  assert_eq!(s.clone().with_write_chunk_size(0).write_chunk_size(), 1);
  assert_eq!(
    s.with_write_chunk_size(usize::MAX).write_chunk_size(),
    crate::MAX_WRITE_CHUNK_SIZE
  );
}
