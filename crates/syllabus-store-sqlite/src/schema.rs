//! SQL schema for the Syllabus SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS classrooms (
    classroom_id TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

-- Topic records are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS content_records (
    record_id           TEXT PRIMARY KEY,
    classroom_id        TEXT NOT NULL REFERENCES classrooms(classroom_id),
    subject_title       TEXT NOT NULL,
    chapter_title       TEXT NOT NULL,
    topic_title         TEXT NOT NULL,   -- as stored in the index
    subject_title_lower TEXT NOT NULL,   -- always lower(subject_title)
    chapter_title_lower TEXT NOT NULL,   -- always lower(chapter_title)
    topic_title_lower   TEXT NOT NULL,   -- always lower(topic_title)
    body                TEXT NOT NULL,
    created_at          TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- One hierarchical index document per classroom, replaced on every ingest.
CREATE TABLE IF NOT EXISTS content_indexes (
    classroom_id TEXT PRIMARY KEY REFERENCES classrooms(classroom_id),
    index_json   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS records_classroom_idx   ON content_records(classroom_id);
CREATE INDEX IF NOT EXISTS records_topic_lower_idx ON content_records(classroom_id, topic_title_lower);

PRAGMA user_version = 1;
";
