//! SQL schema for the Grocer SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. `seq` preserves insertion order; upserts keep the
-- original row and therefore the original position.
CREATE TABLE IF NOT EXISTS documents (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    collection  TEXT NOT NULL,   -- Resource::COLLECTION
    doc_id      TEXT NOT NULL,   -- store-assigned, opaque
    body        TEXT NOT NULL,   -- full JSON document, id included
    UNIQUE (collection, doc_id)
);

PRAGMA user_version = 1;
";
