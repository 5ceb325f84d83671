//! [`SqliteStore`], the SQLite implementation of [`EntityStore`].

use std::path::Path;

use grocer_core::{EntityStore, Resource};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{EncodedDocument, decode_document, encode_document},
  error::Error,
  schema::SCHEMA,
};

/// Insert a document, or overwrite the body of an existing one in place.
const UPSERT: &str = "INSERT INTO documents (collection, doc_id, body) VALUES (?1, ?2, ?3)
   ON CONFLICT (collection, doc_id) DO UPDATE SET body = excluded.body";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Grocer document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Upsert every document in one transaction.
  async fn upsert_documents(
    &self,
    collection: &'static str,
    docs: Vec<EncodedDocument>,
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare_cached(UPSERT)?;
          for doc in &docs {
            stmt.execute(rusqlite::params![collection, doc.doc_id, doc.body])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Write `body` verbatim under `doc_id`, skipping encoding.
  #[cfg(test)]
  pub(crate) async fn insert_raw(
    &self,
    collection: &'static str,
    doc_id: &str,
    body: &str,
  ) -> Result<()> {
    let doc = EncodedDocument {
      doc_id: doc_id.to_owned(),
      body:   body.to_owned(),
    };
    self.upsert_documents(collection, vec![doc]).await
  }
}

// ─── EntityStore impl ────────────────────────────────────────────────────────

impl<R: Resource> EntityStore<R> for SqliteStore {
  type Error = Error;

  async fn count(&self) -> Result<u64> {
    let collection = R::COLLECTION;

    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM documents WHERE collection = ?1",
          rusqlite::params![collection],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(n.max(0) as u64)
  }

  async fn find_all(&self) -> Result<Vec<R>> {
    let collection = R::COLLECTION;

    let bodies: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY seq")?;
        let rows = stmt
          .query_map(rusqlite::params![collection], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    bodies.iter().map(|b| decode_document(b)).collect()
  }

  async fn find_by_id(&self, id: &str) -> Result<Option<R>> {
    let collection = R::COLLECTION;
    let id = id.to_owned();

    let body: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT body FROM documents WHERE collection = ?1 AND doc_id = ?2",
            rusqlite::params![collection, id],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    body.as_deref().map(decode_document).transpose()
  }

  async fn save(&self, mut entity: R) -> Result<R> {
    let doc = encode_document(&mut entity)?;
    self.upsert_documents(R::COLLECTION, vec![doc]).await?;
    Ok(entity)
  }

  async fn save_all(&self, mut entities: Vec<R>) -> Result<Vec<R>> {
    let docs = entities
      .iter_mut()
      .map(encode_document)
      .collect::<Result<Vec<_>>>()?;
    self.upsert_documents(R::COLLECTION, docs).await?;
    Ok(entities)
  }
}
