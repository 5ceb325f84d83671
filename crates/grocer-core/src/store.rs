//! The `EntityStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `grocer-store-sqlite`).
//! Higher layers (`grocer-api`, `grocer-server`) reach the store through
//! [`ResourceService`](crate::service::ResourceService), never through a
//! concrete backend.

use std::future::Future;

use crate::resource::Resource;

/// Abstraction over a document store holding one collection per resource
/// type.
///
/// The store owns the durable representation. It serialises individual
/// document writes per id but offers no transaction spanning a read and a
/// later write.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait EntityStore<R: Resource>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Number of documents in the collection.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Every document in the collection, in insertion order.
  fn find_all(&self) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// Retrieve a document by id. Returns `None` if not found.
  fn find_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + 'a;

  /// Upsert `entity`. An id is assigned if absent; an existing document with
  /// the same id is overwritten in place.
  fn save(&self, entity: R) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Upsert a batch of one or more entities atomically. The persisted
  /// entities are returned in submission order with ids populated.
  fn save_all(
    &self,
    entities: Vec<R>,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;
}
