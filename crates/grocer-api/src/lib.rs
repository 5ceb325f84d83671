//! JSON REST API for Grocer.
//!
//! Exposes an axum [`Router`] backed by any store implementing
//! [`EntityStore`] for both [`Category`] and [`Vendor`].
//! Tracing layers, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = grocer_api::api_router(store.clone());
//! ```

pub mod error;
pub mod resources;

use std::sync::Arc;

use axum::{Router, routing::get};
use grocer_core::{Category, EntityStore, Resource, ResourceService, Vendor};

pub use error::ApiError;

pub const CATEGORIES_PATH: &str = "/api/v1/categories";
pub const VENDORS_PATH: &str = "/api/v1/vendors";

/// Build the full API router for `store`: categories and vendors.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EntityStore<Category> + EntityStore<Vendor> + 'static,
{
  Router::new()
    .merge(resource_router::<Category, S>(CATEGORIES_PATH, store.clone()))
    .merge(resource_router::<Vendor, S>(VENDORS_PATH, store))
}

/// Build the routes for one collection mounted at `base`.
///
/// The collection path is accepted with and without a trailing slash.
pub fn resource_router<R, S>(base: &str, store: Arc<S>) -> Router<()>
where
  R: Resource,
  S: EntityStore<R> + 'static,
{
  use resources::{create, get_one, list, patch, replace};

  Router::new()
    .route(base, get(list::<R, S>).post(create::<R, S>))
    .route(&format!("{base}/"), get(list::<R, S>).post(create::<R, S>))
    .route(
      &format!("{base}/{{id}}"),
      get(get_one::<R, S>)
        .put(replace::<R, S>)
        .patch(patch::<R, S>),
    )
    .with_state(ResourceService::<R, S>::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use grocer_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn oneshot_json(
    store: Arc<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(store)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn create_category(store: &Arc<SqliteStore>, description: &str) -> String {
    let (status, body) = oneshot_json(
      store.clone(),
      "POST",
      "/api/v1/categories",
      Some(json!({ "description": description })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body[0]["id"].as_str().unwrap().to_string()
  }

  // ── Categories ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_categories_with_and_without_trailing_slash() {
    let store = make_store().await;
    create_category(&store, "Cat1").await;
    create_category(&store, "Cat2").await;

    for uri in ["/api/v1/categories", "/api/v1/categories/"] {
      let (status, body) = oneshot_json(store.clone(), "GET", uri, None).await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body.as_array().unwrap().len(), 2, "{uri}");
    }
  }

  #[tokio::test]
  async fn create_accepts_single_object_and_array() {
    let store = make_store().await;

    let (status, body) = oneshot_json(
      store.clone(),
      "POST",
      "/api/v1/vendors",
      Some(json!([
        { "firstName": "Joe", "lastName": "Buck" },
        { "firstName": "Bill", "lastName": "Nershi" },
      ])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = body.as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|v| !v["id"].as_str().unwrap().is_empty()));

    let (status, body) = oneshot_json(
      store,
      "POST",
      "/api/v1/vendors",
      Some(json!({ "id": "client-chosen", "firstName": "A", "lastName": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body[0]["id"], "client-chosen");
  }

  #[tokio::test]
  async fn get_existing_category() {
    let store = make_store().await;
    let id = create_category(&store, "Fruits").await;

    let (status, body) =
      oneshot_json(store, "GET", &format!("/api/v1/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Fruits");
    assert_eq!(body["id"], id.as_str());
  }

  #[tokio::test]
  async fn get_missing_returns_404() {
    let store = make_store().await;
    let (status, body) =
      oneshot_json(store, "GET", "/api/v1/categories/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("missing"));
  }

  #[tokio::test]
  async fn put_replaces_and_echoes_id() {
    let store = make_store().await;
    let id = create_category(&store, "Cat1").await;

    let (status, body) = oneshot_json(
      store,
      "PUT",
      &format!("/api/v1/categories/{id}"),
      Some(json!({ "description": "Cat2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["description"], "Cat2");
  }

  #[tokio::test]
  async fn patch_with_changes_returns_200_and_persists() {
    let store = make_store().await;
    let id = create_category(&store, "Cat1").await;
    let uri = format!("/api/v1/categories/{id}");

    let (status, body) = oneshot_json(
      store.clone(),
      "PATCH",
      &uri,
      Some(json!({ "id": id, "description": "Cat2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Cat2");

    let (_, body) = oneshot_json(store, "GET", &uri, None).await;
    assert_eq!(body["description"], "Cat2");
  }

  #[tokio::test]
  async fn patch_without_changes_returns_200() {
    let store = make_store().await;
    let id = create_category(&store, "Cat1").await;

    let (status, body) = oneshot_json(
      store,
      "PATCH",
      &format!("/api/v1/categories/{id}"),
      Some(json!({ "description": "Cat1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Cat1");
    assert_eq!(body["id"], id.as_str());
  }

  #[tokio::test]
  async fn patch_missing_returns_404() {
    let store = make_store().await;
    let (status, _) = oneshot_json(
      store.clone(),
      "PATCH",
      "/api/v1/vendors/missing",
      Some(json!({ "firstName": "A", "lastName": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = oneshot_json(store, "GET", "/api/v1/vendors", None).await;
    assert!(body.as_array().unwrap().is_empty());
  }

  #[tokio::test]
  async fn patch_vendor_single_field() {
    let store = make_store().await;
    let (_, created) = oneshot_json(
      store.clone(),
      "POST",
      "/api/v1/vendors",
      Some(json!({ "firstName": "A", "lastName": "B" })),
    )
    .await;
    let id = created[0]["id"].as_str().unwrap().to_string();

    let (status, body) = oneshot_json(
      store,
      "PATCH",
      &format!("/api/v1/vendors/{id}"),
      Some(json!({ "firstName": "A1", "lastName": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": id, "firstName": "A1", "lastName": "B" }));
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  struct BrokenStore;

  fn broken() -> std::io::Error { std::io::Error::other("disk on fire") }

  impl<R: Resource> EntityStore<R> for BrokenStore {
    type Error = std::io::Error;

    async fn count(&self) -> Result<u64, Self::Error> { Err(broken()) }

    async fn find_all(&self) -> Result<Vec<R>, Self::Error> { Err(broken()) }

    async fn find_by_id(&self, _id: &str) -> Result<Option<R>, Self::Error> {
      Err(broken())
    }

    async fn save(&self, _entity: R) -> Result<R, Self::Error> { Err(broken()) }

    async fn save_all(&self, _entities: Vec<R>) -> Result<Vec<R>, Self::Error> {
      Err(broken())
    }
  }

  #[tokio::test]
  async fn store_failure_returns_500() {
    let req = Request::builder()
      .uri("/api/v1/vendors")
      .body(Body::empty())
      .unwrap();
    let resp = api_router(Arc::new(BrokenStore)).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "disk on fire");
  }
}
