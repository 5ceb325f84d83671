//! Handlers shared by every resource collection.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/{collection}` | All entities in storage order |
//! | `POST`  | `/{collection}` | Body: one object or an array; returns 201 + array |
//! | `GET`   | `/{collection}/:id` | 404 if not found |
//! | `PUT`   | `/{collection}/:id` | Unconditional overwrite |
//! | `PATCH` | `/{collection}/:id` | Writes only if a field changed; 200 either way, 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use grocer_core::{EntityStore, Resource, ResourceService};
use serde::Deserialize;

use crate::error::ApiError;

/// A `POST` body: a single entity or a batch of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Batch<R> {
  Many(Vec<R>),
  One(R),
}

impl<R> Batch<R> {
  pub fn into_vec(self) -> Vec<R> {
    match self {
      Batch::Many(items) => items,
      Batch::One(item) => vec![item],
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{collection}`
pub async fn list<R, S>(
  State(service): State<ResourceService<R, S>>,
) -> Result<Json<Vec<R>>, ApiError>
where
  R: Resource,
  S: EntityStore<R> + 'static,
{
  let entities = service.list().await.map_err(ApiError::store)?;
  Ok(Json(entities))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{collection}/:id`
pub async fn get_one<R, S>(
  State(service): State<ResourceService<R, S>>,
  Path(id): Path<String>,
) -> Result<Json<R>, ApiError>
where
  R: Resource,
  S: EntityStore<R> + 'static,
{
  let entity = service
    .get_by_id(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", R::COLLECTION)))?;
  Ok(Json(entity))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{collection}`: returns 201 + the stored entities with their ids.
pub async fn create<R, S>(
  State(service): State<ResourceService<R, S>>,
  Json(body): Json<Batch<R>>,
) -> Result<impl IntoResponse, ApiError>
where
  R: Resource,
  S: EntityStore<R> + 'static,
{
  let created = service
    .create(body.into_vec())
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(created)))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /{collection}/:id`
pub async fn replace<R, S>(
  State(service): State<ResourceService<R, S>>,
  Path(id): Path<String>,
  Json(body): Json<R>,
) -> Result<Json<R>, ApiError>
where
  R: Resource,
  S: EntityStore<R> + 'static,
{
  let saved = service.replace(&id, body).await.map_err(ApiError::store)?;
  Ok(Json(saved))
}

// ─── Patch ────────────────────────────────────────────────────────────────────

/// `PATCH /{collection}/:id`
pub async fn patch<R, S>(
  State(service): State<ResourceService<R, S>>,
  Path(id): Path<String>,
  Json(body): Json<R>,
) -> Result<Json<R>, ApiError>
where
  R: Resource,
  S: EntityStore<R> + 'static,
{
  let entity = service
    .patch(&id, body)
    .await
    .map_err(ApiError::store)?
    .into_entity()
    .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", R::COLLECTION)))?;
  Ok(Json(entity))
}
