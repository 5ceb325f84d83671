//! [`ResourceService`]: list, get, create, replace, and patch over an
//! [`EntityStore`].
//!
//! Every operation is a short chain of awaited stages. Within a call the
//! stages run strictly in order, and dropping the returned future abandons
//! the stages that have not started. Store failures are relayed unmodified
//! as `S::Error`.
//!
//! No locking happens here: two concurrent patches against the same id may
//! both observe the same stored state and both write (last writer wins).

use std::{marker::PhantomData, sync::Arc};

use crate::{
  reconcile,
  resource::{Category, Resource, Vendor},
  store::EntityStore,
};

pub type CategoryService<S> = ResourceService<Category, S>;
pub type VendorService<S> = ResourceService<Vendor, S>;

/// The result of [`ResourceService::patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome<R> {
  /// A comparable field differed; the incoming entity was written once.
  Updated(R),
  /// Nothing differed; no write happened. Carries the stored entity.
  Unchanged(R),
  /// No entity with the requested id exists; no write happened.
  NotFound,
}

impl<R> PatchOutcome<R> {
  /// The entity to report back, or `None` for [`PatchOutcome::NotFound`].
  pub fn into_entity(self) -> Option<R> {
    match self {
      Self::Updated(r) | Self::Unchanged(r) => Some(r),
      Self::NotFound => None,
    }
  }

  pub fn was_written(&self) -> bool { matches!(self, Self::Updated(_)) }
}

/// CRUD operations for one resource type.
///
/// Cloning is cheap; the store is reference-counted.
pub struct ResourceService<R, S> {
  store:     Arc<S>,
  _resource: PhantomData<fn() -> R>,
}

impl<R, S> Clone for ResourceService<R, S> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      _resource: PhantomData,
    }
  }
}

impl<R, S> ResourceService<R, S>
where
  R: Resource,
  S: EntityStore<R>,
{
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      _resource: PhantomData,
    }
  }

  /// Every stored entity, in storage order.
  pub async fn list(&self) -> Result<Vec<R>, S::Error> { self.store.find_all().await }

  /// Look up one entity. Absence is `Ok(None)`, not an error.
  pub async fn get_by_id(&self, id: &str) -> Result<Option<R>, S::Error> {
    self.store.find_by_id(id).await
  }

  /// Persist one or more new entities. Any client-supplied id is discarded
  /// so the store always assigns a fresh one.
  pub async fn create(&self, inputs: Vec<R>) -> Result<Vec<R>, S::Error> {
    let inputs = inputs
      .into_iter()
      .map(|mut r| {
        r.set_id(None);
        r
      })
      .collect();
    self.store.save_all(inputs).await
  }

  /// Overwrite whatever is stored under `id` with `input`. Always writes;
  /// nothing is read first.
  pub async fn replace(&self, id: &str, input: R) -> Result<R, S::Error> {
    self.store.save(input.with_id(id)).await
  }

  /// Write `partial` under `id` only if it differs from the stored entity in
  /// at least one comparable field. At most one write per call.
  pub async fn patch(&self, id: &str, partial: R) -> Result<PatchOutcome<R>, S::Error> {
    let Some(existing) = self.store.find_by_id(id).await? else {
      tracing::debug!(collection = R::COLLECTION, id, "patch target not found");
      return Ok(PatchOutcome::NotFound);
    };

    let incoming = partial.with_id(id);
    let changed = reconcile::changed_fields(&existing, &incoming);

    if changed.is_empty() {
      tracing::debug!(collection = R::COLLECTION, id, "patch unchanged, skipping write");
      return Ok(PatchOutcome::Unchanged(existing));
    }

    tracing::debug!(collection = R::COLLECTION, id, ?changed, "patch changes fields");
    let saved = self.store.save(incoming).await?;
    Ok(PatchOutcome::Updated(saved))
  }
}
