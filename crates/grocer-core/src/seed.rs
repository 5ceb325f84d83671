//! One-shot initial data load.
//!
//! [`seed_if_empty`] is called explicitly once at startup. The category count
//! is the only gate: a non-empty store is left untouched.

use crate::{
  resource::{Category, Vendor},
  store::EntityStore,
};

pub const CATEGORIES: [&str; 5] = ["Fruits", "Nuts", "Breads", "Meats", "Eggs"];

pub const VENDORS: [(&str, &str); 5] = [
  ("Joe", "Buck"),
  ("Micheal", "Weston"),
  ("Jessie", "Waters"),
  ("Bill", "Nershi"),
  ("Jimmy", "Buffett"),
];

/// What [`seed_if_empty`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReport {
  /// Categories already existed; nothing was written.
  Skipped { categories: u64 },
  /// The fixed data set was loaded.
  Loaded { categories: u64, vendors: u64 },
}

/// Load the fixed categories and vendors if the category collection is
/// empty. Saves run one at a time, categories first.
pub async fn seed_if_empty<S, E>(store: &S) -> Result<SeedReport, E>
where
  S: EntityStore<Category, Error = E> + EntityStore<Vendor, Error = E>,
  E: std::error::Error + Send + Sync + 'static,
{
  let existing = EntityStore::<Category>::count(store).await?;
  if existing > 0 {
    tracing::debug!(categories = existing, "store already populated, skipping seed");
    return Ok(SeedReport::Skipped { categories: existing });
  }

  tracing::info!("loading initial data");

  for description in CATEGORIES {
    EntityStore::<Category>::save(store, Category::new(description)).await?;
  }
  let categories = EntityStore::<Category>::count(store).await?;
  tracing::info!(categories, "loaded categories");

  for (first, last) in VENDORS {
    EntityStore::<Vendor>::save(store, Vendor::new(first, last)).await?;
  }
  let vendors = EntityStore::<Vendor>::count(store).await?;
  tracing::info!(vendors, "loaded vendors");

  Ok(SeedReport::Loaded { categories, vendors })
}
