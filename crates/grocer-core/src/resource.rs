//! Resource types: the flat, fixed-field documents held by an
//! [`EntityStore`](crate::store::EntityStore).
//!
//! Identifiers are opaque strings assigned by the store on first save. They
//! are absent on freshly-built values and never chosen by clients.

use std::fmt::Debug;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A document type that can be stored, listed, and patched.
pub trait Resource:
  Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Name of the storage collection holding documents of this type.
  const COLLECTION: &'static str;

  fn id(&self) -> Option<&str>;

  fn set_id(&mut self, id: Option<String>);

  /// The `(name, value)` pairs compared when deciding whether a patch
  /// changes anything. Never includes the identifier.
  fn comparable_fields(&self) -> Vec<(&'static str, &str)>;

  /// Builder-style [`Resource::set_id`].
  fn with_id(mut self, id: impl Into<String>) -> Self {
    self.set_id(Some(id.into()));
    self
  }
}

// ─── Category ────────────────────────────────────────────────────────────────

/// A product category, e.g. "Fruits".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  #[serde(default)]
  pub id:          Option<String>,
  #[serde(default)]
  pub description: String,
}

impl Category {
  pub fn new(description: impl Into<String>) -> Self {
    Self {
      id:          None,
      description: description.into(),
    }
  }
}

impl Resource for Category {
  const COLLECTION: &'static str = "categories";

  fn id(&self) -> Option<&str> { self.id.as_deref() }

  fn set_id(&mut self, id: Option<String>) { self.id = id; }

  fn comparable_fields(&self) -> Vec<(&'static str, &str)> {
    vec![("description", self.description.as_str())]
  }
}

// ─── Vendor ──────────────────────────────────────────────────────────────────

/// A vendor supplying the market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
  #[serde(default)]
  pub id:         Option<String>,
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub last_name:  String,
}

impl Vendor {
  pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
    Self {
      id:         None,
      first_name: first_name.into(),
      last_name:  last_name.into(),
    }
  }
}

impl Resource for Vendor {
  const COLLECTION: &'static str = "vendors";

  fn id(&self) -> Option<&str> { self.id.as_deref() }

  fn set_id(&mut self, id: Option<String>) { self.id = id; }

  fn comparable_fields(&self) -> Vec<(&'static str, &str)> {
    vec![
      ("firstName", self.first_name.as_str()),
      ("lastName", self.last_name.as_str()),
    ]
  }
}
