//! Encoding and decoding between [`Resource`] values and the rows of the
//! `documents` table.
//!
//! Bodies are the resource's own JSON form, id included. Ids are random
//! UUIDs stored as hyphenated lowercase strings.

use grocer_core::Resource;
use uuid::Uuid;

use crate::{Error, Result};

pub fn new_doc_id() -> String { Uuid::new_v4().hyphenated().to_string() }

/// A document ready to be written: the id column plus the JSON body.
pub struct EncodedDocument {
  pub doc_id: String,
  pub body:   String,
}

/// Encode `entity`, assigning a fresh id first if it has none.
pub fn encode_document<R: Resource>(entity: &mut R) -> Result<EncodedDocument> {
  let doc_id = match entity.id() {
    Some(id) => id.to_owned(),
    None => {
      let id = new_doc_id();
      entity.set_id(Some(id.clone()));
      id
    }
  };
  let body = serde_json::to_string(entity)?;
  Ok(EncodedDocument { doc_id, body })
}

pub fn decode_document<R: Resource>(body: &str) -> Result<R> {
  let entity: R = serde_json::from_str(body)?;
  if entity.id().is_none() {
    return Err(Error::MissingId {
      collection: R::COLLECTION,
    });
  }
  Ok(entity)
}
