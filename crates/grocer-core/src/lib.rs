//! Core types and trait definitions for the Grocer catalogue.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod reconcile;
pub mod resource;
pub mod seed;
pub mod service;
pub mod store;

pub use resource::{Category, Resource, Vendor};
pub use service::{CategoryService, PatchOutcome, ResourceService, VendorService};
pub use store::EntityStore;
