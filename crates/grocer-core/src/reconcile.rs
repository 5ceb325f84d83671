//! Patch reconciliation: does an incoming entity change anything stored?
//!
//! Comparison is exact and case-sensitive over
//! [`Resource::comparable_fields`]. Empty strings are ordinary values, so an
//! empty incoming field differs from a non-empty stored one.

use crate::resource::Resource;

/// Names of the comparable fields whose values differ between `existing` and
/// `incoming`, in field order.
pub fn changed_fields<R: Resource>(existing: &R, incoming: &R) -> Vec<&'static str> {
  existing
    .comparable_fields()
    .into_iter()
    .zip(incoming.comparable_fields())
    .filter(|((_, old), (_, new))| old != new)
    .map(|((name, _), _)| name)
    .collect()
}

/// Returns true if at least one comparable field differs.
pub fn has_changes<R: Resource>(existing: &R, incoming: &R) -> bool {
  !changed_fields(existing, incoming).is_empty()
}
