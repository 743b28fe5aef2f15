//! Removal of superseded 1.x fields

use crate::tree::{take_key, Mapping};

/// Top-level fields that have no place in a 2.0.0 document
pub const LEGACY_FIELDS: [&str; 5] = ["topics", "baseTopic", "stream", "events", "security"];

/// Remove every [`LEGACY_FIELDS`] entry, present or not
pub fn cleanup(document: &mut Mapping) {
    for field in LEGACY_FIELDS {
        take_key(document, field);
    }
}
