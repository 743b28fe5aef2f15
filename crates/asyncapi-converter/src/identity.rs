//! Document identifier assignment

use crate::error::{ConversionError, ConversionResult};
use crate::tree::{require, require_mapping, scalar_to_string, Mapping};
use serde_json::Value;

/// Set the document `id`
///
/// A caller-supplied override always wins. Without one, the id is derived
/// from `info.title` (see [`urn_from_title`]).
///
/// # Errors
/// `InvalidProperty("info")` or `InvalidProperty("title")` when deriving and
/// either is missing.
pub fn assign_id(document: &mut Mapping, id_override: Option<&str>) -> ConversionResult<()> {
    let id = match id_override {
        Some(id) => id.to_string(),
        None => derive_id(document)?,
    };
    document.insert("id".to_string(), Value::String(id));
    Ok(())
}

fn derive_id(document: &Mapping) -> ConversionResult<String> {
    let info = require_mapping(document, "info")?;
    let title = require(info, "title")?;
    if title.is_null() {
        return Err(ConversionError::invalid_property("title"));
    }
    Ok(urn_from_title(&scalar_to_string(title)))
}

/// `urn:` plus the lower-cased title with spaces replaced by dots
#[must_use]
pub fn urn_from_title(title: &str) -> String {
    format!("urn:{}", title.to_lowercase().replace(' ', "."))
}
