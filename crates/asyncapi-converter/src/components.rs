//! Shared component rewrites

use crate::error::ConversionResult;
use crate::message::rewrite_message;
use crate::tree::{mapping_mut, take_key, Mapping};
use serde_json::Value;

/// Rewrite `components.parameters` and `components.messages`
///
/// Parameters lose their `name` (2.0.0 keys parameters by name). Messages get
/// the same header and binding rewrites as channel messages. Documents
/// without a `components` mapping are left untouched.
///
/// # Errors
/// None at present; the signature matches the other pipeline steps.
pub fn update_components(document: &mut Mapping) -> ConversionResult<()> {
    let Some(components) = mapping_mut(document, "components") else {
        return Ok(());
    };

    if let Some(parameters) = mapping_mut(components, "parameters") {
        for parameter in parameters.values_mut().filter_map(Value::as_object_mut) {
            take_key(parameter, "name");
        }
    }

    if let Some(messages) = mapping_mut(components, "messages") {
        for message in messages.values_mut().filter_map(Value::as_object_mut) {
            rewrite_message(message);
        }
    }
    Ok(())
}
