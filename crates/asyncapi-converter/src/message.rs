//! Operation and message rewrites shared by channels and components

use crate::tree::{rename_key, Mapping};
use serde_json::{json, Value};

/// Rewrite an operation (`publish` or `subscribe`) in place
///
/// The operation's message, or each variant of its `oneOf`, gets
/// [`rewrite_message`]. The operation's own `protocolInfo` moves to `bindings`.
pub fn rewrite_operation(operation: &mut Mapping) {
    if let Some(Value::Object(message)) = operation.get_mut("message") {
        rewrite_message(message);
    }
    relocate_protocol_info(operation);
}

/// Rewrite a message definition in place
///
/// A message with a `oneOf` list has each mapping variant rewritten; any
/// other message is rewritten directly.
pub fn rewrite_message(message: &mut Mapping) {
    match message.get_mut("oneOf") {
        Some(Value::Array(variants)) => {
            for variant in variants.iter_mut().filter_map(Value::as_object_mut) {
                rewrite_message_body(variant);
            }
        }
        _ => rewrite_message_body(message),
    }
}

fn rewrite_message_body(message: &mut Mapping) {
    headers_to_schema(message);
    relocate_protocol_info(message);
}

/// Wrap `headers` as `{"type": "object", "properties": <headers>}`
pub fn headers_to_schema(message: &mut Mapping) {
    if let Some(headers) = message.get_mut("headers") {
        let properties = headers.take();
        *headers = json!({
            "type": "object",
            "properties": properties,
        });
    }
}

/// Move `protocolInfo` to `bindings`
pub fn relocate_protocol_info(target: &mut Mapping) -> bool {
    rename_key(target, "protocolInfo", "bindings")
}
