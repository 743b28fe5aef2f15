//! Channel derivation and per-channel rewrites
//!
//! 1.x documents describe their operations in one of three mutually
//! exclusive shapes:
//!
//! ```text
//! topics: { "<topic>": { publish | subscribe } }   → one channel per topic
//! stream: { read: [...], write: [...] }            → single channel "/"
//! events: { receive: [...], send: [...] }          → single channel "/"
//! ```
//!
//! [`derive_channels`] builds the 2.0.0 `channels` mapping from whichever is
//! present; [`alter_channels`] then normalizes each channel's parameters,
//! operations and bindings.

use crate::error::{ConversionError, ConversionResult};
use crate::message::{relocate_protocol_info, rewrite_operation};
use crate::tree::{
    mapping_mut, require_mapping, require_mapping_mut, scalar_to_string, take_key, Mapping,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use std::fmt;

/// Channel key used by the single-channel shapes
pub const ROOT_CHANNEL: &str = "/";

/// Parameter name used when neither the entry nor the channel key names it
pub const DEFAULT_PARAMETER: &str = "default";

/// Error property reported when no legacy shape is present
pub const MISSING_SHAPE: &str = "missing one of topics/stream/events";

static PARAMETER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("parameter pattern compiles"));

/// Operation kinds of a 2.0.0 channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Messages the application receives
    Publish,
    /// Messages the application sends
    Subscribe,
}

impl Operation {
    /// Both operations, in rewrite order
    pub const ALL: [Operation; 2] = [Operation::Publish, Operation::Subscribe];

    /// Channel field holding this operation
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Operation::Publish => "publish",
            Operation::Subscribe => "subscribe",
        }
    }
}

/// Legacy encoding that channels are derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyShape {
    /// `topics` mapping, optionally prefixed by `baseTopic`
    Topics,
    /// `stream` with `read`/`write` message lists
    Stream,
    /// `events` with `receive`/`send` message lists
    Events,
}

impl LegacyShape {
    /// Detection priority
    pub const PRIORITY: [LegacyShape; 3] =
        [LegacyShape::Topics, LegacyShape::Stream, LegacyShape::Events];

    /// Top-level document field for this shape
    #[inline]
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            LegacyShape::Topics => "topics",
            LegacyShape::Stream => "stream",
            LegacyShape::Events => "events",
        }
    }

    /// Message-list fields mapped to `(subscribe, publish)`
    ///
    /// `None` for `Topics`, which carries operations per topic.
    #[must_use]
    pub fn message_lists(&self) -> Option<(&'static str, &'static str)> {
        match self {
            LegacyShape::Topics => None,
            LegacyShape::Stream => Some(("read", "write")),
            LegacyShape::Events => Some(("receive", "send")),
        }
    }

    /// First shape present in the document, by priority
    #[must_use]
    pub fn detect(document: &Mapping) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|shape| document.contains_key(shape.field()))
    }
}

impl fmt::Display for LegacyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Build the `channels` mapping from the document's legacy shape
///
/// # Errors
/// - `InvalidProperty("missing one of topics/stream/events")` if no shape is present
/// - `InvalidProperty(<shape>)` if the shape's field is not a mapping
/// - `InvalidProperty("<shape>.<list>")` if a message list is not a sequence
pub fn derive_channels(document: &mut Mapping) -> ConversionResult<()> {
    let shape = LegacyShape::detect(document)
        .ok_or_else(|| ConversionError::invalid_property(MISSING_SHAPE))?;
    tracing::debug!(shape = %shape, "deriving channels");

    let channels = match shape {
        LegacyShape::Topics => channels_from_topics(document)?,
        LegacyShape::Stream | LegacyShape::Events => channels_from_message_lists(document, shape)?,
    };
    document.insert("channels".to_string(), Value::Object(channels));
    Ok(())
}

fn channels_from_topics(document: &Mapping) -> ConversionResult<Mapping> {
    let topics = require_mapping(document, LegacyShape::Topics.field())?;
    let base_topic = match document.get("baseTopic") {
        None | Some(Value::Null) => String::new(),
        Some(base) => scalar_to_string(base),
    };

    let mut channels = Mapping::new();
    for (topic, value) in topics {
        let mut value = value.clone();
        if let Value::Object(operations) = &mut value {
            wrap_topic_operation(operations);
        }
        channels.insert(channel_key(&base_topic, topic), value);
    }
    Ok(channels)
}

/// Channel key for a topic: `<base>/<topic>` with dots turned into slashes
#[must_use]
pub fn channel_key(base_topic: &str, topic: &str) -> String {
    let path = if base_topic.is_empty() {
        topic.to_string()
    } else {
        format!("{base_topic}/{topic}")
    };
    path.replace('.', "/")
}

/// Wrap the topic's `publish` (or else `subscribe`) value as `{"message": ...}`
fn wrap_topic_operation(operations: &mut Mapping) {
    let present = Operation::ALL
        .into_iter()
        .find(|op| operations.get(op.key()).is_some_and(|v| !v.is_null()));
    if let Some(op) = present {
        if let Some(slot) = operations.get_mut(op.key()) {
            let message = slot.take();
            *slot = json!({ "message": message });
        }
    }
}

fn channels_from_message_lists(
    document: &Mapping,
    shape: LegacyShape,
) -> ConversionResult<Mapping> {
    let source = require_mapping(document, shape.field())?;
    let Some((subscribe_list, publish_list)) = shape.message_lists() else {
        return Err(ConversionError::invalid_property(shape.field()));
    };

    let mut channel = Mapping::new();
    for (op, list) in [
        (Operation::Subscribe, subscribe_list),
        (Operation::Publish, publish_list),
    ] {
        if let Some(operation) = operation_from_list(source, shape, list)? {
            channel.insert(op.key().to_string(), operation);
        }
    }

    let mut channels = Mapping::new();
    channels.insert(ROOT_CHANNEL.to_string(), Value::Object(channel));
    Ok(channels)
}

/// Collapse a message list into an operation
///
/// One message becomes `{"message": m}`; more become `{"message": {"oneOf": [...]}}`.
fn operation_from_list(
    source: &Mapping,
    shape: LegacyShape,
    list: &str,
) -> ConversionResult<Option<Value>> {
    match source.get(list) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(messages)) => Ok(match messages.as_slice() {
            [] => None,
            [message] => Some(json!({ "message": message })),
            _ => Some(json!({ "message": { "oneOf": messages } })),
        }),
        Some(_) => Err(ConversionError::invalid_property(format!("{shape}.{list}"))),
    }
}

/// Normalize every derived channel
///
/// # Errors
/// - `InvalidProperty("channels")` if channels were not derived
/// - `InvalidProperty("malformed channel")` if a channel is not a mapping
/// - `InvalidProperty("malformed parameter")` if a parameter is not a mapping
pub fn alter_channels(document: &mut Mapping) -> ConversionResult<()> {
    let channels = require_mapping_mut(document, "channels")?;

    for (key, item) in channels.iter_mut() {
        let channel = item
            .as_object_mut()
            .ok_or_else(|| ConversionError::invalid_property("malformed channel"))?;

        let parameters = match channel.get_mut("parameters") {
            Some(Value::Array(parameters)) => Some(std::mem::take(parameters)),
            _ => None,
        };
        if let Some(parameters) = parameters {
            let keyed = key_parameters(parameters, key)?;
            channel.insert("parameters".to_string(), Value::Object(keyed));
        }

        for op in Operation::ALL {
            if let Some(operation) = mapping_mut(channel, op.key()) {
                rewrite_operation(operation);
            }
        }
        relocate_protocol_info(channel);
    }
    Ok(())
}

/// Turn a parameter list into a mapping keyed by parameter name
///
/// Each name comes from, in order: the entry's `name`, the `{token}` at the
/// same position in `channel_key`, or [`DEFAULT_PARAMETER`]. Braces are
/// stripped and `name` is dropped from the stored entry.
///
/// # Errors
/// `InvalidProperty("malformed parameter")` if an entry is not a mapping.
pub fn key_parameters(parameters: Vec<Value>, channel_key: &str) -> ConversionResult<Mapping> {
    let tokens: Vec<&str> = PARAMETER_TOKEN
        .find_iter(channel_key)
        .map(|m| m.as_str())
        .collect();

    let mut keyed = Mapping::new();
    for (index, parameter) in parameters.into_iter().enumerate() {
        let Value::Object(mut parameter) = parameter else {
            return Err(ConversionError::invalid_property("malformed parameter"));
        };

        let name = match parameter.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => tokens
                .get(index)
                .map_or(DEFAULT_PARAMETER, |token| *token)
                .to_string(),
        };
        let name = name.trim_end_matches('}').trim_start_matches('{').to_string();

        take_key(&mut parameter, "name");
        keyed.insert(name, Value::Object(parameter));
    }
    Ok(keyed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::into_document;
    use pretty_assertions::assert_eq;

    fn doc(value: Value) -> Mapping {
        into_document(value).unwrap()
    }

    #[test]
    fn detect_priority() {
        let both = doc(json!({"events": {}, "stream": {}, "topics": {}}));
        assert_eq!(LegacyShape::detect(&both), Some(LegacyShape::Topics));

        let stream_and_events = doc(json!({"events": {}, "stream": {}}));
        assert_eq!(LegacyShape::detect(&stream_and_events), Some(LegacyShape::Stream));

        assert_eq!(LegacyShape::detect(&doc(json!({"info": {}}))), None);
    }

    #[test]
    fn topics_with_base_topic() {
        let mut document = doc(json!({
            "baseTopic": "smartylighting.streetlights.1.0",
            "topics": {
                "event.{streetlightId}.lighting.measured": {
                    "publish": {"$ref": "#/components/messages/lightMeasured"}
                },
                "action.{streetlightId}.turn.on": {
                    "subscribe": {"$ref": "#/components/messages/turnOnOff"}
                }
            }
        }));

        derive_channels(&mut document).unwrap();

        assert_eq!(
            document["channels"],
            json!({
                "smartylighting/streetlights/1/0/event/{streetlightId}/lighting/measured": {
                    "publish": {"message": {"$ref": "#/components/messages/lightMeasured"}}
                },
                "smartylighting/streetlights/1/0/action/{streetlightId}/turn/on": {
                    "subscribe": {"message": {"$ref": "#/components/messages/turnOnOff"}}
                }
            })
        );
        // Legacy fields stay until cleanup
        assert!(document.contains_key("topics"));
    }

    #[test]
    fn topic_publish_checked_first() {
        let mut document = doc(json!({
            "topics": {"a.b": {"publish": {"$ref": "#/p"}, "subscribe": {"$ref": "#/s"}}}
        }));
        derive_channels(&mut document).unwrap();
        assert_eq!(
            document["channels"]["a/b"],
            json!({"publish": {"message": {"$ref": "#/p"}}, "subscribe": {"$ref": "#/s"}})
        );
    }

    #[test]
    fn topic_without_operations_copied() {
        let mut document = doc(json!({"baseTopic": "", "topics": {"plain": {"parameters": []}, "odd": 3}}));
        derive_channels(&mut document).unwrap();
        assert_eq!(
            document["channels"],
            json!({"plain": {"parameters": []}, "odd": 3})
        );
    }

    #[test]
    fn topics_must_be_mapping() {
        let mut document = doc(json!({"topics": ["a"]}));
        assert_eq!(
            derive_channels(&mut document),
            Err(ConversionError::invalid_property("topics"))
        );
    }

    #[test]
    fn stream_lists_collapse() {
        let mut document = doc(json!({
            "stream": {
                "read": [{"$ref": "#/components/messages/chatMessage"}, {"$ref": "#/components/messages/heartbeat"}],
                "write": [{"$ref": "#/components/messages/ack"}]
            }
        }));

        derive_channels(&mut document).unwrap();

        assert_eq!(
            document["channels"],
            json!({
                "/": {
                    "subscribe": {"message": {"oneOf": [
                        {"$ref": "#/components/messages/chatMessage"},
                        {"$ref": "#/components/messages/heartbeat"}
                    ]}},
                    "publish": {"message": {"$ref": "#/components/messages/ack"}}
                }
            })
        );
    }

    #[test]
    fn events_map_receive_and_send() {
        let mut document = doc(json!({
            "events": {
                "receive": [{"$ref": "#/components/messages/hello"}],
                "send": []
            }
        }));

        derive_channels(&mut document).unwrap();

        assert_eq!(
            document["channels"],
            json!({"/": {"subscribe": {"message": {"$ref": "#/components/messages/hello"}}}})
        );
    }

    #[test]
    fn message_list_shape_errors() {
        let mut document = doc(json!({"stream": "nope"}));
        assert_eq!(
            derive_channels(&mut document),
            Err(ConversionError::invalid_property("stream"))
        );

        let mut document = doc(json!({"events": {"send": {"$ref": "#/m"}}}));
        assert_eq!(
            derive_channels(&mut document),
            Err(ConversionError::invalid_property("events.send"))
        );
    }

    #[test]
    fn missing_shape() {
        let mut document = doc(json!({"asyncapi": "1.0.0"}));
        assert_eq!(
            derive_channels(&mut document),
            Err(ConversionError::invalid_property(MISSING_SHAPE))
        );
    }

    #[test]
    fn parameters_named_by_position() {
        let keyed = key_parameters(
            vec![json!({"schema": {"type": "string"}}), json!({"schema": {"type": "integer"}})],
            "user/{id}/{action}",
        )
        .unwrap();

        assert_eq!(keyed.keys().collect::<Vec<_>>(), ["id", "action"]);
        assert_eq!(keyed["action"], json!({"schema": {"type": "integer"}}));
    }

    #[test]
    fn explicit_parameter_name_wins() {
        let keyed = key_parameters(
            vec![json!({"schema": {}}), json!({"name": "{verb}", "schema": {}}), json!({})],
            "user/{id}/{action}",
        )
        .unwrap();

        assert_eq!(keyed.keys().collect::<Vec<_>>(), ["id", "verb", "default"]);
        assert_eq!(keyed["verb"], json!({"schema": {}}));
    }

    #[test]
    fn malformed_parameter() {
        assert_eq!(
            key_parameters(vec![json!("id")], "a/{id}"),
            Err(ConversionError::invalid_property("malformed parameter"))
        );
    }

    #[test]
    fn alter_channels_rewrites_everything() {
        let mut document = doc(json!({
            "channels": {
                "light/{streetlightId}": {
                    "parameters": [{"name": "streetlightId", "schema": {"type": "string"}}],
                    "protocolInfo": {"amqp": {"exchange": "lights"}},
                    "publish": {
                        "message": {"headers": {"qos": {"type": "integer"}}}
                    },
                    "subscribe": {"protocolInfo": {"mqtt": {"qos": 1}}}
                }
            }
        }));

        alter_channels(&mut document).unwrap();

        assert_eq!(
            document["channels"]["light/{streetlightId}"],
            json!({
                "parameters": {"streetlightId": {"schema": {"type": "string"}}},
                "bindings": {"amqp": {"exchange": "lights"}},
                "publish": {
                    "message": {"headers": {"type": "object", "properties": {"qos": {"type": "integer"}}}}
                },
                "subscribe": {"bindings": {"mqtt": {"qos": 1}}}
            })
        );
    }

    #[test]
    fn alter_channels_errors() {
        let mut document = doc(json!({}));
        assert_eq!(
            alter_channels(&mut document),
            Err(ConversionError::invalid_property("channels"))
        );

        let mut document = doc(json!({"channels": {"a": "b"}}));
        assert_eq!(
            alter_channels(&mut document),
            Err(ConversionError::invalid_property("malformed channel"))
        );
    }

    #[test]
    fn channel_keys() {
        assert_eq!(channel_key("", "a.b"), "a/b");
        assert_eq!(channel_key("base.v1", "x"), "base/v1/x");
    }
}
