//! Testing utilities for the AsyncAPI converter workspace
//!
//! Shared 1.x fixture documents, one per legacy channel shape, and the
//! 2.0.0 documents they convert to.

#![allow(missing_docs)]

use serde_json::{json, Value};

pub const STREETLIGHTS_TITLE: &str = "Streetlights API";
pub const STREETLIGHTS_ID: &str = "urn:streetlights.api";
pub const STREETLIGHTS_CHANNEL_MEASURED: &str =
    "smartylighting/streetlights/1/0/event/{streetlightId}/lighting/measured";
pub const STREETLIGHTS_CHANNEL_TURN_ON: &str =
    "smartylighting/streetlights/1/0/action/{streetlightId}/turn/on";

/// Convertible source versions
pub const LEGACY_VERSIONS: [&str; 3] = ["1.0.0", "1.1.0", "1.2.0"];

fn security() -> Value {
    json!([{"apiKey": []}])
}

fn streetlights_components() -> Value {
    json!({
        "messages": {
            "lightMeasured": {
                "summary": "Inform about environmental lighting conditions for a particular streetlight.",
                "headers": {"qos": {"$ref": "#/components/schemas/MQTTQoSHeader"}},
                "payload": {"$ref": "#/components/schemas/lightMeasuredPayload"}
            },
            "turnOnOff": {
                "summary": "Command a particular streetlight to turn the lights on or off.",
                "payload": {"$ref": "#/components/schemas/turnOnOffPayload"}
            }
        },
        "schemas": {
            "lightMeasuredPayload": {
                "type": "object",
                "properties": {"lumens": {"type": "integer", "minimum": 0}}
            },
            "turnOnOffPayload": {
                "type": "object",
                "properties": {"command": {"type": "string", "enum": ["on", "off"]}}
            },
            "MQTTQoSHeader": {"type": "integer", "enum": [0, 1, 2]}
        },
        "parameters": {
            "streetlightId": {
                "name": "streetlightId",
                "description": "The ID of the streetlight.",
                "schema": {"type": "string"}
            }
        },
        "securitySchemes": {
            "apiKey": {"type": "apiKey", "in": "user"}
        }
    })
}

/// Streetlights document using `baseTopic` and `topics`
pub fn streetlights(version: &str) -> Value {
    json!({
        "asyncapi": version,
        "info": {
            "title": STREETLIGHTS_TITLE,
            "version": "1.0.0",
            "description": "Remotely manage the city lights."
        },
        "servers": [
            {
                "url": "api.streetlights.smartylighting.com:{port}",
                "scheme": "mqtt",
                "schemeVersion": "3.1.1",
                "description": "Test broker",
                "variables": {"port": {"enum": ["1883", "8883"], "default": "1883"}}
            },
            {"url": "test.mosquitto.org", "scheme": "mqtt"}
        ],
        "security": security(),
        "baseTopic": "smartylighting.streetlights.1.0",
        "topics": {
            "event.{streetlightId}.lighting.measured": {
                "parameters": [{"$ref": "#/components/parameters/streetlightId"}],
                "publish": {"$ref": "#/components/messages/lightMeasured"}
            },
            "action.{streetlightId}.turn.on": {
                "parameters": [{"$ref": "#/components/parameters/streetlightId"}],
                "subscribe": {"$ref": "#/components/messages/turnOnOff"}
            }
        },
        "components": streetlights_components()
    })
}

/// [`streetlights`] after conversion with a derived id
pub fn streetlights_converted() -> Value {
    let mut components = streetlights_components();
    components["messages"]["lightMeasured"]["headers"] = json!({
        "type": "object",
        "properties": {"qos": {"$ref": "#/components/schemas/MQTTQoSHeader"}}
    });
    components["parameters"]["streetlightId"] = json!({
        "description": "The ID of the streetlight.",
        "schema": {"type": "string"}
    });

    json!({
        "asyncapi": "2.0.0",
        "info": {
            "title": STREETLIGHTS_TITLE,
            "version": "1.0.0",
            "description": "Remotely manage the city lights."
        },
        "servers": {
            "default": {
                "url": "api.streetlights.smartylighting.com:{port}",
                "protocol": "mqtt",
                "protocolVersion": "3.1.1",
                "description": "Test broker",
                "variables": {"port": {"enum": ["1883", "8883"], "default": "1883"}},
                "security": security()
            },
            "server1": {
                "url": "test.mosquitto.org",
                "protocol": "mqtt",
                "security": security()
            }
        },
        "components": components,
        "id": STREETLIGHTS_ID,
        "channels": {
            STREETLIGHTS_CHANNEL_MEASURED: {
                "parameters": {"streetlightId": {"$ref": "#/components/parameters/streetlightId"}},
                "publish": {"message": {"$ref": "#/components/messages/lightMeasured"}}
            },
            STREETLIGHTS_CHANNEL_TURN_ON: {
                "parameters": {"streetlightId": {"$ref": "#/components/parameters/streetlightId"}},
                "subscribe": {"message": {"$ref": "#/components/messages/turnOnOff"}}
            }
        }
    })
}

/// Gitter streaming document using `stream.read`/`stream.write`
pub fn gitter_streaming() -> Value {
    json!({
        "asyncapi": "1.2.0",
        "info": {"title": "Gitter Streaming API", "version": "1.0.0"},
        "servers": [
            {"url": "https://stream.gitter.im/v1/rooms/{roomId}/{resource}", "scheme": "https"}
        ],
        "stream": {
            "framing": {"type": "chunked", "delimiter": "\r\n"},
            "read": [
                {"$ref": "#/components/messages/chatMessage"},
                {"$ref": "#/components/messages/heartbeat"}
            ],
            "write": [{"$ref": "#/components/messages/ack"}]
        },
        "components": {
            "messages": {
                "chatMessage": {"summary": "A message represents an individual chat message."},
                "heartbeat": {"summary": "Its purpose is to keep the connection alive."},
                "ack": {"summary": "Acknowledges receipt."}
            }
        }
    })
}

/// Slack real-time document using `events.receive`/`events.send`
pub fn slack_rtm() -> Value {
    json!({
        "asyncapi": "1.1.0",
        "info": {"title": "Slack Real Time Messaging API", "version": "1.0.0"},
        "servers": [
            {"url": "https://slack.com/api/rtm.connect", "scheme": "https"}
        ],
        "events": {
            "receive": [
                {"$ref": "#/components/messages/hello"},
                {"$ref": "#/components/messages/message"}
            ],
            "send": [{"$ref": "#/components/messages/outgoingMessage"}]
        },
        "components": {
            "messages": {
                "hello": {"summary": "First event received upon connection."},
                "message": {
                    "summary": "A message was sent to a channel.",
                    "protocolInfo": {"ws": {"opcode": 1}}
                },
                "outgoingMessage": {"summary": "A message was sent to a channel."}
            }
        }
    })
}

/// Minimal document for each legacy shape, all describing the same channel
///
/// Each converts to [`single_channel_converted`].
pub fn single_channel_variants() -> Vec<Value> {
    let info = json!({"title": "Echo"});
    vec![
        json!({
            "asyncapi": "1.0.0",
            "info": info,
            "topics": {"/": {
                "subscribe": {"$ref": "#/components/messages/echo"}
            }}
        }),
        json!({
            "asyncapi": "1.1.0",
            "info": info,
            "stream": {"read": [{"$ref": "#/components/messages/echo"}]}
        }),
        json!({
            "asyncapi": "1.2.0",
            "info": info,
            "events": {"receive": [{"$ref": "#/components/messages/echo"}]}
        }),
    ]
}

/// Conversion result of every [`single_channel_variants`] entry
pub fn single_channel_converted() -> Value {
    json!({
        "asyncapi": "2.0.0",
        "info": {"title": "Echo"},
        "id": "urn:echo",
        "channels": {"/": {
            "subscribe": {"message": {"$ref": "#/components/messages/echo"}}
        }}
    })
}

/// Encode a fixture as JSON input bytes
pub fn to_json_bytes(document: &Value) -> Vec<u8> {
    serde_json::to_vec(document).unwrap()
}
