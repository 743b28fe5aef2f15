//! Server block rewriting
//!
//! 1.x documents list servers as a sequence with a `scheme` field and a
//! document-wide `security` block. 2.0.0 keys servers by name, calls the
//! scheme `protocol` and carries security on each server.

use crate::error::{ConversionError, ConversionResult};
use crate::tree::{rename_key, Mapping};
use serde_json::Value;

/// Key of the first server in the keyed mapping
pub const DEFAULT_SERVER: &str = "default";

/// Key for the server at `index` in the 1.x sequence
#[must_use]
pub fn server_key(index: usize) -> String {
    if index == 0 {
        DEFAULT_SERVER.to_string()
    } else {
        format!("server{index}")
    }
}

/// Rewrite the `servers` sequence into the keyed 2.0.0 shape
///
/// A missing or non-sequence `servers` field is left untouched.
///
/// # Errors
/// `InvalidProperty("server")` if any entry is not a mapping. The document
/// is not modified in that case.
pub fn update_servers(document: &mut Mapping) -> ConversionResult<()> {
    let Some(Value::Array(servers)) = document.get("servers") else {
        return Ok(());
    };
    let security = document.get("security");

    let mut keyed = Mapping::new();
    for (index, item) in servers.iter().enumerate() {
        let mut server = item
            .as_object()
            .cloned()
            .ok_or_else(|| ConversionError::invalid_property("server"))?;

        rename_key(&mut server, "scheme", "protocol");
        if let Some(security) = security {
            server.insert("security".to_string(), security.clone());
        }
        rename_key(&mut server, "schemeVersion", "protocolVersion");

        keyed.insert(server_key(index), Value::Object(server));
    }

    tracing::debug!("remapped {} servers", keyed.len());
    document.insert("servers".to_string(), Value::Object(keyed));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::into_document;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn renames_and_keys_servers() {
        let mut document = into_document(json!({
            "servers": [
                {"url": "api.streetlights.smartylighting.com:{port}", "scheme": "mqtt", "schemeVersion": "3.1.1"},
                {"url": "test.mosquitto.org", "scheme": "mqtts"}
            ]
        }))
        .unwrap();

        update_servers(&mut document).unwrap();

        assert_eq!(
            Value::Object(document),
            json!({
                "servers": {
                    "default": {"url": "api.streetlights.smartylighting.com:{port}", "protocol": "mqtt", "protocolVersion": "3.1.1"},
                    "server1": {"url": "test.mosquitto.org", "protocol": "mqtts"}
                }
            })
        );
    }

    #[test]
    fn injects_security() {
        let mut document = into_document(json!({
            "security": [{"apiKey": []}],
            "servers": [{"url": "a", "scheme": "ws"}, {"url": "b", "scheme": "wss"}]
        }))
        .unwrap();

        update_servers(&mut document).unwrap();

        for key in ["default", "server1"] {
            assert_eq!(document["servers"][key]["security"], json!([{"apiKey": []}]));
        }
        assert_eq!(document["security"], json!([{"apiKey": []}]));
    }

    #[test]
    fn three_servers_with_security() {
        let mut document = into_document(json!({
            "servers": [
                {"url": "a", "scheme": "mqtt", "schemeVersion": "3.1.1"},
                {"url": "b", "scheme": "mqtts"},
                {"url": "c", "scheme": "ws"}
            ],
            "security": [{"apiKey": []}]
        }))
        .unwrap();

        update_servers(&mut document).unwrap();

        let security = json!([{"apiKey": []}]);
        assert_eq!(
            document["servers"],
            json!({
                "default": {"url": "a", "protocol": "mqtt", "protocolVersion": "3.1.1", "security": security},
                "server1": {"url": "b", "protocol": "mqtts", "security": security},
                "server2": {"url": "c", "protocol": "ws", "security": security}
            })
        );
        assert_eq!(
            document["servers"].as_object().unwrap().keys().collect::<Vec<_>>(),
            ["default", "server1", "server2"]
        );
    }

    #[test]
    fn missing_scheme_adds_no_protocol() {
        let mut document = into_document(json!({"servers": [{"url": "a"}]})).unwrap();
        update_servers(&mut document).unwrap();
        assert_eq!(document["servers"]["default"], json!({"url": "a"}));
    }

    #[test]
    fn absent_or_non_sequence_servers_untouched() {
        let mut document = into_document(json!({"info": {}})).unwrap();
        update_servers(&mut document).unwrap();
        assert!(!document.contains_key("servers"));

        let mut document = into_document(json!({"servers": {"prod": {"url": "a"}}})).unwrap();
        update_servers(&mut document).unwrap();
        assert_eq!(document["servers"], json!({"prod": {"url": "a"}}));
    }

    #[test]
    fn malformed_server_rejected() {
        let original = json!({"servers": [{"url": "a", "scheme": "ws"}, "b"]});
        let mut document = into_document(original.clone()).unwrap();

        let err = update_servers(&mut document).unwrap_err();
        assert_eq!(err, ConversionError::invalid_property("server"));
        assert_eq!(Value::Object(document), original);
    }

    #[test]
    fn server_keys() {
        assert_eq!(server_key(0), "default");
        assert_eq!(server_key(1), "server1");
        assert_eq!(server_key(12), "server12");
    }
}
