//! YAML codec
//!
//! Uses serde_yaml for parsing, then rebuilds the result as a
//! `serde_json::Value` so the rest of the converter sees one tree type.
//! YAML allows any node as a mapping key; keys are stringified on the way in.
//! `<<` merge keys are resolved before the conversion.

use super::{ensure_not_blank, Decoder, Encoder};
use crate::error::CodecError;
use crate::format::{InputFormat, OutputFormat};
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

/// YAML decoder and encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl YamlCodec {
    /// Create new YAML codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for YamlCodec {
    fn decode(&self, input: &[u8]) -> Result<Value, CodecError> {
        ensure_not_blank(input, InputFormat::Yaml)?;
        let mut yaml: YamlValue = serde_yaml::from_slice(input)
            .map_err(|e| CodecError::decode(InputFormat::Yaml, e.to_string()))?;
        yaml.apply_merge()
            .map_err(|e| CodecError::decode(InputFormat::Yaml, e.to_string()))?;
        yaml_to_tree(yaml)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Yaml
    }
}

impl Encoder for YamlCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| CodecError::encode(OutputFormat::Yaml, e.to_string()))
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Yaml
    }
}

/// Convert a YAML node into the document tree
fn yaml_to_tree(value: YamlValue) -> Result<Value, CodecError> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => Value::Number(number_to_tree(&n)?),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_tree)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_to_string(key)?, yaml_to_tree(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_tree(tagged.value)?,
    })
}

fn number_to_tree(number: &serde_yaml::Number) -> Result<Number, CodecError> {
    if let Some(u) = number.as_u64() {
        return Ok(u.into());
    }
    if let Some(i) = number.as_i64() {
        return Ok(i.into());
    }
    number
        .as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| {
            CodecError::decode(
                InputFormat::Yaml,
                format!("number {number} has no JSON representation"),
            )
        })
}

/// Stringify a YAML mapping key
fn key_to_string(key: YamlValue) -> Result<String, CodecError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        complex => {
            let tree = yaml_to_tree(complex)?;
            serde_json::to_string(&tree)
                .map_err(|e| CodecError::decode(InputFormat::Yaml, e.to_string()))
        }
    }
}
