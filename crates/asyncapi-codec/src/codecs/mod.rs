//! Document codecs for different serialization formats
//!
//! Provides conversion between bytes and the generic document tree:
//! - JSON via serde_json
//! - YAML via serde_yaml, with keys normalized to strings
//! - JSON with YAML fallback for inputs of unknown format

use crate::error::CodecError;
use crate::format::{InputFormat, OutputFormat};
use serde_json::Value;

mod json;
mod yaml;

pub use json::JsonCodec;
pub use yaml::YamlCodec;

/// Decoder trait for turning input bytes into a document tree
///
/// Implement this trait to plug a different byte source format into the converter.
pub trait Decoder: Send + Sync {
    /// Decode bytes into a tree
    fn decode(&self, input: &[u8]) -> Result<Value, CodecError>;

    /// Format this decoder reads
    fn format(&self) -> InputFormat;
}

/// Encoder trait for serializing a document tree
pub trait Encoder: Send + Sync {
    /// Encode a tree into bytes
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Format this encoder writes
    fn format(&self) -> OutputFormat;
}

/// JSON decoder that retries as YAML when the input is not JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackDecoder;

impl Decoder for FallbackDecoder {
    fn decode(&self, input: &[u8]) -> Result<Value, CodecError> {
        let json_err = match JsonCodec.decode(input) {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        tracing::debug!("input is not JSON, retrying as YAML: {}", json_err);

        YamlCodec.decode(input).map_err(|yaml_err| {
            CodecError::decode(
                InputFormat::Auto,
                format!("neither JSON ({json_err}) nor YAML ({yaml_err})"),
            )
        })
    }

    fn format(&self) -> InputFormat {
        InputFormat::Auto
    }
}

/// Decoder for the requested input format
#[must_use]
pub fn decoder_for(format: InputFormat) -> Box<dyn Decoder> {
    match format {
        InputFormat::Json => Box::new(JsonCodec),
        InputFormat::Yaml => Box::new(YamlCodec),
        InputFormat::Auto => Box::new(FallbackDecoder),
    }
}

/// Encoder for the requested output format
#[must_use]
pub fn encoder_for(format: OutputFormat) -> Box<dyn Encoder> {
    match format {
        OutputFormat::Json => Box::new(JsonCodec),
        OutputFormat::Yaml => Box::new(YamlCodec),
    }
}

/// Decode bytes with the decoder for `format`
pub fn decode(input: &[u8], format: InputFormat) -> Result<Value, CodecError> {
    decoder_for(format).decode(input)
}

/// Encode a tree with the encoder for `format`
pub fn encode(value: &Value, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    encoder_for(format).encode(value)
}

/// Reject inputs that contain nothing but whitespace
fn ensure_not_blank(input: &[u8], format: InputFormat) -> Result<(), CodecError> {
    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(CodecError::decode(format, "empty document"));
    }
    Ok(())
}
