//! JSON codec
//!
//! Uses serde_json with `preserve_order`, so keys are written back in the
//! order they were read.

use super::{ensure_not_blank, Decoder, Encoder};
use crate::error::CodecError;
use crate::format::{InputFormat, OutputFormat};
use serde_json::Value;

/// JSON decoder and encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create new JSON codec
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for JsonCodec {
    fn decode(&self, input: &[u8]) -> Result<Value, CodecError> {
        ensure_not_blank(input, InputFormat::Json)?;
        serde_json::from_slice(input)
            .map_err(|e| CodecError::decode(InputFormat::Json, e.to_string()))
    }

    fn format(&self) -> InputFormat {
        InputFormat::Json
    }
}

impl Encoder for JsonCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let mut out = serde_json::to_vec_pretty(value)
            .map_err(|e| CodecError::encode(OutputFormat::Json, e.to_string()))?;
        out.push(b'\n');
        Ok(out)
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}
