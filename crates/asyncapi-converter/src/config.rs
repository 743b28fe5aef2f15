//! Converter configuration

use asyncapi_codec::{InputFormat, OutputFormat};
use serde::{Deserialize, Serialize};

/// Converter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Application id written to the document instead of deriving one
    pub id: Option<String>,
    /// How input bytes are decoded
    pub input: InputFormat,
    /// How the converted document is encoded
    pub output: OutputFormat,
}

impl ConverterConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With id override
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// With input format
    #[inline]
    #[must_use]
    pub fn with_input(mut self, input: InputFormat) -> Self {
        self.input = input;
        self
    }

    /// With output format
    #[inline]
    #[must_use]
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}
