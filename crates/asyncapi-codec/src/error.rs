//! Error types for the codec layer
//!
//! Covers the three ways a collaborator can fail:
//! - Decode operations (bytes → tree)
//! - Encode operations (tree → bytes)
//! - Reading or writing the underlying stream

use crate::format::{InputFormat, OutputFormat};

/// Errors raised by decoders and encoders
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Input bytes are not a well-formed document in the requested format
    #[error("unable to decode {format} document: {message}")]
    Decode {
        /// Format the decoder attempted
        format: InputFormat,
        /// Underlying parser message
        message: String,
    },

    /// Tree could not be serialized
    #[error("unable to encode {format} document: {message}")]
    Encode {
        /// Target format
        format: OutputFormat,
        /// Underlying serializer message
        message: String,
    },

    /// IO error on the input or output stream
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Create decode error for format
    pub fn decode(format: InputFormat, message: impl Into<String>) -> Self {
        Self::Decode {
            format,
            message: message.into(),
        }
    }

    /// Create encode error for format
    pub fn encode(format: OutputFormat, message: impl Into<String>) -> Self {
        Self::Encode {
            format,
            message: message.into(),
        }
    }

    /// Check if the error came from decoding
    #[inline]
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let err = CodecError::decode(InputFormat::Json, "EOF while parsing");
        assert_eq!(
            err.to_string(),
            "unable to decode json document: EOF while parsing"
        );
        assert!(err.is_decode());
    }

    #[test]
    fn encode_error_display() {
        let err = CodecError::encode(OutputFormat::Yaml, "bad value");
        assert_eq!(err.to_string(), "unable to encode yaml document: bad value");
        assert!(!err.is_decode());
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: CodecError = io.into();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
