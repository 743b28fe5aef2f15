//! Error types for the converter
//!
//! Provides comprehensive error handling for:
//! - Missing or malformed document properties
//! - Documents whose top level is not a mapping
//! - Source versions outside the supported range
//! - Documents that were already converted
//!
//! `ConversionError` is the closed set of classified pipeline errors. Callers
//! branch on its variant (or the `is_*` helpers), never on message text.

use asyncapi_codec::CodecError;

/// Classified pipeline error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A required property is missing or has the wrong shape
    #[error("asyncapi: error invalid property {name}")]
    InvalidProperty {
        /// Offending property (or combined requirement)
        name: String,
    },

    /// Decoded top-level value is not a mapping
    #[error("asyncapi: unable to decode document")]
    InvalidDocument,

    /// Source `asyncapi` version is not 1.0.0, 1.1.0 or 1.2.0
    #[error("asyncapi: unsupported asyncapi version '{found}'")]
    UnsupportedVersion {
        /// Version string found in the document
        found: String,
    },

    /// Source document already declares the target version
    #[error("asyncapi: document is already at version '{version}'")]
    AlreadyAtTargetVersion {
        /// The target version
        version: String,
    },
}

impl ConversionError {
    /// Create invalid property error
    #[inline]
    pub fn invalid_property(name: impl Into<String>) -> Self {
        Self::InvalidProperty { name: name.into() }
    }

    /// Create unsupported version error
    #[inline]
    pub fn unsupported_version(found: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            found: found.into(),
        }
    }

    /// Check if a property was missing or malformed
    #[inline]
    #[must_use]
    pub fn is_invalid_property(&self) -> bool {
        matches!(self, Self::InvalidProperty { .. })
    }

    /// Check if the document itself had the wrong shape
    #[inline]
    #[must_use]
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, Self::InvalidDocument)
    }

    /// Check if the source version is unsupported
    #[inline]
    #[must_use]
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, Self::UnsupportedVersion { .. })
    }

    /// Check if the document was already at the target version
    #[inline]
    #[must_use]
    pub fn is_already_converted(&self) -> bool {
        matches!(self, Self::AlreadyAtTargetVersion { .. })
    }

    /// Name of the offending property, for `InvalidProperty`
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::InvalidProperty { name } => Some(name),
            _ => None,
        }
    }
}

/// Combined converter error
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Pipeline step rejected the document
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Decode, encode or stream failure
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl ConvertError {
    /// Classified pipeline error, if that is what failed
    #[must_use]
    pub fn conversion(&self) -> Option<&ConversionError> {
        match self {
            Self::Conversion(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        Self::Codec(CodecError::Io(err))
    }
}

/// Result type alias for pipeline steps
pub type ConversionResult<T> = Result<T, ConversionError>;
