//! AsyncAPI Converter
//!
//! Migrates AsyncAPI documents from versions 1.0.0, 1.1.0 and 1.2.0 to
//! version 2.0.0. The pipeline:
//! - Refuses documents that are unsupported or already converted
//! - Assigns the document id and stamps the target version
//! - Keys servers by name and moves `scheme` to `protocol`
//! - Derives `channels` from `topics`, `stream` or `events`
//! - Names channel parameters and rewrites operations, messages and bindings
//! - Rewrites shared components and drops the superseded 1.x fields
//!
//! Every step fails closed with a classified [`ConversionError`].
//!
//! # Example
//!
//! ```rust
//! use asyncapi_converter::{Converter, ConverterConfig};
//!
//! let input = br##"{
//!     "asyncapi": "1.0.0",
//!     "info": {"title": "Not Example"},
//!     "topics": {"test": {"publish": {"$ref": "#/x"}}}
//! }"##;
//!
//! let converter = Converter::new(ConverterConfig::new());
//! let output = converter.convert(input).unwrap();
//! let tree: serde_json::Value = serde_json::from_slice(&output).unwrap();
//!
//! assert_eq!(tree["asyncapi"], "2.0.0");
//! assert_eq!(tree["id"], "urn:not.example");
//! assert!(tree.get("topics").is_none());
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod channels;
pub mod cleanup;
pub mod components;
pub mod config;
pub mod converter;
pub mod error;
pub mod identity;
pub mod message;
pub mod servers;
pub mod stage;
pub mod tree;
pub mod version;

// Re-exports for convenience
pub use asyncapi_codec::{CodecError, InputFormat, OutputFormat};
pub use channels::{LegacyShape, Operation};
pub use config::ConverterConfig;
pub use converter::{ConversionContext, Converter};
pub use error::{ConversionError, ConversionResult, ConvertError};
pub use stage::Stage;
pub use version::TARGET_VERSION;

/// Convert an encoded 1.x document to 2.0.0
///
/// Input is decoded as JSON with a YAML fallback.
///
/// # Errors
/// See [`Converter::convert`].
pub fn convert(
    input: &[u8],
    output: OutputFormat,
    id: Option<&str>,
) -> Result<Vec<u8>, ConvertError> {
    let mut config = ConverterConfig::new().with_output(output);
    config.id = id.map(str::to_string);
    Converter::new(config).convert(input)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the converter
    pub use crate::{
        ConversionError, ConvertError, Converter, ConverterConfig, InputFormat, OutputFormat,
        TARGET_VERSION,
    };
}
