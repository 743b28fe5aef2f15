//! AsyncAPI Codec
//!
//! The byte boundary of the converter. Turns raw input into a generic
//! document tree and the converted tree back into bytes.
//!
//! # Core Operations
//!
//! - **Decode**: JSON, YAML, or JSON with a YAML fallback into `serde_json::Value`
//! - **Encode**: `serde_json::Value` into JSON or YAML bytes
//!
//! # Architecture
//!
//! ```text
//! bytes → Decoder → Value → (converter pipeline) → Value → Encoder → bytes
//! ```
//!
//! YAML mappings may carry non-string keys (`1: foo`, `true: bar`). The YAML
//! decoder stringifies every key so the tree always has string-keyed mappings.
//!
//! # Example
//!
//! ```rust
//! use asyncapi_codec::{decode, encode, InputFormat, OutputFormat};
//!
//! let tree = decode(b"asyncapi: 1.2.0", InputFormat::Auto).unwrap();
//! assert_eq!(tree["asyncapi"], "1.2.0");
//!
//! let json = encode(&tree, OutputFormat::Json).unwrap();
//! assert!(String::from_utf8(json).unwrap().contains("\"asyncapi\""));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod codecs;
pub mod error;
pub mod format;

pub use codecs::{
    decode, decoder_for, encode, encoder_for, Decoder, Encoder, FallbackDecoder, JsonCodec,
    YamlCodec,
};
pub use error::CodecError;
pub use format::{InputFormat, OutputFormat};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the codec layer
    pub use crate::codecs::{Decoder, Encoder, FallbackDecoder, JsonCodec, YamlCodec};
    pub use crate::error::CodecError;
    pub use crate::format::{InputFormat, OutputFormat};
}
