//! Conversion pipeline
//!
//! Runs the steps below over one document tree, in order, and stops at the
//! first error:
//!
//! ```text
//! decode → verify version → assign id → stamp version → servers
//!        → derive channels → alter channels → components → cleanup → encode
//! ```

use crate::channels::{alter_channels, derive_channels};
use crate::cleanup::cleanup;
use crate::components::update_components;
use crate::config::ConverterConfig;
use crate::error::{ConversionResult, ConvertError};
use crate::identity::assign_id;
use crate::servers::update_servers;
use crate::stage::Stage;
use crate::tree::{into_document, Mapping};
use crate::version::{stamp_version, verify_version, TARGET_VERSION};
use asyncapi_codec::{decoder_for, encoder_for, Decoder, Encoder, OutputFormat};
use serde_json::Value;
use std::fmt;
use std::io::{Read, Write};

/// Mutable state of a single conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionContext {
    /// Document being converted
    pub document: Mapping,
    /// Caller-supplied id
    pub id_override: Option<String>,
    /// Encoding chosen for the result
    pub output: OutputFormat,
}

impl ConversionContext {
    /// Start a conversion from a decoded tree
    ///
    /// # Errors
    /// `InvalidDocument` if the tree's top level is not a mapping.
    pub fn new(tree: Value, config: &ConverterConfig) -> ConversionResult<Self> {
        Ok(Self {
            document: into_document(tree)?,
            id_override: config.id.clone(),
            output: config.output,
        })
    }
}

type Step = fn(&mut ConversionContext) -> ConversionResult<()>;

/// Tree-level steps between decoding and encoding
fn steps() -> [(Stage, Step); 8] {
    [
        (Stage::VersionVerified, |ctx: &mut ConversionContext| verify_version(&ctx.document)),
        (Stage::IdAssigned, |ctx: &mut ConversionContext| {
            assign_id(&mut ctx.document, ctx.id_override.as_deref())
        }),
        (Stage::VersionStamped, |ctx: &mut ConversionContext| {
            stamp_version(&mut ctx.document);
            Ok(())
        }),
        (Stage::ServersUpdated, |ctx: &mut ConversionContext| update_servers(&mut ctx.document)),
        (Stage::ChannelsCreated, |ctx: &mut ConversionContext| derive_channels(&mut ctx.document)),
        (Stage::ChannelsAltered, |ctx: &mut ConversionContext| alter_channels(&mut ctx.document)),
        (Stage::ComponentsUpdated, |ctx: &mut ConversionContext| {
            update_components(&mut ctx.document)
        }),
        (Stage::CleanedUp, |ctx: &mut ConversionContext| {
            cleanup(&mut ctx.document);
            Ok(())
        }),
    ]
}

/// AsyncAPI 1.x → 2.0.0 converter
///
/// Holds only configuration and stateless codecs, so one instance can serve
/// any number of conversions, including concurrent ones.
pub struct Converter {
    config: ConverterConfig,
    decoder: Box<dyn Decoder>,
    encoder: Box<dyn Encoder>,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .field("decoder", &self.decoder.format())
            .field("encoder", &self.encoder.format())
            .finish()
    }
}

impl Converter {
    /// Create converter with codecs chosen by the configuration
    #[must_use]
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            decoder: decoder_for(config.input),
            encoder: encoder_for(config.output),
            config,
        }
    }

    /// Create converter with caller-supplied codecs
    ///
    /// The configuration's formats are replaced by the codecs' own.
    #[must_use]
    pub fn with_codecs(
        mut config: ConverterConfig,
        decoder: impl Decoder + 'static,
        encoder: impl Encoder + 'static,
    ) -> Self {
        config.input = decoder.format();
        config.output = encoder.format();
        Self {
            config,
            decoder: Box::new(decoder),
            encoder: Box::new(encoder),
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert an encoded document
    ///
    /// Returns the encoded 2.0.0 document. Nothing is produced on failure.
    ///
    /// # Errors
    /// - `ConvertError::Codec` if decoding or encoding fails
    /// - `ConvertError::Conversion` if any pipeline step rejects the document
    pub fn convert(&self, input: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let tree = self.decoder.decode(input)?;
        let converted = self.convert_tree(tree)?;
        let output = self.encoder.encode(&converted)?;
        tracing::debug!(stage = %Stage::Encoded, bytes = output.len(), "pipeline stage completed");
        Ok(output)
    }

    /// Convert a document read from `reader`, writing the result to `writer`
    ///
    /// The writer is only touched once the whole conversion has succeeded.
    ///
    /// # Errors
    /// As [`Converter::convert`], plus IO errors on either stream.
    pub fn convert_stream<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<(), ConvertError> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        let output = self.convert(&input)?;
        writer.write_all(&output)?;
        writer.flush()?;
        Ok(())
    }

    /// Convert an already decoded tree
    ///
    /// # Errors
    /// `ConversionError` from the first failing step.
    pub fn convert_tree(&self, tree: Value) -> ConversionResult<Value> {
        let mut ctx = ConversionContext::new(tree, &self.config)?;
        tracing::debug!(stage = %Stage::Decoded, "pipeline stage completed");

        for (stage, step) in steps() {
            if let Err(e) = step(&mut ctx) {
                tracing::warn!(stage = %stage, "conversion failed: {}", e);
                return Err(e);
            }
            tracing::debug!(stage = %stage, "pipeline stage completed");
        }

        tracing::info!(
            output = %ctx.output,
            "converted document to asyncapi {}",
            TARGET_VERSION
        );
        Ok(Value::Object(ctx.document))
    }
}
