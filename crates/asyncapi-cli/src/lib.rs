//! AsyncAPI Converter CLI
//!
//! Command-line front end for `asyncapi-converter`:
//! - Reads a 1.x document from a local path or an `http(s)` URL
//! - Converts it to 2.0.0
//! - Returns the JSON or YAML encoding for the caller to print
//!
//! ```text
//! asyncapi-converter <PATH> [--to-yaml] [--id <ID>] [--from <auto|json|yaml>]
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod source;

pub use source::{InputSource, SourceError};

use asyncapi_codec::{InputFormat, OutputFormat};
use asyncapi_converter::{ConvertError, Converter, ConverterConfig};
use clap::{Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;

/// Exit code for a document the converter rejected
pub const EXIT_CONVERSION: i32 = 1;

/// Exit code for unreadable input, codec and usage errors
pub const EXIT_INPUT: i32 = 2;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid arguments
    #[error("invalid arguments: {0}")]
    Usage(String),

    /// Input could not be read
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Conversion failed
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl CliError {
    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Convert(ConvertError::Conversion(_)) => EXIT_CONVERSION,
            Self::Usage(_) | Self::Source(_) | Self::Convert(_) => EXIT_INPUT,
        }
    }
}

/// Command-line definition
#[must_use]
pub fn app() -> Command {
    Command::new("asyncapi-converter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert AsyncAPI 1.x documents to AsyncAPI 2.0.0")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .required(true)
                .help("Local file or http(s) URL of the document to convert"),
        )
        .arg(
            Arg::new("to-yaml")
                .long("to-yaml")
                .action(ArgAction::SetTrue)
                .help("Write the converted document as YAML instead of JSON"),
        )
        .arg(
            Arg::new("id")
                .long("id")
                .value_name("ID")
                .help("Application id to use instead of deriving one from info.title"),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .value_parser(["auto", "json", "yaml"])
                .default_value("auto")
                .help("Input encoding"),
        )
}

/// Parsed command-line options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Path or URL of the input document
    pub path: String,
    /// Emit YAML instead of JSON
    pub to_yaml: bool,
    /// Id override
    pub id: Option<String>,
    /// Input encoding
    pub from: InputFormat,
}

impl Options {
    /// Extract options from parsed arguments
    ///
    /// # Errors
    /// `CliError::Usage` if the path is missing or the input format is unknown.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, CliError> {
        let path = matches
            .get_one::<String>("path")
            .cloned()
            .ok_or_else(|| CliError::Usage("missing PATH".to_string()))?;
        let from = match matches.get_one::<String>("from") {
            Some(raw) => raw.parse().map_err(CliError::Usage)?,
            None => InputFormat::Auto,
        };

        Ok(Self {
            path,
            to_yaml: matches.get_flag("to-yaml"),
            id: matches.get_one::<String>("id").cloned(),
            from,
        })
    }

    /// Output encoding selected by `--to-yaml`
    #[inline]
    #[must_use]
    pub fn output(&self) -> OutputFormat {
        if self.to_yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Json
        }
    }

    /// Converter configuration for these options
    #[must_use]
    pub fn config(&self) -> ConverterConfig {
        let config = ConverterConfig::new()
            .with_input(self.from)
            .with_output(self.output());
        match &self.id {
            Some(id) => config.with_id(id.clone()),
            None => config,
        }
    }
}

/// Read, convert and encode the document named by `options`
///
/// # Errors
/// `CliError` from reading, configuring or converting.
pub async fn run(options: &Options) -> Result<Vec<u8>, CliError> {
    let converter = Converter::new(options.config());
    let source = InputSource::parse(&options.path);
    tracing::debug!(source = %source, remote = source.is_remote(), "reading input");

    let input = source.read().await?;
    let output = converter.convert(&input)?;
    tracing::info!(source = %source, output = %options.output(), "conversion complete");
    Ok(output)
}
