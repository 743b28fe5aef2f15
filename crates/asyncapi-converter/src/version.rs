//! Version gate and version stamp

use crate::error::{ConversionError, ConversionResult};
use crate::tree::{require, scalar_to_string, Mapping};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// AsyncAPI version every converted document is stamped with
pub const TARGET_VERSION: &str = "2.0.0";

static SUPPORTED_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1\.[0-2]\.0$").expect("version pattern compiles"));

/// Check whether a version string is one of the convertible 1.x versions
#[must_use]
pub fn is_supported_version(version: &str) -> bool {
    SUPPORTED_VERSION.is_match(version)
}

/// Verify the source `asyncapi` version
///
/// # Errors
/// - `InvalidProperty("asyncapi")` if the field is missing
/// - `AlreadyAtTargetVersion` if the document is already at [`TARGET_VERSION`]
/// - `UnsupportedVersion` for anything but 1.0.0, 1.1.0 and 1.2.0
pub fn verify_version(document: &Mapping) -> ConversionResult<()> {
    let version = scalar_to_string(require(document, "asyncapi")?);

    if version == TARGET_VERSION {
        return Err(ConversionError::AlreadyAtTargetVersion {
            version: TARGET_VERSION.to_string(),
        });
    }
    if is_supported_version(&version) {
        return Ok(());
    }
    Err(ConversionError::unsupported_version(version))
}

/// Overwrite `asyncapi` with [`TARGET_VERSION`]
pub fn stamp_version(document: &mut Mapping) {
    document.insert(
        "asyncapi".to_string(),
        Value::String(TARGET_VERSION.to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::into_document;
    use serde_json::json;

    fn doc(version: Value) -> Mapping {
        into_document(json!({ "asyncapi": version })).unwrap()
    }

    #[test]
    fn accepts_legacy_versions() {
        for version in ["1.0.0", "1.1.0", "1.2.0"] {
            assert_eq!(verify_version(&doc(json!(version))), Ok(()));
        }
    }

    #[test]
    fn rejects_target_version() {
        let err = verify_version(&doc(json!("2.0.0"))).unwrap_err();
        assert!(err.is_already_converted());
    }

    #[test]
    fn rejects_unknown_versions() {
        for version in ["3.0.0", "1.3.0", "1.0.1", "1.0.0-rc1", " 1.0.0", "1x0.0", ""] {
            let err = verify_version(&doc(json!(version))).unwrap_err();
            assert_eq!(err, ConversionError::unsupported_version(version));
        }
    }

    #[test]
    fn non_string_version_is_stringified() {
        let err = verify_version(&doc(json!(1.0))).unwrap_err();
        assert_eq!(err, ConversionError::unsupported_version("1.0"));
    }

    #[test]
    fn missing_version() {
        let document = into_document(json!({"info": {}})).unwrap();
        assert_eq!(
            verify_version(&document),
            Err(ConversionError::invalid_property("asyncapi"))
        );
    }

    #[test]
    fn stamp_overwrites() {
        let mut document = doc(json!("1.0.0"));
        stamp_version(&mut document);
        assert_eq!(document["asyncapi"], TARGET_VERSION);
    }
}
