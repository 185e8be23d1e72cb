//! Bridge configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::BridgeError;

const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Unit of the absolute offsets found in a linter fix range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetEncoding {
    /// Byte offsets into the UTF-8 buffer text.
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-16 code unit indices (JavaScript string indices).
    #[serde(rename = "utf-16")]
    Utf16,
}

impl OffsetEncoding {
    /// Width of `ch` in this encoding.
    pub fn len_of(self, ch: char) -> usize {
        match self {
            OffsetEncoding::Utf8 => ch.len_utf8(),
            OffsetEncoding::Utf16 => ch.len_utf16(),
        }
    }

    /// Width of `text` in this encoding.
    pub fn len_of_str(self, text: &str) -> usize {
        match self {
            OffsetEncoding::Utf8 => text.len(),
            OffsetEncoding::Utf16 => text.encode_utf16().count(),
        }
    }
}

/// Configuration for the code action bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Linter executable, either a path or a name resolved through `PATH`.
    #[serde(default = "default_linter_bin")]
    pub linter_bin: String,

    /// Whether to offer the "disable rule" actions.
    #[serde(default = "default_enable_disable_comments")]
    pub enable_disable_comments: bool,

    /// Filetypes the bridge accepts.
    #[serde(default = "default_filetypes")]
    pub filetypes: Vec<String>,

    /// Unit of fix range offsets in the linter output.
    #[serde(default)]
    pub offset_encoding: OffsetEncoding,
}

fn default_linter_bin() -> String {
    "eslint".to_string()
}

fn default_enable_disable_comments() -> bool {
    true
}

fn default_filetypes() -> Vec<String> {
    [
        "javascript",
        "javascriptreact",
        "javascript.jsx",
        "typescript",
        "typescriptreact",
        "typescript.tsx",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl BridgeConfig {
    /// Config file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".lintbridge.jsonc", ".lintbridge.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            linter_bin: default_linter_bin(),
            enable_disable_comments: default_enable_disable_comments(),
            filetypes: default_filetypes(),
            offset_encoding: OffsetEncoding::default(),
        }
    }

    /// Looks for a config file directly inside `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file. Comments and trailing commas are accepted.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| BridgeError::config(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON(C) string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| BridgeError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(BridgeError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| BridgeError::config(format!("Invalid config: {}", e)))
    }

    /// Returns whether buffers of `filetype` are handled.
    pub fn supports_filetype(&self, filetype: &str) -> bool {
        self.filetypes.iter().any(|ft| ft == filetype)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_config_default() {
        let config = BridgeConfig::default();
        assert_eq!(config.linter_bin, "eslint");
        assert!(config.enable_disable_comments);
        assert_eq!(config.offset_encoding, OffsetEncoding::Utf8);
        assert!(config.supports_filetype("typescriptreact"));
        assert!(!config.supports_filetype("markdown"));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            // eslint_d is much faster for repeated runs
            "linterBin": "eslint_d",
            "enableDisableComments": false,
            "filetypes": ["vue"],
            "offsetEncoding": "utf-16",
        }"#;

        let config = BridgeConfig::from_json(json).unwrap();
        assert_eq!(config.linter_bin, "eslint_d");
        assert!(!config.enable_disable_comments);
        assert_eq!(config.filetypes, vec!["vue".to_string()]);
        assert_eq!(config.offset_encoding, OffsetEncoding::Utf16);
    }

    #[test]
    fn test_config_empty_document_uses_defaults() {
        let config = BridgeConfig::from_json("").unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[rstest]
    #[case::unknown_property(r#"{ "linterBinary": "eslint" }"#, "Config validation failed")]
    #[case::type_mismatch(r#"{ "enableDisableComments": "yes" }"#, "Config validation failed")]
    #[case::invalid_enum_value(r#"{ "offsetEncoding": "utf-32" }"#, "Config validation failed")]
    #[case::not_json(r#"{ "linterBin": "#, "Invalid JSON")]
    fn test_config_validation_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let err = BridgeConfig::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(BridgeConfig::discover(dir.path()), None);

        fs::write(dir.path().join(".lintbridge.json"), "{}").unwrap();
        fs::write(dir.path().join(".lintbridge.jsonc"), "{}").unwrap();

        let found = BridgeConfig::discover(dir.path()).unwrap();
        assert!(found.ends_with(".lintbridge.jsonc"));
    }

    #[test]
    fn test_offset_encoding_widths() {
        assert_eq!(OffsetEncoding::Utf8.len_of('あ'), 3);
        assert_eq!(OffsetEncoding::Utf16.len_of('あ'), 1);
        assert_eq!(OffsetEncoding::Utf16.len_of('🎉'), 2);
        assert_eq!(OffsetEncoding::Utf8.len_of_str("a🎉"), 5);
        assert_eq!(OffsetEncoding::Utf16.len_of_str("a🎉"), 3);
    }
}
