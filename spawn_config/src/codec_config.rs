//! Settings for the spawn record codec.
//!
//! Loaded from `spawn_codec_config.json` with support for an environment variable override.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use spawn_rules::{FieldCodec, FieldFallback, DEFAULT_DELIMITER};
use thiserror::Error;

pub const BUILTIN_CODEC_CONFIG: &str = include_str!("data/spawn_codec_config.json");

const CONFIG_PATH_ENV: &str = "SPAWN_CODEC_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpawnCodecConfig {
    pub delimiter: char,
    pub field_fallback: FieldFallback,
    /// Category path under which every spawn list entry is stored.
    pub root_category: String,
}

impl Default for SpawnCodecConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            field_fallback: FieldFallback::PackSize,
            root_category: "CreatureSettings.SpawnListEntry".to_string(),
        }
    }
}

impl SpawnCodecConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            Self::from_json_str(BUILTIN_CODEC_CONFIG).expect("builtin codec config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, CodecConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, CodecConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| CodecConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), CodecConfigError> {
        self.field_codec()?;
        if self.root_category.trim().is_empty() {
            return Err(CodecConfigError::EmptyRootCategory);
        }
        Ok(())
    }

    pub fn field_codec(&self) -> Result<FieldCodec, CodecConfigError> {
        FieldCodec::new(self.delimiter)
            .map(|codec| codec.with_fallback(self.field_fallback))
            .map_err(|_| CodecConfigError::InvalidDelimiter(self.delimiter))
    }
}

#[derive(Debug, Error)]
pub enum CodecConfigError {
    #[error("failed to parse codec config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read codec config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' cannot be used as a spawn record delimiter")]
    InvalidDelimiter(char),
    #[error("root category cannot be empty")]
    EmptyRootCategory,
}

/// Metadata about the codec configuration source.
#[derive(Debug, Clone)]
pub struct CodecConfigMetadata {
    path: Option<PathBuf>,
}

impl CodecConfigMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// `None` when the builtin config is in use.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// Load the codec configuration from `SPAWN_CODEC_CONFIG_PATH` or the default
/// path, falling back to the builtin config.
pub fn load_codec_config_from_env() -> (Arc<SpawnCodecConfig>, CodecConfigMetadata) {
    let override_path = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    let default_path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/data/spawn_codec_config.json");
    let path = override_path.unwrap_or(default_path);

    match SpawnCodecConfig::from_file(&path) {
        Ok(config) => {
            tracing::info!(
                target: "spawn_rules::config",
                path = %path.display(),
                delimiter = %config.delimiter,
                fallback = ?config.field_fallback,
                "codec_config.loaded=file"
            );
            return (Arc::new(config), CodecConfigMetadata::new(Some(path)));
        }
        Err(err) => {
            tracing::warn!(
                target: "spawn_rules::config",
                path = %path.display(),
                error = %err,
                "codec_config.load_failed"
            );
        }
    }

    let config = SpawnCodecConfig::builtin();
    tracing::info!(
        target: "spawn_rules::config",
        "codec_config.loaded=builtin"
    );
    (config, CodecConfigMetadata::new(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_matches_default() {
        let config = SpawnCodecConfig::builtin();
        assert_eq!(*config, SpawnCodecConfig::default());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = SpawnCodecConfig::from_json_str(r#"{ "field_fallback": "per_field" }"#)
            .expect("partial config parses");
        assert_eq!(config.delimiter, DEFAULT_DELIMITER);
        assert_eq!(config.field_fallback, FieldFallback::PerField);
        assert_eq!(config.field_codec().unwrap().fallback(), FieldFallback::PerField);
    }

    #[test]
    fn rejects_delimiters_that_break_records() {
        for bad in ["{", ":", "-", "7", " "] {
            let json = format!(r#"{{ "delimiter": "{bad}" }}"#);
            let err = SpawnCodecConfig::from_json_str(&json).unwrap_err();
            assert!(
                matches!(err, CodecConfigError::InvalidDelimiter(_)),
                "expected delimiter '{bad}' to be rejected, got {err}"
            );
        }
    }

    #[test]
    fn rejects_empty_root_category() {
        let err = SpawnCodecConfig::from_json_str(r#"{ "root_category": " " }"#).unwrap_err();
        assert!(matches!(err, CodecConfigError::EmptyRootCategory));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("does/not/exist.json");
        let err = SpawnCodecConfig::from_file(path).unwrap_err();
        assert!(matches!(err, CodecConfigError::Read { .. }));
    }
}
