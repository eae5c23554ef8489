//! Compiled-in or file-supplied default rules, as handed over by the host.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use spawn_rules::{SpawnRule, SpawnRuleError, SpawnTuning};
use thiserror::Error;

use crate::world::WorldProperties;

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultRule {
    pub creature: String,
    pub group: String,
    #[serde(flatten)]
    pub tuning: SpawnTuning,
    #[serde(default)]
    pub optional: String,
}

impl DefaultRule {
    pub fn to_rule(&self) -> Result<SpawnRule, SpawnRuleError> {
        SpawnRule::new(
            self.creature.as_str(),
            self.group.as_str(),
            self.tuning,
            self.optional.as_str(),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleManifest {
    pub world: WorldProperties,
    pub rules: Vec<DefaultRule>,
}

impl RuleManifest {
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Build every rule, stopping at the first invalid identity.
    pub fn build_rules(&self) -> Result<Vec<SpawnRule>, ManifestError> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .to_rule()
                    .map_err(|source| ManifestError::Rule { index, source })
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to parse rule manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read rule manifest from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("rule #{index} in manifest is invalid: {source}")]
    Rule {
        index: usize,
        #[source]
        source: SpawnRuleError,
    },
}
