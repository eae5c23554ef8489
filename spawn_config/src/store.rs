//! Hierarchical key/value config store seam.

use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Address of one property: a dotted category path plus a value key.
///
/// Category paths are case-insensitive and kept lowercase; value keys are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey {
    category: String,
    name: String,
}

impl StoreKey {
    pub fn new(category: &str, name: impl Into<String>) -> Self {
        Self {
            category: normalize_category(category),
            name: name.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

pub(crate) fn normalize_category(category: &str) -> String {
    category.to_lowercase()
}

/// Store operations the spawn list round trip relies on. The host provides
/// the implementation and serializes access to it.
pub trait ConfigStore {
    /// Current value at `key`, inserting `default` first when absent.
    fn get_or_insert(&mut self, key: &StoreKey, default: &str) -> String;

    fn get(&self, key: &StoreKey) -> Option<&str>;

    fn set(&mut self, key: &StoreKey, value: &str);

    fn set_category_comment(&mut self, category: &str, comment: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub values: BTreeMap<String, String>,
}

/// In-process [`ConfigStore`] persisted as pretty-printed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfigStore {
    categories: BTreeMap<String, ConfigCategory>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigStoreError> {
        let parsed: Self = serde_json::from_str(json)?;
        let mut store = Self::new();
        for (name, category) in parsed.categories {
            let entry = store
                .categories
                .entry(normalize_category(&name))
                .or_default();
            if category.comment.is_some() {
                entry.comment = category.comment;
            }
            entry.values.extend(category.values);
        }
        Ok(store)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigStoreError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigStoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigStoreError> {
        serde_json::to_string_pretty(self).map_err(ConfigStoreError::Encode)
    }

    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigStoreError> {
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|source| ConfigStoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn category(&self, category: &str) -> Option<&ConfigCategory> {
        self.categories.get(&normalize_category(category))
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &ConfigCategory)> {
        self.categories
            .iter()
            .map(|(name, category)| (name.as_str(), category))
    }

    /// Total number of stored values across all categories.
    pub fn value_count(&self) -> usize {
        self.categories
            .values()
            .map(|category| category.values.len())
            .sum()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get_or_insert(&mut self, key: &StoreKey, default: &str) -> String {
        self.categories
            .entry(key.category.clone())
            .or_default()
            .values
            .entry(key.name.clone())
            .or_insert_with(|| default.to_string())
            .clone()
    }

    fn get(&self, key: &StoreKey) -> Option<&str> {
        self.categories
            .get(&key.category)
            .and_then(|category| category.values.get(&key.name))
            .map(String::as_str)
    }

    fn set(&mut self, key: &StoreKey, value: &str) {
        self.categories
            .entry(key.category.clone())
            .or_default()
            .values
            .insert(key.name.clone(), value.to_string());
    }

    fn set_category_comment(&mut self, category: &str, comment: &str) {
        self.categories
            .entry(normalize_category(category))
            .or_default()
            .comment = Some(comment.to_string());
    }
}

#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("failed to parse config store: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to encode config store: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to read config store from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write config store to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
