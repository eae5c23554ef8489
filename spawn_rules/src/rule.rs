use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{IdentityField, SpawnRuleError};
use crate::optional::{parse_optional_settings, OptionalSettings, SpawnSettings};

/// Identity of a spawn rule: one creature within one biome or structure group.
///
/// Only one rule exists per key; a rule loaded later for the same key is
/// expected to supersede the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpawnRuleKey {
    creature: String,
    group_id: String,
}

impl SpawnRuleKey {
    pub fn new(
        creature: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Result<Self, SpawnRuleError> {
        let creature = creature.into();
        let group_id = group_id.into();
        if creature.trim().is_empty() {
            return Err(SpawnRuleError::InvalidIdentity {
                field: IdentityField::Creature,
            });
        }
        if group_id.trim().is_empty() {
            return Err(SpawnRuleError::InvalidIdentity {
                field: IdentityField::GroupId,
            });
        }
        Ok(Self { creature, group_id })
    }

    /// Registry name of the creature; also used as its display name in config keys.
    pub fn creature(&self) -> &str {
        &self.creature
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }
}

impl fmt::Display for SpawnRuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.creature, self.group_id)
    }
}

/// Scalar tuning carried by a rule.
///
/// Values are not range checked here; the selection host decides what a
/// negative weight or an inverted chunk range means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnTuning {
    pub weight: i32,
    pub pack_size: i32,
    pub min_chunk_pack: i32,
    pub max_chunk_pack: i32,
}

impl SpawnTuning {
    pub fn new(weight: i32, pack_size: i32, min_chunk_pack: i32, max_chunk_pack: i32) -> Self {
        Self {
            weight,
            pack_size,
            min_chunk_pack,
            max_chunk_pack,
        }
    }
}

/// A weighted association between a creature and a biome/structure group.
///
/// Equality and hashing only look at the [`SpawnRuleKey`]; two rules for the
/// same key with different tuning compare equal.
#[derive(Debug, Clone)]
pub struct SpawnRule {
    key: SpawnRuleKey,
    tuning: SpawnTuning,
    optional_text: String,
    settings: OptionalSettings,
}

impl SpawnRule {
    pub fn new(
        creature: impl Into<String>,
        group_id: impl Into<String>,
        tuning: SpawnTuning,
        optional_text: impl Into<String>,
    ) -> Result<Self, SpawnRuleError> {
        let key = SpawnRuleKey::new(creature, group_id)?;
        let optional_text = optional_text.into();
        // Anything else would be read back as part of the last scalar field.
        if !optional_text.is_empty() && !optional_text.starts_with('{') {
            return Err(SpawnRuleError::InvalidOptionalText {
                text: optional_text,
            });
        }
        Ok(Self::from_key(key, tuning, optional_text))
    }

    pub(crate) fn from_key(
        key: SpawnRuleKey,
        tuning: SpawnTuning,
        optional_text: impl Into<String>,
    ) -> Self {
        let optional_text = optional_text.into();
        let settings = parse_optional_settings(&optional_text);
        Self {
            key,
            tuning,
            optional_text,
            settings,
        }
    }

    pub fn key(&self) -> &SpawnRuleKey {
        &self.key
    }

    pub fn creature(&self) -> &str {
        self.key.creature()
    }

    pub fn group_id(&self) -> &str {
        self.key.group_id()
    }

    pub fn tuning(&self) -> SpawnTuning {
        self.tuning
    }

    pub fn weight(&self) -> i32 {
        self.tuning.weight
    }

    pub fn pack_size(&self) -> i32 {
        self.tuning.pack_size
    }

    pub fn min_chunk_pack(&self) -> i32 {
        self.tuning.min_chunk_pack
    }

    pub fn max_chunk_pack(&self) -> i32 {
        self.tuning.max_chunk_pack
    }

    /// Verbatim optional segments, including tags nothing here recognizes.
    pub fn optional_text(&self) -> &str {
        &self.optional_text
    }

    pub fn optional_settings(&self) -> &OptionalSettings {
        &self.settings
    }

    pub fn spawning(&self) -> &SpawnSettings {
        self.settings.spawning()
    }

    /// Same identity and optional text with replaced tuning.
    pub fn with_tuning(&self, tuning: SpawnTuning) -> Self {
        Self {
            key: self.key.clone(),
            tuning,
            optional_text: self.optional_text.clone(),
            settings: self.settings.clone(),
        }
    }

    /// Same identity and tuning with every optional segment dropped.
    pub fn without_optional(&self) -> Self {
        Self::from_key(self.key.clone(), self.tuning, "")
    }
}

impl PartialEq for SpawnRule {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SpawnRule {}

impl Hash for SpawnRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Borrow<SpawnRuleKey> for SpawnRule {
    fn borrow(&self) -> &SpawnRuleKey {
        &self.key
    }
}
