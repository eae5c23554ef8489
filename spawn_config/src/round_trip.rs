use spawn_rules::{FieldCodec, SpawnRule};
use tracing::error;

use crate::codec_config::{CodecConfigError, SpawnCodecConfig};
use crate::store::{ConfigStore, StoreKey};
use crate::world::{GroupingMode, WorldProperties};

/// How a rule came out of [`SpawnListConfig::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The stored record (or the freshly inserted default) decoded cleanly.
    Decoded,
    /// The stored record was malformed and has been overwritten with defaults.
    Repaired,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub rule: SpawnRule,
    pub status: LoadStatus,
}

/// Reconciles compiled-in rule defaults with the records kept in a config store.
#[derive(Debug, Clone)]
pub struct SpawnListConfig {
    codec: FieldCodec,
    root_category: String,
}

impl Default for SpawnListConfig {
    fn default() -> Self {
        Self::new(FieldCodec::default(), SpawnCodecConfig::default().root_category)
    }
}

impl SpawnListConfig {
    pub fn new(codec: FieldCodec, root_category: impl Into<String>) -> Self {
        Self {
            codec,
            root_category: root_category.into(),
        }
    }

    pub fn from_config(config: &SpawnCodecConfig) -> Result<Self, CodecConfigError> {
        Ok(Self::new(config.field_codec()?, config.root_category.clone()))
    }

    pub fn codec(&self) -> &FieldCodec {
        &self.codec
    }

    pub fn root_category(&self) -> &str {
        &self.root_category
    }

    /// Attach the record format description to the root category.
    pub fn setup_category<S: ConfigStore + ?Sized>(&self, store: &mut S) {
        store.set_category_comment(&self.root_category, &self.codec.format_comment());
    }

    /// Store key for `rule` under the world's grouping mode.
    pub fn property_key(&self, rule: &SpawnRule, world: &WorldProperties) -> StoreKey {
        let (group, item) = match world.grouping_mode() {
            GroupingMode::ByBiome => (rule.group_id(), rule.creature()),
            GroupingMode::ByCreature => (rule.creature(), rule.group_id()),
        };
        StoreKey::new(&format!("{}.{}", self.root_category, group), item)
    }

    /// Read `rule`'s record, using `rule` itself as the default, and return the
    /// decoded rule. Malformed records are logged and replaced on the spot.
    pub fn load_or_repair<S: ConfigStore + ?Sized>(
        &self,
        store: &mut S,
        rule: &SpawnRule,
        world: &WorldProperties,
    ) -> SpawnRule {
        self.load(store, rule, world).rule
    }

    pub fn load<S: ConfigStore + ?Sized>(
        &self,
        store: &mut S,
        rule: &SpawnRule,
        world: &WorldProperties,
    ) -> LoadOutcome {
        let default_text = self.codec.encode(rule);
        let key = self.addressed_key(store, rule, world);
        let stored = store.get_or_insert(&key, &default_text);

        match self.codec.decode(&stored, rule) {
            Ok(decoded) => LoadOutcome {
                rule: decoded,
                status: LoadStatus::Decoded,
            },
            Err(err) => {
                error!(
                    target: "spawn_rules::config",
                    creature = rule.creature(),
                    group = rule.group_id(),
                    key = %key,
                    pack_size = rule.pack_size(),
                    weight = rule.weight(),
                    error = %err,
                    "record.repaired=defaults"
                );
                store.set(&key, &default_text);
                // Optional segments are not carried over into the repaired rule.
                LoadOutcome {
                    rule: rule.without_optional(),
                    status: LoadStatus::Repaired,
                }
            }
        }
    }

    /// Write the rule's scalar fields back, replacing whatever is stored.
    pub fn save<S: ConfigStore + ?Sized>(
        &self,
        store: &mut S,
        rule: &SpawnRule,
        world: &WorldProperties,
    ) {
        let scalars = self.codec.encode_scalars(rule);
        let key = self.addressed_key(store, rule, world);
        store.set(&key, &scalars);
    }

    fn addressed_key<S: ConfigStore + ?Sized>(
        &self,
        store: &mut S,
        rule: &SpawnRule,
        world: &WorldProperties,
    ) -> StoreKey {
        let key = self.property_key(rule, world);
        store.set_category_comment(key.category(), &self.codec.format_comment());
        key
    }
}

#[cfg(test)]
mod tests {
    use spawn_rules::SpawnTuning;

    use super::*;
    use crate::store::MemoryConfigStore;

    fn zombie() -> SpawnRule {
        SpawnRule::new(
            "Zombie",
            "Forest",
            SpawnTuning::new(10, 4, 1, 3),
            "{spawn:minlightlevel=4}",
        )
        .unwrap()
    }

    fn by_biome() -> WorldProperties {
        WorldProperties {
            sort_creature_by_biome: true,
        }
    }

    #[test]
    fn missing_record_is_initialized_from_defaults() {
        let config = SpawnListConfig::default();
        let mut store = MemoryConfigStore::new();
        let outcome = config.load(&mut store, &zombie(), &by_biome());

        assert_eq!(outcome.status, LoadStatus::Decoded);
        assert_eq!(outcome.rule.tuning(), zombie().tuning());
        assert_eq!(outcome.rule.optional_text(), "{spawn:minlightlevel=4}");

        let key = config.property_key(&zombie(), &by_biome());
        assert_eq!(store.get(&key), Some("10⟂4⟂1⟂3{spawn:minlightlevel=4}"));
    }

    #[test]
    fn stored_record_overrides_defaults() {
        let config = SpawnListConfig::default();
        let mut store = MemoryConfigStore::new();
        let key = config.property_key(&zombie(), &by_biome());
        store.set(&key, "25⟂2⟂0⟂5{spawn:sky}");

        let rule = config.load_or_repair(&mut store, &zombie(), &by_biome());
        assert_eq!(rule.tuning(), SpawnTuning::new(25, 2, 0, 5));
        assert!(rule.spawning().has_flag("sky"));
        assert_eq!(store.get(&key), Some("25⟂2⟂0⟂5{spawn:sky}"));
    }

    #[test]
    fn malformed_record_is_repaired() {
        let config = SpawnListConfig::default();
        let mut store = MemoryConfigStore::new();
        let key = config.property_key(&zombie(), &by_biome());
        store.set(&key, "10⟂4⟂1{spawn:minlightlevel=9}");

        let outcome = config.load(&mut store, &zombie(), &by_biome());
        assert_eq!(outcome.status, LoadStatus::Repaired);
        assert_eq!(outcome.rule, zombie());
        assert_eq!(outcome.rule.tuning(), zombie().tuning());
        assert_eq!(outcome.rule.optional_text(), "");
        assert_eq!(
            store.get(&key),
            Some(config.codec().encode(&zombie()).as_str())
        );
    }

    #[test]
    fn save_writes_scalars_only() {
        let config = SpawnListConfig::default();
        let mut store = MemoryConfigStore::new();
        let key = config.property_key(&zombie(), &by_biome());
        store.set(&key, "1⟂1⟂1⟂1{spawn:sky}");

        config.save(&mut store, &zombie(), &by_biome());
        assert_eq!(store.get(&key), Some("10⟂4⟂1⟂3"));
    }

    #[test]
    fn save_by_creature_creates_the_key_load_reads() {
        let config = SpawnListConfig::default();
        let world = WorldProperties {
            sort_creature_by_biome: false,
        };
        let mut store = MemoryConfigStore::new();
        let key = config.property_key(&zombie(), &world);
        assert_eq!(store.get(&key), None);

        config.save(&mut store, &zombie(), &world);
        assert_eq!(store.get(&key), Some("10⟂4⟂1⟂3"));
        assert_eq!(store.value_count(), 1);

        let outcome = config.load(&mut store, &zombie(), &world);
        assert_eq!(outcome.status, LoadStatus::Decoded);
        assert_eq!(outcome.rule.tuning(), zombie().tuning());
        assert_eq!(outcome.rule.optional_text(), "");
        assert_eq!(store.value_count(), 1);
        let category = store
            .category("CreatureSettings.SpawnListEntry.Zombie")
            .expect("save creates the creature category");
        assert_eq!(category.values.get("Forest").map(String::as_str), Some("10⟂4⟂1⟂3"));
    }

    #[test]
    fn invalid_delimiter_is_rejected_by_from_config() {
        let codec_config = SpawnCodecConfig {
            delimiter: '-',
            ..SpawnCodecConfig::default()
        };
        let err = SpawnListConfig::from_config(&codec_config).unwrap_err();
        assert!(matches!(err, CodecConfigError::InvalidDelimiter('-')));
    }

    #[test]
    fn root_category_comes_from_config() {
        let codec_config = SpawnCodecConfig {
            root_category: "Spawns".to_string(),
            ..SpawnCodecConfig::default()
        };
        let config = SpawnListConfig::from_config(&codec_config).unwrap();
        assert_eq!(config.root_category(), "Spawns");
        assert_eq!(config.property_key(&zombie(), &by_biome()).category(), "spawns.forest");
    }

    #[test]
    fn addressing_follows_grouping_mode() {
        let config = SpawnListConfig::default();
        let biome_key = config.property_key(&zombie(), &by_biome());
        assert_eq!(biome_key.category(), "creaturesettings.spawnlistentry.forest");
        assert_eq!(biome_key.name(), "Zombie");

        let creature_key = config.property_key(
            &zombie(),
            &WorldProperties {
                sort_creature_by_biome: false,
            },
        );
        assert_eq!(creature_key.category(), "creaturesettings.spawnlistentry.zombie");
        assert_eq!(creature_key.name(), "Forest");
    }

    #[test]
    fn setup_and_load_comment_categories() {
        let config = SpawnListConfig::default();
        let mut store = MemoryConfigStore::new();
        config.setup_category(&mut store);
        config.load(&mut store, &zombie(), &by_biome());

        let expected = config.codec().format_comment();
        for name in [
            "CreatureSettings.SpawnListEntry",
            "CreatureSettings.SpawnListEntry.Forest",
        ] {
            let category = store.category(name).expect("category created");
            assert_eq!(category.comment.as_deref(), Some(expected.as_str()));
        }
    }
}
