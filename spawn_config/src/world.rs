use serde::{Deserialize, Serialize};

/// Per-world settings consulted when addressing spawn records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldProperties {
    /// Organize the config file by biome group (listing creatures) instead of
    /// by creature (listing biome groups).
    pub sort_creature_by_biome: bool,
}

impl Default for WorldProperties {
    fn default() -> Self {
        Self {
            sort_creature_by_biome: true,
        }
    }
}

impl WorldProperties {
    pub fn grouping_mode(&self) -> GroupingMode {
        if self.sort_creature_by_biome {
            GroupingMode::ByBiome
        } else {
            GroupingMode::ByCreature
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    /// `<root>.<group id>` / `<creature>`
    ByBiome,
    /// `<root>.<creature>` / `<group id>`
    ByCreature,
}
