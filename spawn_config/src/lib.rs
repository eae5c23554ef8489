//! Config store integration for spawn rules.
//!
//! [`SpawnListConfig`] reads each rule's persisted record from a
//! [`ConfigStore`], decodes it with the configured codec, and rewrites records
//! that no longer have the expected shape.

mod codec_config;
mod manifest;
mod round_trip;
mod store;
mod world;

pub use codec_config::{
    load_codec_config_from_env, CodecConfigError, CodecConfigMetadata, SpawnCodecConfig,
    BUILTIN_CODEC_CONFIG,
};
pub use manifest::{DefaultRule, ManifestError, RuleManifest};
pub use round_trip::{LoadOutcome, LoadStatus, SpawnListConfig};
pub use store::{ConfigCategory, ConfigStore, ConfigStoreError, MemoryConfigStore, StoreKey};
pub use world::{GroupingMode, WorldProperties};
