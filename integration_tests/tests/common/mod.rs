use std::path::PathBuf;
use std::sync::Once;

use spawn_config::{load_codec_config_from_env, SpawnListConfig};
use spawn_rules::{SpawnRule, SpawnTuning};

static INIT: Once = Once::new();

pub fn ensure_test_config() {
    INIT.call_once(|| {
        let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("test_codec_config.json");

        debug_assert!(
            config_path.exists(),
            "missing test codec config at {}",
            config_path.display()
        );

        std::env::set_var("SPAWN_CODEC_CONFIG_PATH", &config_path);
    });
}

#[allow(dead_code)]
pub fn spawn_list_config() -> SpawnListConfig {
    ensure_test_config();
    let (config, metadata) = load_codec_config_from_env();
    assert!(metadata.path().is_some(), "fixture config should be used");
    SpawnListConfig::from_config(&config).expect("fixture codec config is valid")
}

#[allow(dead_code)]
pub fn rule(creature: &str, group: &str, tuning: (i32, i32, i32, i32), optional: &str) -> SpawnRule {
    let (weight, pack_size, min_chunk_pack, max_chunk_pack) = tuning;
    SpawnRule::new(
        creature,
        group,
        SpawnTuning::new(weight, pack_size, min_chunk_pack, max_chunk_pack),
        optional,
    )
    .expect("test rule identity is valid")
}
