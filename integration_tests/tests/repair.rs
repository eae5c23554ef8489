mod common;

use std::fs;

use spawn_config::{ConfigStore, LoadStatus, MemoryConfigStore, WorldProperties};

#[test]
fn malformed_record_is_logged_overwritten_and_replaced() {
    let config = common::spawn_list_config();
    let world = WorldProperties::default();
    let zombie = common::rule("Zombie", "Forest", (10, 4, 1, 3), "{spawn:minlightlevel=4}");

    let mut store = MemoryConfigStore::new();
    let key = config.property_key(&zombie, &world);
    store.set(&key, "10⟂4⟂1");

    let outcome = config.load(&mut store, &zombie, &world);
    assert_eq!(outcome.status, LoadStatus::Repaired);
    assert_eq!(outcome.rule, zombie);
    assert_eq!(outcome.rule.tuning(), zombie.tuning());
    assert_eq!(outcome.rule.optional_text(), "");
    assert_eq!(
        store.get(&key),
        Some(config.codec().encode(&zombie).as_str())
    );

    let next = config.load(&mut store, &zombie, &world);
    assert_eq!(next.status, LoadStatus::Decoded);
    assert_eq!(next.rule.optional_text(), zombie.optional_text());
}

#[test]
fn repairs_survive_a_trip_through_disk() -> anyhow::Result<()> {
    let config = common::spawn_list_config();
    let world = WorldProperties::default();
    let wolf = common::rule("Wolf", "Taiga", (5, 8, 2, 8), "");

    let path = std::env::temp_dir().join(format!(
        "spawn_rules_repair_{}.json",
        std::process::id()
    ));
    let key = config.property_key(&wolf, &world);

    let mut store = MemoryConfigStore::new();
    store.set(&key, "garbage");
    store.write_to_file(&path)?;

    let mut store = MemoryConfigStore::from_file(&path)?;
    let outcome = config.load(&mut store, &wolf, &world);
    assert_eq!(outcome.status, LoadStatus::Repaired);
    store.write_to_file(&path)?;

    let reread = MemoryConfigStore::from_file(&path)?;
    assert_eq!(reread.get(&key), Some("5⟂8⟂2⟂8"));
    let category = reread
        .category(key.category())
        .expect("category persisted");
    assert_eq!(
        category.comment.as_deref(),
        Some(config.codec().format_comment().as_str())
    );

    fs::remove_file(&path)?;
    Ok(())
}
