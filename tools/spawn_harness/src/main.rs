use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use spawn_config::{
    load_codec_config_from_env, ConfigStore, LoadStatus, MemoryConfigStore, RuleManifest,
    SpawnListConfig, WorldProperties,
};
use spawn_rules::OPTIONAL_SEGMENTS;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Reconcile a spawn list config store against default rules", long_about = None)]
struct Args {
    /// Path to the rule manifest JSON file
    #[arg(long, required_unless_present = "list_segments")]
    manifest: Option<PathBuf>,

    /// Config store JSON file; created when missing
    #[arg(long, required_unless_present = "list_segments")]
    store: Option<PathBuf>,

    /// Print the optional segment tags this build understands and exit
    #[arg(long)]
    list_segments: bool,

    /// Organize records by creature instead of by biome group (overrides the manifest)
    #[arg(long)]
    by_creature: bool,

    /// Commit the loaded scalar values back after loading
    #[arg(long)]
    save: bool,

    /// Report results without writing the store file
    #[arg(long)]
    dry_run: bool,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.list_segments {
        for spec in OPTIONAL_SEGMENTS {
            println!("{:<8} {}", spec.tag, spec.description);
        }
        return Ok(());
    }
    let (Some(manifest_path), Some(store_path)) = (args.manifest.as_deref(), args.store.as_deref())
    else {
        bail!("--manifest and --store are required");
    };

    let manifest = RuleManifest::from_file(manifest_path)
        .with_context(|| format!("Failed to load manifest at {}", manifest_path.display()))?;
    let defaults = manifest
        .build_rules()
        .with_context(|| "Manifest contains an invalid rule")?;
    let world = if args.by_creature {
        WorldProperties {
            sort_creature_by_biome: false,
        }
    } else {
        manifest.world
    };

    let (codec_config, metadata) = load_codec_config_from_env();
    let config = SpawnListConfig::from_config(&codec_config)
        .with_context(|| "Codec config cannot be used for spawn records")?;
    let mut store = open_store(store_path)?;

    info!(
        target: "spawn_rules::harness",
        manifest = %manifest_path.display(),
        store = %store_path.display(),
        codec_config = ?metadata.path(),
        delimiter = %config.codec().delimiter(),
        root_category = config.root_category(),
        rules = defaults.len(),
        "harness.start"
    );

    config.setup_category(&mut store);
    let mut repaired = 0usize;
    for default in &defaults {
        let outcome = config.load(&mut store, default, &world);
        if outcome.status == LoadStatus::Repaired {
            repaired += 1;
        }
        if args.save {
            config.save(&mut store, &outcome.rule, &world);
        }

        let key = config.property_key(&outcome.rule, &world);
        let stored = store.get(&key).unwrap_or_default();
        if args.json {
            let line = json!({
                "creature": outcome.rule.creature(),
                "group": outcome.rule.group_id(),
                "status": status_label(outcome.status),
                "key": key.to_string(),
                "weight": outcome.rule.weight(),
                "pack_size": outcome.rule.pack_size(),
                "min_chunk_pack": outcome.rule.min_chunk_pack(),
                "max_chunk_pack": outcome.rule.max_chunk_pack(),
                "optional": outcome.rule.optional_text(),
                "stored": stored,
            });
            println!("{line}");
        } else {
            println!(
                "{:<8} {} = {}",
                status_label(outcome.status),
                key,
                stored
            );
        }
    }

    if !args.json {
        for (name, category) in store.categories() {
            println!("{:>4} values in {}", category.values.len(), name);
        }
    }

    if args.dry_run {
        info!(target: "spawn_rules::harness", repaired, "harness.done=dry_run");
        return Ok(());
    }

    store
        .write_to_file(store_path)
        .with_context(|| format!("Failed to write store to {}", store_path.display()))?;
    info!(target: "spawn_rules::harness", repaired, "harness.done=written");
    Ok(())
}

fn open_store(path: &Path) -> Result<MemoryConfigStore> {
    if !path.exists() {
        return Ok(MemoryConfigStore::new());
    }
    MemoryConfigStore::from_file(path)
        .with_context(|| format!("Failed to load store at {}", path.display()))
}

fn status_label(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Decoded => "ok",
        LoadStatus::Repaired => "repaired",
    }
}
