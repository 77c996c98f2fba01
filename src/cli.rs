use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use addonforge_builder::{
    entry_probabilities, load_tree, project, save_tree, to_pretty_json, FileStore, LootTable,
    TreeStore,
};
use addonforge_schema::{default_properties, SchemaKind, SchemaRegistry};
use addonforge_validator::{KindSelector, ValidationResult, Validator};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(author, version, about = "Build and validate add-on JSON from schema catalogs", long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check add-on JSON files
    Validate {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// auto, loot_table, entity, block, item, recipe or manifest
        #[arg(long, default_value = "auto")]
        kind: KindSelector,

        /// Print one JSON object per file instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the loot table projected from a builder tree
    Project {
        /// Tree JSON file; the default table is used when neither this nor --key is given
        #[arg(conflicts_with = "key")]
        tree: Option<PathBuf>,

        /// Load the tree from the store instead
        #[arg(long)]
        key: Option<String>,
    },
    /// List registry entries by group
    Schemas {
        /// Only this catalog
        #[arg(long)]
        kind: Option<SchemaKind>,
    },
    /// Print the default properties of a registry entry
    Defaults {
        /// Entry name, e.g. set_count or minecraft:health
        name: String,

        /// Catalog to search; needed when a name exists in several
        #[arg(long)]
        kind: Option<SchemaKind>,
    },
    /// Store a default loot table tree under KEY
    New {
        /// Store key
        key: String,

        /// Replace an existing tree
        #[arg(long)]
        force: bool,
    },
    /// Write the default configuration file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run one command; `Ok(false)` means the command completed but reported failures.
pub fn run(cli: &Cli, config: &AppConfig, out: &mut dyn Write) -> Result<bool> {
    match &cli.command {
        Command::Validate { files, kind, json } => {
            let registry = config.registry()?;
            validate_files(files, *kind, *json, config, &registry, out)
        }
        Command::Project { tree, key } => {
            project_tree(tree.as_deref(), key.as_deref(), config, out)?;
            Ok(true)
        }
        Command::Schemas { kind } => {
            list_schemas(&config.registry()?, *kind, out)?;
            Ok(true)
        }
        Command::Defaults { name, kind } => {
            print_defaults(&config.registry()?, name, *kind, out)?;
            Ok(true)
        }
        Command::New { key, force } => {
            new_tree(key, *force, config, out)?;
            Ok(true)
        }
        Command::Init { force } => {
            if cli.config.exists() && !force {
                bail!(
                    "{} already exists; pass --force to replace it",
                    cli.config.display()
                );
            }
            AppConfig::default()
                .save_to_path(&cli.config)
                .with_context(|| format!("failed to write {}", cli.config.display()))?;
            writeln!(out, "wrote {}", cli.config.display())?;
            Ok(true)
        }
    }
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: String,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

fn validate_files(
    files: &[PathBuf],
    selector: KindSelector,
    json: bool,
    config: &AppConfig,
    registry: &SchemaRegistry,
    out: &mut dyn Write,
) -> Result<bool> {
    let validator = Validator::new(registry)
        .with_min_format_version(config.min_recommended_format_version.clone());
    let mut passed = true;
    for path in files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let result = validator.validate_str(&text, selector);
        let failed =
            !result.is_valid || (config.warnings_as_errors && !result.warnings.is_empty());
        passed &= !failed;

        if json {
            let report = FileReport {
                path: path.display().to_string(),
                result: &result,
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
            continue;
        }
        let kind = result
            .kind
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        if result.is_valid {
            writeln!(out, "{}: ok ({kind})", path.display())?;
        } else {
            writeln!(
                out,
                "{}: invalid ({kind}, {} errors, {} warnings)",
                path.display(),
                result.errors.len(),
                result.warnings.len()
            )?;
        }
        for error in &result.errors {
            writeln!(out, "  error: {error}")?;
        }
        for warning in &result.warnings {
            writeln!(out, "  warning: {warning}")?;
        }
    }
    info!(files = files.len(), passed, "validation finished");
    Ok(passed)
}

fn project_tree(
    tree: Option<&Path>,
    key: Option<&str>,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let table = match (tree, key) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<LootTable>(&text)
                .with_context(|| format!("failed to parse tree {}", path.display()))?
        }
        (None, Some(key)) => {
            let store = FileStore::new(&config.store_dir);
            load_tree(&store, key).unwrap_or_else(|| {
                warn!("No stored tree '{key}'. Projecting the default table");
                LootTable::with_format_version(config.format_version.clone())
            })
        }
        (None, None) => LootTable::with_format_version(config.format_version.clone()),
    };

    writeln!(out, "{}", to_pretty_json(&project(&table)))?;
    for (p, pool) in table.pools.iter().enumerate() {
        for (entry, chance) in pool.entries.iter().zip(entry_probabilities(pool)) {
            eprintln!("pool {p}: {} {} {chance:.2}%", entry.entry_type.as_str(), entry.name);
        }
    }
    Ok(())
}

fn list_schemas(
    registry: &SchemaRegistry,
    kind: Option<SchemaKind>,
    out: &mut dyn Write,
) -> Result<()> {
    let kinds = match kind {
        Some(kind) => vec![kind],
        None => SchemaKind::ALL.to_vec(),
    };
    for kind in kinds {
        writeln!(out, "{kind}")?;
        for group in registry.grouped(kind) {
            writeln!(out, "  {}", group.key)?;
            for entry in &group.entries {
                if entry.description.is_empty() {
                    writeln!(out, "    {}", entry.name)?;
                } else {
                    writeln!(out, "    {:<40} {}", entry.name, entry.description)?;
                }
            }
        }
    }
    Ok(())
}

fn print_defaults(
    registry: &SchemaRegistry,
    name: &str,
    kind: Option<SchemaKind>,
    out: &mut dyn Write,
) -> Result<()> {
    let entry = match kind {
        Some(kind) => registry.lookup(kind, name)?,
        None => registry
            .lookup_any(name)
            .with_context(|| format!("no registry entry named '{name}'"))?,
    };
    let properties: Map<String, Value> = default_properties(entry)
        .into_iter()
        .map(|(key, value)| (key, value.to_json()))
        .collect();
    writeln!(out, "{}", serde_json::to_string_pretty(&Value::Object(properties))?)?;
    Ok(())
}

fn new_tree(key: &str, force: bool, config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let mut store = FileStore::new(&config.store_dir);
    if !force && store.load_raw(key)?.is_some() {
        bail!("tree '{key}' already exists; pass --force to replace it");
    }
    let table = LootTable::with_format_version(config.format_version.clone());
    save_tree(&mut store, key, &table)?;
    writeln!(out, "created {}", store.path_for(key)?.display())?;
    Ok(())
}
