use std::{
    fs,
    path::{Path, PathBuf},
};

use addonforge_schema::{registry_with_packs, SchemaRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "addonforge.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Written into newly created loot tables.
    pub format_version: String,
    /// Entity, block, item and recipe documents older than this get a warning.
    pub min_recommended_format_version: String,
    /// Extra JSON schema catalogs merged over the built-in one.
    pub schema_packs: Vec<PathBuf>,
    /// Directory holding persisted builder trees.
    pub store_dir: PathBuf,
    /// Fail `validate` on warnings too.
    pub warnings_as_errors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            format_version: addonforge_builder::FORMAT_VERSION.to_string(),
            min_recommended_format_version: addonforge_validator::DEFAULT_MIN_FORMAT_VERSION
                .to_string(),
            schema_packs: Vec::new(),
            store_dir: PathBuf::from(".addonforge"),
            warnings_as_errors: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    AppConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                AppConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Built-in registry plus every configured schema pack.
    ///
    /// Unlike the config file itself, a broken pack is fatal.
    pub fn registry(&self) -> Result<SchemaRegistry> {
        registry_with_packs(&self.schema_packs).with_context(|| {
            format!(
                "failed to load schema packs {:?}",
                self.schema_packs
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
            )
        })
    }
}
