//! Render configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tokentree/tokentree.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `TOKENTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};

/// How trees are labelled when rendered as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Print the token kind, `<literal>` when absent
    pub show_kind: bool,
    /// Print tags other than the kind
    pub show_tags: bool,
    /// Print the quoted value of each token
    pub show_value: bool,
    /// Truncate values longer than this many characters (0 = unlimited)
    pub max_value_width: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            show_kind: true,
            show_tags: false,
            show_value: true,
            max_value_width: 40,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderSettings {
    pub show_kind: Option<bool>,
    pub show_tags: Option<bool>,
    pub show_value: Option<bool>,
    pub max_value_width: Option<usize>,
}

/// Get the XDG config directory for tokentree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tokentree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tokentree.toml"))
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawRenderSettings for manual merging.
fn load_raw_settings(path: &Path) -> TreeResult<RawRenderSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| TreeError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| TreeError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl RenderSettings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawRenderSettings) -> Self {
        Self {
            show_kind: overlay.show_kind.unwrap_or(self.show_kind),
            show_tags: overlay.show_tags.unwrap_or(self.show_tags),
            show_value: overlay.show_value.unwrap_or(self.show_value),
            max_value_width: overlay.max_value_width.unwrap_or(self.max_value_width),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    #[instrument(level = "debug")]
    pub fn load(path: Option<&Path>) -> TreeResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = path {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TOKENTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> TreeResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TOKENTREE").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("show_kind") {
            settings.show_kind = val;
        }
        if let Ok(val) = config.get_bool("show_tags") {
            settings.show_tags = val;
        }
        if let Ok(val) = config.get_bool("show_value") {
            settings.show_value = val;
        }
        if let Ok(val) = config.get::<usize>("max_value_width") {
            settings.max_value_width = val;
        }

        Ok(settings)
    }

    /// Serialise the effective settings.
    pub fn to_toml(&self) -> TreeResult<String> {
        toml::to_string_pretty(self).map_err(|e| TreeError::Config {
            message: e.to_string(),
        })
    }
}
