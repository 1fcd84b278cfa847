//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/arbor/arbor.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ARBOR_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{ArborError, ArborResult};
use crate::render::RenderStyle;

/// Named connector glyph sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    #[default]
    Unicode,
    Ascii,
}

impl StylePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            StylePreset::Unicode => "unicode",
            StylePreset::Ascii => "ascii",
        }
    }
}

impl From<StylePreset> for RenderStyle {
    fn from(preset: StylePreset) -> Self {
        match preset {
            StylePreset::Unicode => RenderStyle::unicode(),
            StylePreset::Ascii => RenderStyle::ascii(),
        }
    }
}

/// Traversal order used by `walk`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    #[default]
    Pre,
    Post,
    In,
    Bfs,
}

impl TraversalOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalOrder::Pre => "pre",
            TraversalOrder::Post => "post",
            TraversalOrder::In => "in",
            TraversalOrder::Bfs => "bfs",
        }
    }
}

/// Unified configuration for arbor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Connector glyphs for `render`
    pub style: StylePreset,
    /// Default order for `walk`
    pub order: TraversalOrder,
    /// Columns a tab counts for when reading outlines
    pub tab_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: StylePreset::default(),
            order: TraversalOrder::default(),
            tab_width: 4,
        }
    }
}

/// Get the XDG config directory for arbor.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "arbor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("arbor.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> ArborResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("style", defaults.style.as_str())
            .map_err(config_err)?
            .set_default("order", defaults.order.as_str())
            .map_err(config_err)?
            .set_default("tab_width", defaults.tab_width as i64)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                builder = builder.add_source(
                    File::from(global_path)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ArborError::FileNotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("ARBOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;

        if settings.tab_width == 0 {
            return Err(ArborError::Config {
                message: "tab_width must be at least 1".into(),
            });
        }
        Ok(settings)
    }

    pub fn render_style(&self) -> RenderStyle {
        self.style.into()
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> ArborResult<String> {
        toml::to_string_pretty(self).map_err(|e| ArborError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn config_err(e: ConfigError) -> ArborError {
    ArborError::Config {
        message: e.to_string(),
    }
}
