//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a liquidation
//! run configuration from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LiquidationError, LiquidationResult};

use super::types::{EngineConfig, LayoutConfig, RemunerationConfig, RunConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/pe_liquidacion/
/// ├── run.yaml           # Roster, template, output and cutoffs
/// ├── remuneration.yaml  # Legacy salary, bonuses, period basis
/// └── layout.yaml        # Template cells, font, block strides
/// ```
///
/// `run.yaml` is required. The other two fall back to their defaults when
/// absent. Relative paths in `run.yaml` are resolved against the directory.
///
/// # Example
///
/// ```no_run
/// use liquidation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pe_liquidacion")?;
/// println!("Roster: {}", loader.config().run().roster.display());
/// # Ok::<(), liquidation_engine::error::LiquidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `run.yaml` is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or an invalid cell (`ConfigParseError`)
    /// - The bonus rate is negative or a block stride is zero (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> LiquidationResult<Self> {
        let path = path.as_ref();

        let mut run = Self::load_yaml::<RunConfig>(&path.join("run.yaml"))?;
        run.roster = Self::resolve(path, &run.roster);
        run.template = Self::resolve(path, &run.template);
        run.output_dir = Self::resolve(path, &run.output_dir);

        let remuneration_path = path.join("remuneration.yaml");
        let remuneration = if remuneration_path.exists() {
            Self::load_yaml::<RemunerationConfig>(&remuneration_path)?
        } else {
            RemunerationConfig::default()
        };
        if remuneration.extraordinary_bonus_rate.is_sign_negative() {
            return Err(LiquidationError::ConfigParseError {
                path: remuneration_path.display().to_string(),
                message: "extraordinary_bonus_rate must not be negative".to_string(),
            });
        }

        let layout_path = path.join("layout.yaml");
        let layout = if layout_path.exists() {
            Self::load_yaml::<LayoutConfig>(&layout_path)?
        } else {
            LayoutConfig::default()
        };
        if layout.cts.row_stride == 0 || layout.gratificacion.row_stride == 0 {
            return Err(LiquidationError::ConfigParseError {
                path: layout_path.display().to_string(),
                message: "row_stride must be positive".to_string(),
            });
        }

        Ok(Self {
            config: EngineConfig::new(run, remuneration, layout),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LiquidationResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LiquidationError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LiquidationError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn resolve(base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
