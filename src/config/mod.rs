//! Configuration loading and management for the liquidation engine.
//!
//! This module loads a run configuration from YAML files: where the roster,
//! template and output live, the fixed remunerations, and the template
//! layout.
//!
//! # Example
//!
//! ```no_run
//! use liquidation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pe_liquidacion").unwrap();
//! println!("Output: {}", config.config().run().output_dir.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BlockLayout, EngineConfig, FontSpec, HeaderLayout, LayoutConfig, RemunerationConfig,
    RosterColumns, RunConfig,
};
