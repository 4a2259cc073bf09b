//! Engine configuration
//!
//! A small TOML-backed configuration for the engine's processing toggles.
//!
//! # Example Configuration
//!
//! ```toml
//! # engine.toml
//! include_imports = true
//! validate_declarations = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SqwrlResult;

/// Configuration for a rule engine session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Walk imported axioms as well as local ones
    pub include_imports: bool,
    /// Check the declaration-closure invariant after each ontology walk
    pub validate_declarations: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            include_imports: true,
            validate_declarations: false,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(input: &str) -> SqwrlResult<EngineConfig> {
        Ok(toml::from_str(input)?)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> SqwrlResult<EngineConfig> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
