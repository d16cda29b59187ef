//! Configuration file loading

use anyhow::{Context, Result};
use farmrpc::DispatcherConfig;
use std::path::Path;

/// Load the configuration file, or the defaults when no path is given
pub fn load(path: Option<&Path>) -> Result<DispatcherConfig> {
    let Some(path) = path else {
        return Ok(DispatcherConfig::default());
    };

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    DispatcherConfig::from_json(&bytes)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}
