//! Optional RON override for every tuning resource.
//!
//! Any field left out of the file keeps its `Default`, so a config only needs the values it
//! changes.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use ron::Options;
use serde::{Deserialize, Serialize};

use crate::common::tunables::Tunables;
use crate::plugins::movement::tuning::MovementTuning;
use crate::plugins::player::PlayerTuning;
use crate::plugins::rope::tuning::RopeTuning;

pub const CONFIG_PATH: &str = "assets/config/controller.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub world: Tunables,
    pub rope: RopeTuning,
    pub movement: MovementTuning,
    pub player: PlayerTuning,
}

#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn parse_config(file: &str, contents: &str) -> Result<ControllerConfig, ConfigLoadError> {
    ron_options().from_str(contents).map_err(|e| ConfigLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })
}

pub fn load_config(path: &Path) -> Result<ControllerConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;
    parse_config(&file_name, &contents)
}

/// Load `path`, falling back to defaults when it is missing or broken.
pub fn load_or_default(path: &Path) -> ControllerConfig {
    if !path.exists() {
        info!("No controller config at {}, using defaults", path.display());
        return ControllerConfig::default();
    }

    match load_config(path) {
        Ok(config) => {
            info!("Loaded controller config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            ControllerConfig::default()
        }
    }
}
