//! Grid configuration, loadable from TOML.
//!
//! ```toml
//! cell_size = 1.0
//! floor_height = 0.0
//! default_map = "1x1\n."
//!
//! [resources]
//! floor = "Floor Tile"
//! wall = "Wall Tile"
//! exit = "Exit Tile"
//! robot = "Robot Tile"
//! ```

use crate::error::{ConfigError, GridError};
use crate::registry::{TileRegistry, TileType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Map text used when a grid has no map source of its own.
pub const DEFAULT_MAP: &str = "1x1\n.";

/// Configuration for grid construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Distance between neighbouring cell centers. Default: 1.0.
    pub cell_size: f32,

    /// Height (y) at which every tile is placed. Default: 0.0.
    pub floor_height: f32,

    /// Map text used until a map source is assigned.
    pub default_map: String,

    /// Resource name per tile type, checked by [`GridConfig::registry`].
    pub resources: ResourceTable,
}

/// The `[resources]` table. A type left out of a table that is present in
/// the file fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTable {
    pub floor: Option<String>,
    pub wall: Option<String>,
    pub exit: Option<String>,
    pub robot: Option<String>,
}

impl Default for ResourceTable {
    fn default() -> Self {
        let registry = TileRegistry::standard();
        let name = |t: TileType| Some(registry.resource(t).to_string());
        Self {
            floor: name(TileType::Floor),
            wall: name(TileType::Wall),
            exit: name(TileType::Exit),
            robot: name(TileType::Robot),
        }
    }
}

impl ResourceTable {
    fn entries(&self) -> HashMap<TileType, String> {
        [
            (TileType::Floor, &self.floor),
            (TileType::Wall, &self.wall),
            (TileType::Exit, &self.exit),
            (TileType::Robot, &self.robot),
        ]
        .into_iter()
        .filter_map(|(t, name)| name.clone().map(|n| (t, n)))
        .collect()
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            floor_height: 0.0,
            default_map: DEFAULT_MAP.to_string(),
            resources: ResourceTable::default(),
        }
    }
}

impl GridConfig {
    /// Parses a config from TOML text and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the numeric settings and the resource table.
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GridError::InvalidArgument(format!(
                "cell_size must be a positive number but was {}",
                self.cell_size
            )));
        }
        if !self.floor_height.is_finite() {
            return Err(GridError::InvalidArgument(format!(
                "floor_height must be finite but was {}",
                self.floor_height
            )));
        }
        self.registry().map(|_| ())
    }

    /// Builds the tile registry described by `resources`.
    pub fn registry(&self) -> Result<TileRegistry, GridError> {
        TileRegistry::new(self.resources.entries())
    }
}
