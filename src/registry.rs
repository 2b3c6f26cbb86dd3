//! Tile types and the registry that maps them to scene resources.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The kinds of tile a grid can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Floor,
    Wall,
    Exit,
    Robot,
}

impl TileType {
    pub const ALL: [TileType; 4] = [
        TileType::Floor,
        TileType::Wall,
        TileType::Exit,
        TileType::Robot,
    ];
}

/// Resource names for every [`TileType`].
///
/// The registry is built once by whoever owns the grid and handed to the code
/// that instantiates tiles. Construction fails if any tile type is left
/// without a resource, so a missing entry shows up before anything is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileRegistry {
    resources: HashMap<TileType, String>,
}

impl TileRegistry {
    /// Builds a registry, checking that every tile type has a resource.
    pub fn new(resources: HashMap<TileType, String>) -> Result<Self, GridError> {
        if let Some(missing) = TileType::ALL
            .into_iter()
            .find(|t| !resources.contains_key(t))
        {
            return Err(GridError::MissingResource(missing));
        }
        Ok(Self { resources })
    }

    /// The stock resource names.
    pub fn standard() -> Self {
        Self {
            resources: standard_resources(),
        }
    }

    /// Returns the resource registered for `tile_type`.
    pub fn resource(&self, tile_type: TileType) -> &str {
        // `new` guarantees every tile type is present.
        self.resources
            .get(&tile_type)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_resources() -> HashMap<TileType, String> {
    HashMap::from([
        (TileType::Floor, "Floor Tile".to_string()),
        (TileType::Wall, "Wall Tile".to_string()),
        (TileType::Exit, "Exit Tile".to_string()),
        (TileType::Robot, "Robot Tile".to_string()),
    ])
}
