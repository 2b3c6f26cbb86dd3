//! A ready-made factory for the stock map alphabet.
//!
//! | Char | Objects                  |
//! |------|--------------------------|
//! | `.`  | floor                    |
//! | `>`  | floor, robot             |
//! | `v`  | floor, robot turned 90°  |
//! | `X`  | floor, exit              |
//! | `#`  | floor, wall              |

use crate::factory::{TileFactory, TileObject};
use crate::registry::{TileRegistry, TileType};
use std::f32::consts::FRAC_PI_2;

/// Characters understood by [`SampleTileFactory`].
pub const SAMPLE_ALPHABET: &str = ".>vX#";

/// Builds [`TileObject`]s named after the resources in a [`TileRegistry`].
#[derive(Clone, Debug, Default)]
pub struct SampleTileFactory {
    registry: TileRegistry,
}

impl SampleTileFactory {
    pub fn new(registry: TileRegistry) -> Self {
        Self { registry }
    }

    fn tile(&self, tile_type: TileType) -> TileObject {
        TileObject::from_registry(&self.registry, tile_type)
    }
}

impl TileFactory for SampleTileFactory {
    type Tile = TileObject;

    fn is_valid_tile(&self, ch: char) -> bool {
        SAMPLE_ALPHABET.contains(ch)
    }

    fn resolve(&self, ch: char) -> Option<Vec<TileObject>> {
        let floor = self.tile(TileType::Floor);
        let stacked = match ch {
            '.' => return Some(vec![floor]),
            // The robot marker faces +col by default; `v` turns it to face +row.
            '>' => self.tile(TileType::Robot),
            'v' => self.tile(TileType::Robot).rotated_y(FRAC_PI_2),
            'X' => self.tile(TileType::Exit),
            '#' => self.tile(TileType::Wall),
            _ => return None,
        };
        Some(vec![floor, stacked])
    }
}
