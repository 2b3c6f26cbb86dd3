//! The tile factory capability and the stock tile object.

use crate::registry::{TileRegistry, TileType};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Translates map characters into tile objects.
///
/// A factory first decides whether a character is valid at all, then turns a
/// valid character into zero or more objects that are stacked on the same
/// cell (for example a floor tile with a robot marker on top). Returning
/// `None` from [`resolve`](Self::resolve) is treated as a broken factory and
/// fails the build.
pub trait TileFactory {
    type Tile;

    fn is_valid_tile(&self, ch: char) -> bool;

    fn resolve(&self, ch: char) -> Option<Vec<Self::Tile>>;
}

impl<F: TileFactory + ?Sized> TileFactory for Box<F> {
    type Tile = F::Tile;

    fn is_valid_tile(&self, ch: char) -> bool {
        (**self).is_valid_tile(ch)
    }

    fn resolve(&self, ch: char) -> Option<Vec<Self::Tile>> {
        (**self).resolve(ch)
    }
}

/// Tile objects that have a placeholder used when no factory is configured.
pub trait DefaultTile {
    fn default_tile() -> Self;
}

/// A factory that accepts every character and yields one placeholder per cell.
#[derive(Debug)]
pub struct PlaceholderFactory<T>(PhantomData<fn() -> T>);

impl<T> PlaceholderFactory<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for PlaceholderFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DefaultTile> TileFactory for PlaceholderFactory<T> {
    type Tile = T;

    fn is_valid_tile(&self, _ch: char) -> bool {
        true
    }

    fn resolve(&self, _ch: char) -> Option<Vec<T>> {
        Some(vec![T::default_tile()])
    }
}

/// An engine-agnostic description of one object to place in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileObject {
    /// Display name, usually the registered resource name.
    pub name: String,

    /// The tile type, or `None` for the placeholder cube.
    pub tile_type: Option<TileType>,

    /// Orientation relative to the cell.
    pub rotation: Quat,

    /// Scale relative to a unit cube.
    pub scale: Vec3,
}

impl TileObject {
    /// Creates an object for `tile_type` named after its registered resource.
    pub fn from_registry(registry: &TileRegistry, tile_type: TileType) -> Self {
        Self {
            name: registry.resource(tile_type).to_string(),
            tile_type: Some(tile_type),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Returns the object rotated by `angle` radians about the vertical axis.
    pub fn rotated_y(mut self, angle: f32) -> Self {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.tile_type.is_none()
    }
}

impl DefaultTile for TileObject {
    /// A thin cube slightly smaller than a cell.
    fn default_tile() -> Self {
        Self {
            name: "Default Tile".to_string(),
            tile_type: None,
            rotation: Quat::IDENTITY,
            scale: Vec3::new(0.98, 0.1, 0.98),
        }
    }
}
