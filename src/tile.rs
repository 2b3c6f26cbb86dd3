//! Editable tiles that remember their type across grid rebuilds.
//!
//! A [`TileBoard`] holds one [`Tile`] per cell. Each tile rebuilds its own
//! scene node only when its type changed, and a [`TileMemento`] carries the
//! per-cell types over when the board itself is regenerated from a map.

use crate::config::GridConfig;
use crate::factory::TileObject;
use crate::parser::CharGrid;
use crate::registry::{TileRegistry, TileType};
use crate::resolver::{GridCoord, GridLayout};
use crate::scene::{NodeId, SceneContainer};
use log::debug;
use std::collections::HashMap;

/// A single cell whose type can be changed after the grid is built.
#[derive(Clone, Debug)]
pub struct Tile {
    tile_type: TileType,
    dirty: bool,
    node: Option<NodeId>,
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Floor)
    }
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            dirty: true,
            node: None,
        }
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Changes the type, marking the tile dirty only if it differs.
    pub fn set_type(&mut self, tile_type: TileType) {
        if self.tile_type == tile_type {
            return;
        }
        self.tile_type = tile_type;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The scene node currently showing this tile.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Rebuilds the tile if its type changed since the last build.
    pub fn clean_up<S>(&mut self, registry: &TileRegistry, container: &mut S, position: glam::Vec3)
    where
        S: SceneContainer<Object = TileObject>,
    {
        if !self.dirty {
            return;
        }
        self.build(registry, container, position);
        self.dirty = false;
    }

    /// Replaces the tile's node with a fresh instance of its registered resource.
    pub fn build<S>(&mut self, registry: &TileRegistry, container: &mut S, position: glam::Vec3)
    where
        S: SceneContainer<Object = TileObject>,
    {
        if let Some(old) = self.node.take() {
            container.destroy(old);
        }
        let node = container.instantiate(TileObject::from_registry(registry, self.tile_type));
        let root = container.root();
        container.set_parent(node, root);
        container.set_local_position(node, position);
        self.node = Some(node);
    }
}

/// Per-cell tile types, keyed by coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileMemento {
    types: HashMap<GridCoord, TileType>,
}

impl TileMemento {
    pub fn get(&self, row: usize, col: usize) -> Option<TileType> {
        self.types.get(&(row, col)).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// A grid of editable tiles.
#[derive(Clone, Debug)]
pub struct TileBoard {
    layout: GridLayout,
    registry: TileRegistry,
    tiles: Vec<Tile>,
}

impl TileBoard {
    /// Creates a board from a parsed map: `#` becomes a wall, anything else floor.
    pub fn from_grid(grid: &CharGrid, registry: TileRegistry, config: &GridConfig) -> Self {
        let tiles = grid
            .iter()
            .map(|(_, _, ch)| match ch {
                '#' => Tile::new(TileType::Wall),
                _ => Tile::new(TileType::Floor),
            })
            .collect();
        Self {
            layout: GridLayout::new(grid.dimensions(), config),
            registry,
            tiles,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        let dims = self.layout.dimensions;
        (row < dims.rows && col < dims.columns).then(|| row * dims.columns + col)
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.get(self.index(row, col)?)
    }

    pub fn tile_mut(&mut self, row: usize, col: usize) -> Option<&mut Tile> {
        let idx = self.index(row, col)?;
        self.tiles.get_mut(idx)
    }

    /// Sets the type of one cell. Returns `false` if `(row, col)` is outside the board.
    pub fn set_type(&mut self, row: usize, col: usize, tile_type: TileType) -> bool {
        match self.tile_mut(row, col) {
            Some(tile) => {
                tile.set_type(tile_type);
                true
            }
            None => false,
        }
    }

    /// Rebuilds every dirty tile. Returns how many were rebuilt.
    pub fn clean_up<S>(&mut self, container: &mut S) -> usize
    where
        S: SceneContainer<Object = TileObject>,
    {
        let columns = self.layout.dimensions.columns;
        let mut rebuilt = 0;
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            if tile.is_dirty() {
                let position = self.layout.position(i / columns, i % columns);
                tile.clean_up(&self.registry, container, position);
                rebuilt += 1;
            }
        }
        debug!("Rebuilt {rebuilt} dirty tiles");
        rebuilt
    }

    /// Removes every tile's node from the container.
    pub fn tear_down<S>(&mut self, container: &mut S)
    where
        S: SceneContainer<Object = TileObject>,
    {
        for tile in &mut self.tiles {
            if let Some(node) = tile.node.take() {
                container.destroy(node);
            }
            tile.dirty = true;
        }
    }

    /// Snapshots the type of every cell.
    pub fn memento(&self) -> TileMemento {
        let columns = self.layout.dimensions.columns;
        let types = self
            .tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| ((i / columns, i % columns), tile.tile_type))
            .collect();
        TileMemento { types }
    }

    /// Applies saved types. Coordinates outside the board are ignored.
    pub fn restore(&mut self, memento: &TileMemento) {
        for (&(row, col), &tile_type) in &memento.types {
            self.set_type(row, col, tile_type);
        }
    }
}
