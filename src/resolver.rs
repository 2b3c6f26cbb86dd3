//! Resolves a [`CharGrid`] into placed tile objects.
//!
//! The entry point is [`TileResolver`]. Configure it with a [`GridConfig`],
//! then call [`TileResolver::resolve`] with a parsed grid and an optional
//! [`TileFactory`]. The free functions [`resolve_grid`] and
//! [`resolve_placeholders`] use the default configuration.

use crate::config::GridConfig;
use crate::error::GridError;
use crate::factory::{DefaultTile, TileFactory};
use crate::parser::{CharGrid, Dimensions};
use glam::Vec3;
use serde::Serialize;

/// A `(row, col)` cell coordinate.
pub type GridCoord = (usize, usize);

/// Maps cell coordinates to scene positions, centering the grid on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub dimensions: Dimensions,
    pub cell_size: f32,
    pub floor_height: f32,
}

impl GridLayout {
    pub fn new(dimensions: Dimensions, config: &GridConfig) -> Self {
        Self {
            dimensions,
            cell_size: config.cell_size,
            floor_height: config.floor_height,
        }
    }

    /// Row and column offsets that center the grid: `-(n - 1) / 2`.
    pub fn offsets(&self) -> (f32, f32) {
        let offset_row = -((self.dimensions.rows as f32) - 1.0) * 0.5;
        let offset_col = -((self.dimensions.columns as f32) - 1.0) * 0.5;
        (offset_row, offset_col)
    }

    /// Position of a cell: `(row + offset_row, floor, col + offset_col)`,
    /// scaled by the cell size.
    pub fn position(&self, row: usize, col: usize) -> Vec3 {
        let (offset_row, offset_col) = self.offsets();
        Vec3::new(
            (row as f32 + offset_row) * self.cell_size,
            self.floor_height,
            (col as f32 + offset_col) * self.cell_size,
        )
    }
}

/// One object together with the cell it belongs to and its scene position.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement<T> {
    pub row: usize,
    pub col: usize,
    pub position: Vec3,
    pub object: T,
}

/// The outcome of resolving every cell of a grid.
///
/// Objects are kept per cell in the order the factory produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedGrid<T> {
    layout: GridLayout,
    /// Row-major, one entry per cell.
    cells: Vec<Vec<T>>,
}

impl<T> ResolvedGrid<T> {
    pub fn dimensions(&self) -> Dimensions {
        self.layout.dimensions
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Objects stacked on `(row, col)`, bottom first.
    pub fn cell(&self, row: usize, col: usize) -> Option<&[T]> {
        let dims = self.dimensions();
        if row >= dims.rows || col >= dims.columns {
            return None;
        }
        self.cells.get(row * dims.columns + col).map(Vec::as_slice)
    }

    /// Total number of objects across all cells.
    pub fn object_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Iterates every object with its placement, in row-major cell order.
    pub fn placements(&self) -> impl Iterator<Item = Placement<&T>> + '_ {
        let columns = self.dimensions().columns;
        self.cells.iter().enumerate().flat_map(move |(i, objects)| {
            let (row, col) = (i / columns, i % columns);
            let position = self.layout.position(row, col);
            objects.iter().map(move |object| Placement {
                row,
                col,
                position,
                object,
            })
        })
    }

    /// Consumes the grid, yielding owned placements.
    pub fn into_placements(self) -> Vec<Placement<T>> {
        let layout = self.layout;
        let columns = layout.dimensions.columns;
        self.cells
            .into_iter()
            .enumerate()
            .flat_map(|(i, objects)| {
                let (row, col) = (i / columns, i % columns);
                let position = layout.position(row, col);
                objects.into_iter().map(move |object| Placement {
                    row,
                    col,
                    position,
                    object,
                })
            })
            .collect()
    }
}

/// Turns parsed grids into placed objects.
#[derive(Clone, Debug, Default)]
pub struct TileResolver {
    config: GridConfig,
}

impl TileResolver {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Resolves every cell of `grid` through `factory`.
    ///
    /// With no factory every cell receives a single [`DefaultTile`]. Otherwise
    /// each character must pass [`TileFactory::is_valid_tile`] before it is
    /// handed to [`TileFactory::resolve`]; all objects a cell yields share the
    /// cell's position.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidTileCharacter`] for the first character the factory rejects.
    /// - [`GridError::NullTileResult`] if the factory resolves a valid character to `None`.
    pub fn resolve<F>(
        &self,
        grid: &CharGrid,
        factory: Option<&F>,
    ) -> Result<ResolvedGrid<F::Tile>, GridError>
    where
        F: TileFactory + ?Sized,
        F::Tile: DefaultTile,
    {
        let layout = GridLayout::new(grid.dimensions(), &self.config);
        let mut cells = Vec::with_capacity(grid.dimensions().cell_count().unwrap_or(0));

        for (row, col, ch) in grid.iter() {
            let objects = match factory {
                None => vec![<F::Tile as DefaultTile>::default_tile()],
                Some(factory) => {
                    if !factory.is_valid_tile(ch) {
                        return Err(GridError::InvalidTileCharacter { ch, row, col });
                    }
                    factory
                        .resolve(ch)
                        .ok_or(GridError::NullTileResult { ch, row, col })?
                }
            };
            cells.push(objects);
        }

        Ok(ResolvedGrid { layout, cells })
    }
}

/// Resolves `grid` with the default configuration.
pub fn resolve_grid<F>(
    grid: &CharGrid,
    factory: Option<&F>,
) -> Result<ResolvedGrid<F::Tile>, GridError>
where
    F: TileFactory + ?Sized,
    F::Tile: DefaultTile,
{
    TileResolver::default().resolve(grid, factory)
}

/// Resolves `grid` with no factory: one placeholder per cell.
pub fn resolve_placeholders<T: DefaultTile>(grid: &CharGrid) -> ResolvedGrid<T> {
    let layout = GridLayout::new(grid.dimensions(), &GridConfig::default());
    let cells = grid.iter().map(|_| vec![T::default_tile()]).collect();
    ResolvedGrid { layout, cells }
}
