//! The grid orchestrator: map source in, placed scene nodes out.

use crate::config::GridConfig;
use crate::error::GridError;
use crate::factory::{DefaultTile, TileFactory};
use crate::parser::{self, CharGrid};
use crate::resolver::{GridCoord, ResolvedGrid, TileResolver};
use crate::scene::{NodeId, SceneContainer};
use log::{debug, info, warn};

/// Whether the built grid reflects the current inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridState {
    /// The container holds a grid built from the current inputs.
    Clean,
    /// An input changed since the last build.
    Dirty,
    /// The last build failed. The error is kept until an input changes.
    Failed(GridError),
}

/// Builds a tile grid from map text into a [`SceneContainer`].
///
/// Changing the map source, the factory or the config marks the grid dirty;
/// [`clean_up`](Self::clean_up) rebuilds only when something changed, and
/// [`generate_grid`](Self::generate_grid) always rebuilds.
///
/// # Rebuilds
///
/// A rebuild parses and resolves the whole map before touching the
/// container. Only once every cell has resolved are the previous children
/// destroyed and the new objects instantiated, so a failed rebuild leaves
/// the last good grid in place.
pub struct TileGrid<S: SceneContainer> {
    map_source: Option<String>,
    factory: Option<Box<dyn TileFactory<Tile = S::Object>>>,
    resolver: TileResolver,
    container: S,
    state: GridState,
    grid: Option<CharGrid>,
    /// Row-major, one entry per cell of `grid`.
    nodes: Vec<Vec<NodeId>>,
    generation: u64,
}

impl<S> TileGrid<S>
where
    S: SceneContainer,
    S::Object: DefaultTile,
{
    /// Creates a dirty grid with the default config and no factory.
    pub fn new(container: S) -> Self {
        Self {
            map_source: None,
            factory: None,
            resolver: TileResolver::default(),
            container,
            state: GridState::Dirty,
            grid: None,
            nodes: Vec::new(),
            generation: 0,
        }
    }

    /// Creates a dirty grid with `config`.
    pub fn with_config(container: S, config: GridConfig) -> Result<Self, GridError> {
        let mut grid = Self::new(container);
        grid.set_config(config)?;
        Ok(grid)
    }

    // --- Inputs ---

    /// The map text, falling back to the configured default map.
    pub fn map_source(&self) -> &str {
        self.map_source
            .as_deref()
            .unwrap_or(self.resolver.config().default_map.as_str())
    }

    /// Replaces the map text. Assigning the current text is a no-op.
    pub fn set_map_source(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.map_source() == text {
            return;
        }
        self.map_source = Some(text);
        self.mark_dirty();
    }

    pub fn set_factory<F>(&mut self, factory: F)
    where
        F: TileFactory<Tile = S::Object> + 'static,
    {
        self.factory = Some(Box::new(factory));
        self.mark_dirty();
    }

    /// Removes the factory; subsequent builds place one placeholder per cell.
    pub fn clear_factory(&mut self) {
        if self.factory.take().is_some() {
            self.mark_dirty();
        }
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    pub fn config(&self) -> &GridConfig {
        self.resolver.config()
    }

    /// Replaces the config after validating it.
    pub fn set_config(&mut self, config: GridConfig) -> Result<(), GridError> {
        config.validate()?;
        if *self.resolver.config() != config {
            self.resolver = TileResolver::new(config);
            self.mark_dirty();
        }
        Ok(())
    }

    /// Flags the grid for rebuilding on the next [`clean_up`](Self::clean_up).
    pub fn mark_dirty(&mut self) {
        self.state = GridState::Dirty;
    }

    // --- Building ---

    /// Rebuilds if an input changed since the last build.
    ///
    /// A clean grid returns immediately. A grid whose last build failed
    /// returns that same error without retrying until an input changes.
    pub fn clean_up(&mut self) -> Result<(), GridError> {
        match &self.state {
            GridState::Clean => Ok(()),
            GridState::Failed(err) => Err(err.clone()),
            GridState::Dirty => self.generate_grid(),
        }
    }

    /// Rebuilds the grid unconditionally.
    pub fn generate_grid(&mut self) -> Result<(), GridError> {
        self.generation += 1;
        debug!("Rebuilding tile grid (generation {})", self.generation);

        match self.stage() {
            Ok((grid, resolved)) => {
                info!(
                    "Built {} tile grid with {} objects",
                    grid.dimensions(),
                    resolved.object_count()
                );
                self.install(resolved);
                self.grid = Some(grid);
                self.state = GridState::Clean;
                Ok(())
            }
            Err(err) => {
                warn!("Tile grid build failed: {err}");
                self.state = GridState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Parses and resolves the map without touching the container.
    fn stage(&self) -> Result<(CharGrid, ResolvedGrid<S::Object>), GridError> {
        let grid = parser::parse_str(self.map_source())?;
        debug!("Parsed {} map", grid.dimensions());
        let resolved = self.resolver.resolve(&grid, self.factory.as_deref())?;
        Ok((grid, resolved))
    }

    /// Swaps the container's children for the staged objects.
    fn install(&mut self, resolved: ResolvedGrid<S::Object>) {
        let root = self.container.root();
        self.container.destroy_children(root);
        let columns = resolved.dimensions().columns;
        self.nodes = vec![Vec::new(); resolved.dimensions().cell_count().unwrap_or(0)];

        for placement in resolved.into_placements() {
            let node = self.container.instantiate(placement.object);
            self.container.set_parent(node, root);
            self.container.set_local_position(node, placement.position);
            if let Some(cell) = self.nodes.get_mut(placement.row * columns + placement.col) {
                cell.push(node);
            }
        }
    }

    // --- Queries ---

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state != GridState::Clean
    }

    /// True when the container holds a grid built from the current inputs.
    pub fn is_loaded(&self) -> bool {
        self.state == GridState::Clean && self.grid.is_some()
    }

    /// Message of the last failed build, if the grid is in the failed state.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            GridState::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Row count of the grid currently in the container.
    pub fn rows(&self) -> Option<usize> {
        self.grid.as_ref().map(CharGrid::rows)
    }

    /// Column count of the grid currently in the container.
    pub fn columns(&self) -> Option<usize> {
        self.grid.as_ref().map(CharGrid::columns)
    }

    /// The parsed map the container was last built from.
    pub fn char_grid(&self) -> Option<&CharGrid> {
        self.grid.as_ref()
    }

    /// Scene nodes placed on `(row, col)`, bottom first.
    pub fn nodes_at(&self, row: usize, col: usize) -> &[NodeId] {
        let Some(grid) = &self.grid else {
            return &[];
        };
        if row >= grid.rows() || col >= grid.columns() {
            return &[];
        }
        self.nodes
            .get(row * grid.columns() + col)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every placed node with its cell, in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = (GridCoord, NodeId)> + '_ {
        let columns = self.columns().unwrap_or(1);
        self.nodes.iter().enumerate().flat_map(move |(i, cell)| {
            cell.iter().map(move |&node| ((i / columns, i % columns), node))
        })
    }

    /// Number of build attempts so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn container(&self) -> &S {
        &self.container
    }

    pub fn into_container(self) -> S {
        self.container
    }
}
