//! # robot-tilegrid
//!
//! Engine-agnostic construction of tile grids from text map files.
//!
//! A map file declares its size on the first line and lists one character per
//! cell below it. The [`parser`] turns it into a validated [`CharGrid`], the
//! [`resolver`] runs every cell through a [`TileFactory`] and centers the
//! result on the origin, and [`TileGrid`] drives the whole pipeline into any
//! [`SceneContainer`], rebuilding only when its inputs change.
//!
//! ```
//! use robot_tilegrid::{MemoryScene, SampleTileFactory, TileGrid};
//!
//! let mut grid = TileGrid::new(MemoryScene::new());
//! grid.set_factory(SampleTileFactory::default());
//! grid.set_map_source("2x3\n.>.\n#.X");
//! grid.clean_up().unwrap();
//!
//! assert!(grid.is_loaded());
//! assert_eq!(grid.container().len(), 9);
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod grid;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod robot;
pub mod sample;
pub mod scene;
pub mod tile;

pub use config::*;
pub use error::*;
pub use factory::*;
pub use grid::*;
pub use parser::*;
pub use registry::*;
pub use resolver::*;
pub use robot::*;
pub use sample::*;
pub use scene::*;
pub use tile::*;
