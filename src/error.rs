//! Error types for map parsing, tile resolution and grid construction.

use crate::registry::TileType;
use thiserror::Error;

/// Every way building a tile grid can fail.
///
/// Errors are raised at the point of detection and never retried internally.
/// The type is `Clone` so a failed [`TileGrid`](crate::TileGrid) can keep
/// surfacing the same error until its inputs change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cannot parse an empty file as a tile grid")]
    EmptyInput,

    #[error("the first line of a tile grid file should have the format \"{{rows}}x{{columns}}\" but was \"{line}\"")]
    MalformedHeader { line: String },

    #[error("the file declares {declared} rows but contains {found}")]
    RowCountMismatch { declared: usize, found: usize },

    #[error("the file declares {expected} columns but row {row} contains {found} characters")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile character '{ch}' at {row}x{col}")]
    InvalidTileCharacter { ch: char, row: usize, col: usize },

    #[error("tile factory returned no result for '{ch}' at {row}x{col}")]
    NullTileResult { ch: char, row: usize, col: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no resource registered for tile type {0:?}")]
    MissingResource(TileType),

    #[error("robot cannot move {0:?}")]
    Blocked(crate::robot::Direction),
}

/// Errors raised while loading a [`GridConfig`](crate::GridConfig) from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Grid(#[from] GridError),
}
