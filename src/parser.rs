//! Map file parsing.
//!
//! A map file is plain text. The first line declares the grid size as
//! `{rows}x{columns}` (the `x` is case-insensitive) and every following line
//! holds exactly `columns` characters:
//!
//! ```text
//! 2x3
//! .>.
//! #.X
//! ```
//!
//! Parsing is strict and fails fast: nothing is instantiated from a map until
//! its whole shape has been validated.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared size of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    /// Creates dimensions, rejecting a zero row or column count.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows < 1 || columns < 1 {
            return Err(GridError::InvalidArgument(format!(
                "expected rows and columns greater than 0 but received (rows: {rows}, columns: {columns})"
            )));
        }
        Ok(Self { rows, columns })
    }

    /// Total number of cells, or `None` if the product overflows.
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// An immutable `rows × columns` matrix of map characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharGrid {
    dimensions: Dimensions,
    /// Row-major cell storage.
    cells: Vec<char>,
}

impl CharGrid {
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    pub fn columns(&self) -> usize {
        self.dimensions.columns
    }

    /// Returns the character at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.rows() || col >= self.columns() {
            return None;
        }
        self.cells.get(row * self.columns() + col).copied()
    }

    /// Returns one row of the grid.
    pub fn row(&self, row: usize) -> Option<&[char]> {
        let start = row.checked_mul(self.columns())?;
        self.cells.get(start..start + self.columns())
    }

    /// Iterates every cell in row-major order as `(row, col, char)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let columns = self.columns();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i / columns, i % columns, c))
    }

    /// Finds the first cell holding any of `chars`.
    pub fn find(&self, chars: &[char]) -> Option<(usize, usize, char)> {
        self.iter().find(|(_, _, c)| chars.contains(c))
    }
}

impl fmt::Display for CharGrid {
    /// Writes the grid back out in map file format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dimensions)?;
        for row in 0..self.rows() {
            writeln!(f)?;
            for c in self.row(row).unwrap_or_default() {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Splits map text into lines. Accepts `\n` and `\r\n`; a trailing newline
/// does not add an empty body line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Parses map text. See [`parse`].
pub fn parse_str(text: &str) -> Result<CharGrid, GridError> {
    parse(&split_lines(text))
}

/// Parses the lines of a map file into a [`CharGrid`].
///
/// # Errors
///
/// - [`GridError::EmptyInput`] if `lines` is empty.
/// - [`GridError::MalformedHeader`] if the first line is not `{rows}x{columns}`.
/// - [`GridError::InvalidArgument`] if either dimension is zero.
/// - [`GridError::RowCountMismatch`] if the body does not have exactly `rows` lines.
/// - [`GridError::ColumnCountMismatch`] for the first body line whose length is not `columns`.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<CharGrid, GridError> {
    let Some((header, body)) = lines.split_first() else {
        return Err(GridError::EmptyInput);
    };

    let dimensions = parse_dimensions(header.as_ref())?;

    if body.len() != dimensions.rows {
        return Err(GridError::RowCountMismatch {
            declared: dimensions.rows,
            found: body.len(),
        });
    }

    // Sized from the body, not the header: the header is untrusted until
    // every line has been checked.
    let mut cells = Vec::with_capacity(body.iter().map(|l| l.as_ref().len()).sum());
    for (row, line) in body.iter().enumerate() {
        let line = line.as_ref();
        let found = line.chars().count();
        if found != dimensions.columns {
            return Err(GridError::ColumnCountMismatch {
                row,
                expected: dimensions.columns,
                found,
            });
        }
        cells.extend(line.chars());
    }

    Ok(CharGrid { dimensions, cells })
}

/// Parses a `{rows}x{columns}` header line.
pub fn parse_dimensions(line: &str) -> Result<Dimensions, GridError> {
    let malformed = || GridError::MalformedHeader {
        line: line.to_string(),
    };

    let lowered = line.trim().to_lowercase();
    let tokens: Vec<&str> = lowered.split('x').collect();
    let [rows, columns] = tokens.as_slice() else {
        return Err(malformed());
    };

    let rows: i64 = rows.trim().parse().map_err(|_| malformed())?;
    let columns: i64 = columns.trim().parse().map_err(|_| malformed())?;

    let count = |n: i64| {
        usize::try_from(n).map_err(|_| {
            GridError::InvalidArgument(format!(
                "expected rows and columns greater than 0 but received (rows: {rows}, columns: {columns})"
            ))
        })
    };
    Dimensions::new(count(rows)?, count(columns)?)
}
