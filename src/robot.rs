//! Robot movement over a parsed map.

use crate::config::GridConfig;
use crate::error::GridError;
use crate::parser::CharGrid;
use crate::resolver::GridLayout;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Map characters that mark a robot's starting cell.
pub const ROBOT_MARKERS: [char; 2] = ['>', 'v'];

/// Map character that blocks movement.
pub const WALL: char = '#';

/// Map character of the exit.
pub const EXIT: char = 'X';

/// A movement direction relative to the robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Forward,
    Backward,
}

/// An absolute facing on the grid.
///
/// `North` is decreasing row, `East` is increasing column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Heading of a robot marker character, if it is one.
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            '>' => Some(Heading::East),
            'v' => Some(Heading::South),
            _ => None,
        }
    }

    pub fn left(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    pub fn right(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    /// The heading reached by moving in `direction` while facing `self`.
    pub fn turn(self, direction: Direction) -> Self {
        match direction {
            Direction::Forward => self,
            Direction::Left => self.left(),
            Direction::Right => self.right(),
            Direction::Backward => self.left().left(),
        }
    }

    /// `(row, col)` step of one move.
    pub fn step(self) -> (isize, isize) {
        match self {
            Heading::North => (-1, 0),
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
        }
    }

    /// Scene rotation. Rows run along +X and columns along +Z, so `East`
    /// is the identity and `South` is a quarter turn about Y.
    pub fn rotation(self) -> Quat {
        let angle = match self {
            Heading::East => 0.0,
            Heading::South => FRAC_PI_2,
            Heading::West => PI,
            Heading::North => -FRAC_PI_2,
        };
        Quat::from_rotation_y(angle)
    }
}

/// The movement interface of a robot.
pub trait Robot {
    fn move_forward(&mut self) -> Result<(), GridError>;

    fn rotate_left(&mut self);

    fn rotate_right(&mut self);

    fn can_move(&self, direction: Direction) -> bool;
}

/// A robot walking the cells of a map. Walls and the map edge block it.
#[derive(Clone, Debug)]
pub struct GridRobot {
    grid: CharGrid,
    layout: GridLayout,
    row: usize,
    col: usize,
    heading: Heading,
}

impl GridRobot {
    /// Places a robot on `(row, col)` facing `heading`.
    pub fn new(
        grid: CharGrid,
        config: &GridConfig,
        (row, col): (usize, usize),
        heading: Heading,
    ) -> Result<Self, GridError> {
        match grid.get(row, col) {
            None => {
                return Err(GridError::InvalidArgument(format!(
                    "robot position {row}x{col} is outside the {} grid",
                    grid.dimensions()
                )));
            }
            Some(WALL) => {
                return Err(GridError::InvalidArgument(format!(
                    "robot position {row}x{col} is a wall"
                )));
            }
            Some(_) => {}
        }
        let layout = GridLayout::new(grid.dimensions(), config);
        Ok(Self {
            grid,
            layout,
            row,
            col,
            heading,
        })
    }

    /// Places a robot on the first marker (`>` or `v`) in the map.
    pub fn locate(grid: CharGrid, config: &GridConfig) -> Option<Self> {
        let (row, col, ch) = grid.find(&ROBOT_MARKERS)?;
        let heading = Heading::from_marker(ch)?;
        Self::new(grid, config, (row, col), heading).ok()
    }

    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Scene position of the robot's cell.
    pub fn position(&self) -> Vec3 {
        self.layout.position(self.row, self.col)
    }

    pub fn rotation(&self) -> Quat {
        self.heading.rotation()
    }

    /// Forward vector in scene space.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    pub fn on_exit(&self) -> bool {
        self.grid.get(self.row, self.col) == Some(EXIT)
    }

    fn neighbour(&self, heading: Heading) -> Option<(usize, usize)> {
        let (dr, dc) = heading.step();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        match self.grid.get(row, col)? {
            WALL => None,
            _ => Some((row, col)),
        }
    }
}

impl Robot for GridRobot {
    fn move_forward(&mut self) -> Result<(), GridError> {
        let (row, col) = self
            .neighbour(self.heading)
            .ok_or(GridError::Blocked(Direction::Forward))?;
        self.row = row;
        self.col = col;
        Ok(())
    }

    fn rotate_left(&mut self) {
        self.heading = self.heading.left();
    }

    fn rotate_right(&mut self) {
        self.heading = self.heading.right();
    }

    fn can_move(&self, direction: Direction) -> bool {
        self.neighbour(self.heading.turn(direction)).is_some()
    }
}
