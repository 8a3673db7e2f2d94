use std::{fmt, str::FromStr, sync::Arc};

use adversarial_search::Action;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
/// A cell on the board. `x` grows to the east and `y` grows to the south, so `(0, 0)` is the top
/// left corner of a layout
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The neighboring cell in `direction`. `Stop` stays put
    pub fn step(&self, direction: Direction) -> Position {
        match direction {
            Direction::North => Position::new(self.x, self.y - 1),
            Direction::South => Position::new(self.x, self.y + 1),
            Direction::East => Position::new(self.x + 1, self.y),
            Direction::West => Position::new(self.x - 1, self.y),
            Direction::Stop => *self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// The four moving directions, in the order legal actions are listed
    pub const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

impl Action for Direction {
    fn no_op() -> Self {
        Direction::Stop
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };

        write!(f, "{}", s)
    }
}

/// The fixed part of a board. Shared between every state of a game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Walls {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl Walls {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Anything off the board counts as a wall
    pub fn is_wall(&self, pos: &Position) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return true;
        }

        self.cells[(pos.y * self.width + pos.x) as usize]
    }

    /// Directions that lead from `pos` to an open cell, in [Direction::MOVES] order
    pub fn open_moves(&self, pos: &Position) -> impl Iterator<Item = Direction> + '_ {
        let pos = *pos;
        Direction::MOVES
            .into_iter()
            .filter(move |d| !self.is_wall(&pos.step(*d)))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown cell {found:?} at ({x}, {y})")]
    UnknownCell { found: char, x: usize, y: usize },

    #[error("layout needs exactly one collector, found {0}")]
    Collectors(usize),

    #[error("no layout named {0:?}")]
    UnknownName(String),
}

/// The starting position of a game, parsed from text
///
/// `%` is a wall, `.` a pellet, `P` the collector, `G` a chaser and a space is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub walls: Arc<Walls>,
    pub collector: Position,
    pub chasers: Vec<Position>,
    pub pellets: Vec<Position>,
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();

        let width = rows.first().ok_or(LayoutError::Empty)?.chars().count();

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut collectors = vec![];
        let mut chasers = vec![];
        let mut pellets = vec![];

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    found,
                    expected: width,
                });
            }

            for (x, c) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                match c {
                    '%' => {}
                    ' ' => {}
                    '.' => pellets.push(pos),
                    'P' => collectors.push(pos),
                    'G' => chasers.push(pos),
                    found => return Err(LayoutError::UnknownCell { found, x, y }),
                }
                cells.push(c == '%');
            }
        }

        if collectors.len() != 1 {
            return Err(LayoutError::Collectors(collectors.len()));
        }

        Ok(Layout {
            walls: Arc::new(Walls {
                width: width as i32,
                height: rows.len() as i32,
                cells,
            }),
            collector: collectors[0],
            chasers,
            pellets,
        })
    }
}

/// The layouts that ship with the crate, by name
pub const BUILTIN_LAYOUTS: [(&str, &str); 4] = [
    ("tiny", include_str!("../layouts/tiny.lay")),
    ("small", include_str!("../layouts/small.lay")),
    ("trapped", include_str!("../layouts/trapped.lay")),
    ("open", include_str!("../layouts/open.lay")),
];

impl Layout {
    /// One of the [BUILTIN_LAYOUTS]
    pub fn builtin(name: &str) -> Result<Self, LayoutError> {
        BUILTIN_LAYOUTS
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| LayoutError::UnknownName(name.to_owned()))?
            .1
            .parse()
    }
}
