//! Core domain types for connect-five.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::board::COLUMNS;

/// Disc color held by a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Disc {
    /// Red disc, rendered as `R`.
    Red,
    /// Blue disc, rendered as `B`.
    Blue,
}

impl Disc {
    /// Returns the other of the two colors.
    pub fn other(self) -> Self {
        match self {
            Disc::Red => Disc::Blue,
            Disc::Blue => Disc::Red,
        }
    }

    /// Single-character symbol used in board renderings.
    pub fn symbol(self) -> char {
        match self {
            Disc::Red => 'R',
            Disc::Blue => 'B',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No disc.
    #[default]
    Empty,
    /// Cell holds a disc.
    Occupied(Disc),
}

impl Cell {
    /// Returns true if no disc occupies the cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Symbol placed between the brackets of a rendered cell.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(disc) => disc.symbol(),
        }
    }
}

/// A board column, guaranteed to be in range.
///
/// Players address columns 1 through 9; the board indexes them from 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("{}", _0 + 1)]
pub struct Column(usize);

impl Column {
    /// Creates a column from the 1-based number a player types.
    #[instrument]
    pub fn from_one_based(number: usize) -> Option<Self> {
        (1..=COLUMNS).contains(&number).then(|| Self(number - 1))
    }

    /// Creates a column from a 0-based board index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < COLUMNS).then_some(Self(index))
    }

    /// 0-based board index.
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based number as shown to players.
    pub fn number(self) -> usize {
        self.0 + 1
    }

    /// All columns, left to right.
    pub fn all() -> impl Iterator<Item = Column> {
        (0..COLUMNS).map(Column)
    }
}
