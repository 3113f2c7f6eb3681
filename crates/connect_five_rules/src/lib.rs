//! Pure connect-five game logic.
//!
//! A 6 × 9 board where discs fall to the lowest free cell of a column and a
//! player wins with five of their discs in a row along any of four axes.
//! Nothing here knows about players, turns or transport.
//!
//! ```
//! use connect_five_rules::{Board, Column, Disc};
//!
//! let mut board = Board::new();
//! for col in 1..=5 {
//!     let column = Column::from_one_based(col).unwrap();
//!     board.drop_disc(column, Disc::Red);
//! }
//! assert!(board.check_win(Disc::Red));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod types;

pub mod rules;

pub use board::{Board, COLUMNS, ROWS};
pub use rules::{Axis, WINNING_LENGTH};
pub use types::{Cell, Column, Disc};
