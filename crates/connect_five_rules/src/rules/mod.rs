//! Game rules for connect-five.
//!
//! Pure functions over a [`Board`](crate::Board), kept apart from the grid
//! storage the same way the drop logic is kept apart from turn handling.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Axis, WINNING_LENGTH, has_five, longest_run};
