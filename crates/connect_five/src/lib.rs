//! Connect Five - a two-player five-in-a-row game over HTTP.
//!
//! Two clients that never talk to each other share one [`Session`] on the
//! server. They join, then poll `move-status` until it is their turn, and
//! send `make-move` with a column. The session alone decides whose turn it
//! is and how the game ends.
//!
//! # Architecture
//!
//! - **Rules**: board, drops and win detection (`connect_five_rules`)
//! - **Session**: seating, turn order and game lifecycle
//! - **Reply**: every outcome with its status kind and message
//! - **Server**: axum routes over a shared session
//! - **Client**: reqwest wrapper and the interactive terminal loop
//!
//! # Example
//!
//! ```
//! use connect_five::{Outcome, Session};
//! use connect_five_rules::Disc;
//!
//! let session = Session::with_seed(7);
//! session.join("Alice", Disc::Red);
//! let reply = session.join("Bob", Disc::Red);
//! assert!(matches!(
//!     reply.outcome(),
//!     Outcome::GameStarted { reassigned: Some(Disc::Blue) }
//! ));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod play;
mod reply;
mod server;
mod session;

// Crate-level exports - Session management
pub use session::{GameResult, MAX_PLAYERS, Phase, Player, Session, SessionSnapshot};

// Crate-level exports - Reply contract
pub use reply::{Outcome, Reply, Status};

// Crate-level exports - Server
pub use server::{JoinParams, MoveParams, PlayerParams, router, run, serve, status_code};

// Crate-level exports - Client
pub use client::{ClientError, GameClient, ServerReply};
pub use play::{
    ColumnChoice, Console, join_game, parse_column_choice, parse_disc, parse_name, play,
    play_game, run as run_client,
};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, ServerConfig, Settings};
