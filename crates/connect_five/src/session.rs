//! Two-player game session: seating, turn order and game lifecycle.
//!
//! All state lives behind one mutex. Each public operation takes the lock
//! once, checks its preconditions, mutates and builds its reply before
//! releasing it, so concurrent joins and moves are serialized.

use crate::reply::{Outcome, Reply};
use connect_five_rules::{Board, Column, Disc};
use derive_getters::Getters;
use derive_new::new;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Maximum number of seated players.
pub const MAX_PLAYERS: usize = 2;

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Player {
    /// Display name, unique among seated players.
    name: String,
    /// Disc color.
    disc: Disc,
}

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Five in a row.
    Won {
        /// Name of the winner, already unseated.
        winner: String,
    },
    /// Board filled without a winner.
    Draw,
}

/// Lifecycle of the current game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Zero or one player seated.
    Waiting,
    /// Two players were seated and the game is on.
    Active {
        /// Player who moved most recently, or who drew the first-mover slot.
        /// The other player is prompted next.
        last_to_move: String,
    },
    /// A result is in, waiting for the remaining player to poll.
    Finished(GameResult),
}

impl Phase {
    /// True while joins must be refused.
    pub fn in_progress(&self) -> bool {
        !matches!(self, Phase::Waiting)
    }
}

/// Point-in-time copy of the session, for inspection and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SessionSnapshot {
    /// Seated players ordered by name.
    players: Vec<Player>,
    /// Current phase.
    phase: Phase,
    /// Board contents.
    board: Board,
}

impl SessionSnapshot {
    /// Looks up a seated player by name.
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Name of the player who must wait, while a game is active.
    pub fn last_to_move(&self) -> Option<&str> {
        match &self.phase {
            Phase::Active { last_to_move } => Some(last_to_move),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct State {
    players: BTreeMap<String, Player>,
    phase: Phase,
    board: Board,
    rng: StdRng,
}

impl State {
    fn new(rng: StdRng) -> Self {
        Self {
            players: BTreeMap::new(),
            phase: Phase::Waiting,
            board: Board::new(),
            rng,
        }
    }

    /// Clears the board and returns to `Waiting`. Seated players stay.
    fn reset(&mut self) {
        info!(players = self.players.len(), "Resetting game");
        self.board.clear();
        self.phase = Phase::Waiting;
    }

    fn remove(&mut self, name: &str) {
        self.players.remove(name);
        debug!(name, remaining = self.players.len(), "Player unseated");
    }

    /// Opponent left mid-game: the caller wins by forfeit and is unseated.
    fn forfeit(&mut self, name: &str) -> Reply {
        info!(name, "Opponent gone, awarding forfeit");
        self.remove(name);
        self.reset();
        Outcome::OpponentDisconnectedYouWon.into()
    }
}

/// The shared game session.
#[derive(Debug)]
pub struct Session {
    state: Mutex<State>,
}

impl Session {
    /// Creates a session seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game session");
        Self {
            state: Mutex::new(State::new(StdRng::from_os_rng())),
        }
    }

    /// Creates a session with a deterministic first-mover draw.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: Mutex::new(State::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seats a player.
    ///
    /// The first player waits. The second starts the game: a clashing color
    /// is swapped for the free one, and one of the two players is drawn at
    /// random as `last_to_move`, so the *other* player is prompted first.
    #[instrument(skip(self))]
    pub fn join(&self, name: &str, disc: Disc) -> Reply {
        let mut state = self.lock();

        if state.phase.in_progress() {
            warn!(name, "Join refused, game in progress");
            return Outcome::GameInProgress.into();
        }
        if state.players.contains_key(name) {
            warn!(name, "Join refused, name taken");
            return Outcome::NameTaken.into();
        }

        if state.players.is_empty() {
            state.players.insert(name.to_string(), Player::new(name.to_string(), disc));
            info!(name, %disc, "First player seated");
            return Outcome::WaitingForOpponent.into();
        }

        let taken = state.players.values().any(|p| p.disc == disc);
        let (disc, reassigned) = if taken {
            (disc.other(), Some(disc.other()))
        } else {
            (disc, None)
        };
        state.players.insert(name.to_string(), Player::new(name.to_string(), disc));

        let names: Vec<String> = state.players.keys().cloned().collect();
        let pick = state.rng.random_range(0..names.len());
        let last_to_move = names[pick].clone();
        info!(name, %disc, waits = %last_to_move, "Second player seated, game started");
        state.phase = Phase::Active { last_to_move };

        Outcome::GameStarted { reassigned }.into()
    }

    /// Drops the player's disc into `column`.
    #[instrument(skip(self), fields(column = column.number()))]
    pub fn make_move(&self, name: &str, column: Column) -> Reply {
        let mut guard = self.lock();
        let state = &mut *guard;

        let Some(disc) = state.players.get(name).map(|p| p.disc) else {
            return Outcome::NotAuthorized.into();
        };

        match &state.phase {
            Phase::Waiting => return Outcome::OpponentNotJoined.into(),
            Phase::Finished(_) => {
                return Outcome::NotYourTurn {
                    name: name.to_string(),
                }
                .into();
            }
            Phase::Active { .. } if state.players.len() < MAX_PLAYERS => {
                return state.forfeit(name);
            }
            Phase::Active { last_to_move } if last_to_move == name => {
                debug!(name, "Move out of turn");
                return Outcome::NotYourTurn {
                    name: name.to_string(),
                }
                .into();
            }
            Phase::Active { .. } => {}
        }

        if state.board.drop_disc(column, disc).is_none() {
            debug!(name, "Column full");
            return Reply::with_board(Outcome::ColumnFull { column }, &state.board);
        }

        if state.board.check_win(disc) {
            info!(name, %disc, "Game won");
            state.phase = Phase::Finished(GameResult::Won {
                winner: name.to_string(),
            });
            state.remove(name);
            return Reply::with_board(Outcome::Won, &state.board);
        }

        if state.board.is_full() {
            info!(name, "Board full, game drawn");
            state.phase = Phase::Finished(GameResult::Draw);
            state.remove(name);
            return Reply::with_board(Outcome::BoardFullDraw, &state.board);
        }

        state.phase = Phase::Active {
            last_to_move: name.to_string(),
        };
        Reply::with_board(
            Outcome::MoveAccepted {
                name: name.to_string(),
            },
            &state.board,
        )
    }

    /// Tells a polling player whether it is their turn or how the game ended.
    ///
    /// Polling after a result unseats the poller and resets the game.
    #[instrument(skip(self))]
    pub fn move_status(&self, name: &str) -> Reply {
        let mut state = self.lock();

        if !state.players.contains_key(name) {
            return Outcome::NotAuthorized.into();
        }

        match state.phase.clone() {
            Phase::Finished(result) => {
                let outcome = match result {
                    GameResult::Won { .. } => Outcome::YouLost,
                    GameResult::Draw => Outcome::Draw,
                };
                let reply = Reply::with_board(outcome, &state.board);
                state.remove(name);
                state.reset();
                reply
            }
            Phase::Active { .. } if state.players.len() < MAX_PLAYERS => state.forfeit(name),
            Phase::Waiting => Outcome::OpponentNotJoined.into(),
            Phase::Active { last_to_move } if last_to_move == name => Outcome::NotYourMove.into(),
            Phase::Active { .. } => Reply::with_board(
                Outcome::YourTurn {
                    name: name.to_string(),
                },
                &state.board,
            ),
        }
    }

    /// Unseats a player.
    ///
    /// The phase is left as is so the opponent learns of the forfeit on
    /// their next poll. With nobody left the game is reset.
    #[instrument(skip(self))]
    pub fn disconnect(&self, name: &str) -> Reply {
        let mut state = self.lock();

        if !state.players.contains_key(name) {
            return Outcome::NotAuthorized.into();
        }

        state.remove(name);
        if state.players.is_empty() && state.phase.in_progress() {
            state.reset();
        }
        info!(name, "Player disconnected");
        Outcome::Disconnected.into()
    }

    /// Returns true if `name` is seated.
    pub fn is_seated(&self, name: &str) -> bool {
        self.lock().players.contains_key(name)
    }

    /// Copies the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            players: state.players.values().cloned().collect(),
            phase: state.phase.clone(),
            board: state.board.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
