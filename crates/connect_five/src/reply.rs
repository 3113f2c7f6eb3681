//! Reply contract shared by the session and the HTTP boundary.
//!
//! Every request ends in exactly one [`Outcome`]. None of them is an error in
//! the Rust sense: clients branch on the status kind and show the message.

use connect_five_rules::{Board, Column, Disc};
use serde::{Deserialize, Serialize};

/// Status kind of a reply, mapped onto HTTP status codes by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Status {
    /// 200.
    Ok,
    /// 202.
    Accepted,
    /// 400.
    BadRequest,
    /// 401.
    Unauthorized,
    /// 409.
    Conflict,
    /// 500. Tells a polling client its game is over.
    ServerError,
}

/// Every way a request can end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// First player seated.
    WaitingForOpponent,
    /// Second player seated, game is active.
    GameStarted {
        /// New color when the requested one was taken.
        reassigned: Option<Disc>,
    },
    /// A game is active or awaiting cleanup.
    GameInProgress,
    /// Another seated player has this name.
    NameTaken,
    /// The name is not seated.
    NotAuthorized,
    /// The player moved last.
    NotYourTurn {
        /// Player who tried to move.
        name: String,
    },
    /// The column has no empty cell.
    ColumnFull {
        /// Column the player chose.
        column: Column,
    },
    /// Disc placed, opponent to move.
    MoveAccepted {
        /// Player who moved.
        name: String,
    },
    /// The move made five in a row.
    Won,
    /// The move filled the last cell without a winner.
    BoardFullDraw,
    /// Poll by the player who moved last.
    NotYourMove,
    /// Only one player has joined.
    OpponentNotJoined,
    /// Poll by the player whose turn it is.
    YourTurn {
        /// Player being prompted.
        name: String,
    },
    /// Poll after the opponent won.
    YouLost,
    /// Poll after the opponent filled the board.
    Draw,
    /// Poll after the opponent left mid-game.
    OpponentDisconnectedYouWon,
    /// Player removed on request.
    Disconnected,
    /// Column outside 1..=9.
    InvalidColumn {
        /// Raw value received.
        value: String,
    },
    /// Color other than Red or Blue.
    InvalidColor {
        /// Raw value received.
        value: String,
    },
    /// Blank player name.
    InvalidName,
}

impl Outcome {
    /// Status kind reported to the client.
    pub fn status(&self) -> Status {
        match self {
            Outcome::WaitingForOpponent
            | Outcome::GameStarted { .. }
            | Outcome::Won
            | Outcome::BoardFullDraw
            | Outcome::YourTurn { .. }
            | Outcome::Disconnected => Status::Ok,
            Outcome::MoveAccepted { .. } => Status::Accepted,
            Outcome::NotYourTurn { .. }
            | Outcome::ColumnFull { .. }
            | Outcome::InvalidColumn { .. }
            | Outcome::InvalidColor { .. }
            | Outcome::InvalidName => Status::BadRequest,
            Outcome::NotAuthorized => Status::Unauthorized,
            Outcome::GameInProgress
            | Outcome::NameTaken
            | Outcome::NotYourMove
            | Outcome::OpponentNotJoined => Status::Conflict,
            Outcome::YouLost | Outcome::Draw | Outcome::OpponentDisconnectedYouWon => {
                Status::ServerError
            }
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::WaitingForOpponent => {
                write!(f, "Joined game, waiting for second player to join...")
            }
            Outcome::GameStarted { reassigned } => {
                if let Some(color) = reassigned {
                    writeln!(f, "The color you chose was taken. New color is {color}")?;
                }
                write!(f, "Game has started\nYou'll be notified when it's your move")
            }
            Outcome::GameInProgress => write!(f, "A game is in progress. Try again later."),
            Outcome::NameTaken => {
                write!(f, "User with that name already exists. Try a different name")
            }
            Outcome::NotAuthorized => write!(f, "User with that name is not in the game"),
            Outcome::NotYourTurn { name } => write!(f, "It's not your turn {name}"),
            Outcome::ColumnFull { column } => write!(f, "Column {column} is full"),
            Outcome::MoveAccepted { name } => write!(
                f,
                "You made your move {name}, please wait for the other player to make theirs"
            ),
            Outcome::Won => write!(f, "Game is over. You have won the game"),
            Outcome::BoardFullDraw => write!(f, "Game is over. The board is full, it's a draw"),
            Outcome::NotYourMove => write!(f, "Not your move"),
            Outcome::OpponentNotJoined => {
                write!(f, "The game has not started, waiting on another player")
            }
            Outcome::YourTurn { name } => write!(
                f,
                "It's your turn {name}, please enter column (1-9 or 0 to disconnect)"
            ),
            Outcome::YouLost => write!(f, "Game is over. You have lost."),
            Outcome::Draw => write!(f, "Game is over. It's a draw."),
            Outcome::OpponentDisconnectedYouWon => {
                write!(f, "The other player has disconnected.\nYou have won!")
            }
            Outcome::Disconnected => write!(f, "You have successfully disconnected from the game"),
            Outcome::InvalidColumn { value } => {
                write!(f, "Column must be a number between 1 and 9, got '{value}'")
            }
            Outcome::InvalidColor { value } => {
                write!(f, "Disc color must be either Red or Blue, got '{value}'")
            }
            Outcome::InvalidName => write!(f, "Name must not be empty"),
        }
    }
}

/// An outcome plus the board snapshot some outcomes carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    outcome: Outcome,
    board: Option<String>,
}

impl Reply {
    /// Reply without a board.
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            board: None,
        }
    }

    /// Reply carrying a rendering of `board`.
    pub fn with_board(outcome: Outcome, board: &Board) -> Self {
        Self {
            outcome,
            board: Some(board.to_string()),
        }
    }

    /// The outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Status kind of the outcome.
    pub fn status(&self) -> Status {
        self.outcome.status()
    }

    /// Board snapshot, if attached.
    pub fn board(&self) -> Option<&str> {
        self.board.as_deref()
    }

    /// Text sent to the client: board (if any), a blank line, then the message.
    pub fn body(&self) -> String {
        match &self.board {
            Some(board) => format!("{board}\n{}", self.outcome),
            None => self.outcome.to_string(),
        }
    }
}

impl From<Outcome> for Reply {
    fn from(outcome: Outcome) -> Self {
        Self::new(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_started_mentions_reassigned_color() {
        let outcome = Outcome::GameStarted {
            reassigned: Some(Disc::Blue),
        };
        let message = outcome.to_string();
        assert!(message.starts_with("The color you chose was taken. New color is Blue\n"));
        assert!(message.contains("Game has started"));
        assert_eq!(outcome.status(), Status::Ok);
    }

    #[test]
    fn test_game_started_without_reassignment() {
        let message = Outcome::GameStarted { reassigned: None }.to_string();
        assert_eq!(message, "Game has started\nYou'll be notified when it's your move");
    }

    #[test]
    fn test_column_full_uses_player_numbering() {
        let column = Column::from_one_based(4).unwrap();
        assert_eq!(Outcome::ColumnFull { column }.to_string(), "Column 4 is full");
    }

    #[test]
    fn test_terminal_poll_outcomes_are_server_errors() {
        for outcome in [Outcome::YouLost, Outcome::Draw, Outcome::OpponentDisconnectedYouWon] {
            assert_eq!(outcome.status(), Status::ServerError);
        }
    }

    #[test]
    fn test_body_puts_board_before_message() {
        let reply = Reply::with_board(Outcome::Won, &Board::new());
        let body = reply.body();
        assert!(body.starts_with("[ ][ ][ ]"));
        assert!(body.ends_with("\n\nGame is over. You have won the game"));
    }

    #[test]
    fn test_accepted_move_body() {
        let reply = Reply::with_board(
            Outcome::MoveAccepted {
                name: "Alice".to_string(),
            },
            &Board::new(),
        );
        assert_eq!(reply.status(), Status::Accepted);
        let body = reply.body();
        let (board, message) = body.rsplit_once('\n').unwrap();
        assert!(board.ends_with("[ ]\n"));
        assert_eq!(
            message,
            "You made your move Alice, please wait for the other player to make theirs"
        );
    }

    #[test]
    fn test_column_full_body_has_no_trailing_newline() {
        let column = Column::from_one_based(9).unwrap();
        let body = Reply::with_board(Outcome::ColumnFull { column }, &Board::new()).body();
        assert!(body.ends_with("[ ]\n\nColumn 9 is full"));
    }

    #[test]
    fn test_body_without_board_is_message() {
        let reply = Reply::from(Outcome::NotYourMove);
        assert_eq!(reply.body(), "Not your move");
        assert_eq!(reply.status(), Status::Conflict);
        assert!(reply.board().is_none());
    }
}
