//! Interactive terminal client.
//!
//! Joins a game, then polls the server until it is this player's turn, reads
//! a column, sends the move and goes back to polling. A 500 from the status
//! poll or a 200 from a move ends the game.

use crate::client::{GameClient, ServerReply};
use crate::config::ClientConfig;
use anyhow::{Context, Result};
use connect_five_rules::{COLUMNS, Disc};
use std::fmt::Display;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info, instrument};

/// What the player typed at the column prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChoice {
    /// `0`: leave the game.
    Disconnect,
    /// `1`-`9`: drop a disc there.
    Column(usize),
}

/// Parses a column prompt answer.
pub fn parse_column_choice(input: &str) -> Option<ColumnChoice> {
    match input.trim().parse::<usize>().ok()? {
        0 => Some(ColumnChoice::Disconnect),
        n if n <= COLUMNS => Some(ColumnChoice::Column(n)),
        _ => None,
    }
}

/// Parses a color prompt answer. Only the exact names are accepted.
pub fn parse_disc(input: &str) -> Option<Disc> {
    input.trim().parse().ok()
}

/// Parses a name prompt answer.
pub fn parse_name(input: &str) -> Option<String> {
    let name = input.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Line-based input and output.
pub struct Console<R, W> {
    input: Lines<R>,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Wraps a reader and a writer.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: input.lines(),
            output,
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn prompt(&mut self, text: impl Display) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String> {
        self.input
            .next_line()
            .await?
            .context("Input closed")
    }

    async fn ask_name(&mut self) -> Result<String> {
        self.prompt("Name: ")?;
        loop {
            if let Some(name) = parse_name(&self.read_line().await?) {
                return Ok(name);
            }
            self.say("Name must not be empty")?;
        }
    }

    async fn ask_disc(&mut self) -> Result<Disc> {
        self.prompt("Disc Color (Red | Blue): ")?;
        loop {
            if let Some(disc) = parse_disc(&self.read_line().await?) {
                return Ok(disc);
            }
            self.say("Disc color must be either Red or Blue")?;
        }
    }

    async fn ask_column(&mut self) -> Result<ColumnChoice> {
        loop {
            if let Some(choice) = parse_column_choice(&self.read_line().await?) {
                return Ok(choice);
            }
            self.say("Column value must be a number between 1 and 9 (0 to disconnect):")?;
        }
    }
}

/// Runs the client on stdin/stdout.
#[instrument(skip_all, fields(server = %config.server_url()))]
pub async fn run(config: &ClientConfig) -> Result<()> {
    let client = GameClient::new(config.server_url().clone());
    let mut console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    play(&client, &mut console, config.poll_interval()).await
}

/// Joins and plays one game.
pub async fn play<R, W>(
    client: &GameClient,
    console: &mut Console<R, W>,
    poll_interval: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let name = join_game(client, console).await?;
    play_game(client, console, &name, poll_interval).await?;
    console.say("Goodbye!")
}

/// Asks for name and color until the server seats the player.
#[instrument(skip_all)]
pub async fn join_game<R, W>(client: &GameClient, console: &mut Console<R, W>) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.say("Hello, to join a game please provide some information")?;
    loop {
        let name = console.ask_name().await?;
        let disc = console.ask_disc().await?;
        let reply = client.join(&name, disc).await?;
        console.say(reply.message())?;
        if reply.is_ok() {
            info!(name = %name, "Joined game");
            return Ok(name);
        }
        console.say("Please enter the information again.")?;
    }
}

/// Polls, prompts and moves until the game ends for this player.
#[instrument(skip(client, console, poll_interval))]
pub async fn play_game<R, W>(
    client: &GameClient,
    console: &mut Console<R, W>,
    name: &str,
    poll_interval: Duration,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let status = wait_for_turn(client, name, poll_interval).await?;
        console.say(status.message())?;
        if status.is_game_over() {
            return Ok(());
        }

        match console.ask_column().await? {
            ColumnChoice::Disconnect => {
                let reply = client.disconnect(name).await?;
                console.say(reply.message())?;
                return Ok(());
            }
            ColumnChoice::Column(column) => {
                let reply = client.make_move(name, column).await?;
                console.say(reply.message())?;
                if reply.is_ok() {
                    return Ok(());
                }
            }
        }
    }
}

/// Polls until the server says it is our turn (200) or the game is over (500).
async fn wait_for_turn(client: &GameClient, name: &str, poll_interval: Duration) -> Result<ServerReply> {
    loop {
        let reply = client.move_status(name).await?;
        if reply.is_ok() || reply.is_game_over() {
            return Ok(reply);
        }
        debug!(status = reply.status(), "Not our turn yet");
        tokio::time::sleep(poll_interval).await;
    }
}
