//! Command-line interface for connect_five.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Connect Five - two-player five-in-a-row over HTTP
#[derive(Parser, Debug)]
#[command(name = "connect_five")]
#[command(about = "Two-player connect-five server and terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Optional TOML settings file
    #[arg(short, long, global = true, env = "CONNECT_FIVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Join a game from the terminal
    Play {
        /// Game server URL
        #[arg(long)]
        server_url: Option<String>,

        /// Milliseconds between status polls
        #[arg(long)]
        poll_interval_ms: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from(["connect_five", "serve", "--port", "9090"]).unwrap();
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9090));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_play_with_global_config() {
        let cli = Cli::try_parse_from([
            "connect_five",
            "play",
            "--server-url",
            "http://game.local:8080",
            "--config",
            "settings.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("settings.toml")));
        match cli.command {
            Command::Play { server_url, .. } => {
                assert_eq!(server_url.as_deref(), Some("http://game.local:8080"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["connect_five"]).is_err());
    }
}
