//! HTTP client for the game server.

use connect_five_rules::Disc;
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use reqwest::{Method, Url};
use tracing::{debug, instrument};

/// Status code and body of a server reply.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ServerReply {
    /// HTTP status code.
    status: u16,
    /// Response body.
    message: String,
}

impl ServerReply {
    /// Creates a reply.
    pub fn new(status: u16, message: String) -> Self {
        Self { status, message }
    }

    /// 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// 500, the server's way of saying the game is over for this player.
    pub fn is_game_over(&self) -> bool {
        self.status == 500
    }
}

/// Failure to reach the server or read its answer.
///
/// Game outcomes, including refusals, come back as [`ServerReply`] and are
/// never reported through this type.
#[derive(Debug, Display, Error, From)]
pub enum ClientError {
    /// The base URL could not be combined with a route.
    #[display("Invalid server URL: {}", _0)]
    #[from(ignore)]
    Url(#[error(not(source))] String),
    /// Connection, timeout or body read failure.
    #[display("Could not reach the server: {}", _0)]
    Transport(reqwest::Error),
}

/// Thin wrapper over the four game routes.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: reqwest::Client,
}

impl GameClient {
    /// Creates a client for the server at `base_url`.
    #[instrument]
    pub fn new(base_url: impl Into<String> + std::fmt::Debug) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `PUT /join`.
    #[instrument(skip(self))]
    pub async fn join(&self, name: &str, disc: Disc) -> Result<ServerReply, ClientError> {
        let color = disc.to_string();
        self.send(
            Method::PUT,
            "join",
            &[("playerName", name), ("discColor", color.as_str())],
        )
        .await
    }

    /// `POST /make-move` with a 1-based column.
    #[instrument(skip(self))]
    pub async fn make_move(&self, name: &str, column: usize) -> Result<ServerReply, ClientError> {
        let column = column.to_string();
        self.send(
            Method::POST,
            "make-move",
            &[("playerName", name), ("column", column.as_str())],
        )
        .await
    }

    /// `GET /move-status`.
    #[instrument(skip(self))]
    pub async fn move_status(&self, name: &str) -> Result<ServerReply, ClientError> {
        self.send(Method::GET, "move-status", &[("playerName", name)])
            .await
    }

    /// `POST /disconnect`.
    #[instrument(skip(self))]
    pub async fn disconnect(&self, name: &str) -> Result<ServerReply, ClientError> {
        self.send(Method::POST, "disconnect", &[("playerName", name)])
            .await
    }

    async fn send(
        &self,
        method: Method,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<ServerReply, ClientError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, route))
            .map_err(|e| ClientError::Url(e.to_string()))?;
        url.query_pairs_mut().extend_pairs(params);

        let response = self.client.request(method, url).send().await?;
        let status = response.status().as_u16();
        let message = response.text().await?;
        debug!(status, route, "Server replied");
        Ok(ServerReply::new(status, message))
    }
}
