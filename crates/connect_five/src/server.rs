//! HTTP transport for the game session.
//!
//! | Route                | Query                    |
//! |----------------------|--------------------------|
//! | `PUT /join`          | `playerName`, `discColor`|
//! | `POST /make-move`    | `playerName`, `column`   |
//! | `GET /move-status`   | `playerName`             |
//! | `POST /disconnect`   | `playerName`             |
//! | `GET /health`        |                          |
//!
//! Parameters are validated and names trimmed here; everything else,
//! including whether the name is seated, is decided by [`Session`] under
//! its lock.

use crate::config::ServerConfig;
use crate::reply::{Outcome, Reply, Status};
use crate::session::Session;
use axum::{
    Router,
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use connect_five_rules::{Column, Disc};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Query for `PUT /join`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinParams {
    /// Display name.
    pub player_name: String,
    /// `Red` or `Blue`.
    pub disc_color: String,
}

/// Query for `POST /make-move`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveParams {
    /// Display name.
    pub player_name: String,
    /// Column number, 1 through 9. Kept raw so a bad value gets a game reply.
    pub column: String,
}

/// Query naming the calling player.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerParams {
    /// Display name.
    pub player_name: String,
}

/// Maps a reply status onto its HTTP status code.
pub fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Ok => StatusCode::OK,
        Status::Accepted => StatusCode::ACCEPTED,
        Status::BadRequest => StatusCode::BAD_REQUEST,
        Status::Unauthorized => StatusCode::UNAUTHORIZED,
        Status::Conflict => StatusCode::CONFLICT,
        Status::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (status_code(self.status()), self.body()).into_response()
    }
}

/// Builds the router over a shared session.
pub fn router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/join", put(join))
        .route("/make-move", post(make_move))
        .route("/move-status", get(move_status))
        .route("/disconnect", post(disconnect))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(session)
}

/// Serves the router on `listener` until `shutdown` resolves.
#[instrument(skip_all)]
pub async fn run<F>(listener: TcpListener, session: Arc<Session>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Game server ready");
    }
    axum::serve(listener, router(session))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Binds according to `config` and serves until Ctrl-C.
#[instrument(skip_all, fields(bind = %config.bind_address()))]
pub async fn serve(config: &ServerConfig, session: Arc<Session>) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    run(listener, session, shutdown_signal()).await?;
    info!("Game server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

fn validate_name(raw: &str) -> Result<&str, Outcome> {
    let name = raw.trim();
    if name.is_empty() {
        Err(Outcome::InvalidName)
    } else {
        Ok(name)
    }
}

#[instrument(skip(session), fields(name = %params.player_name, color = %params.disc_color))]
async fn join(State(session): State<Arc<Session>>, Query(params): Query<JoinParams>) -> Reply {
    let name = match validate_name(&params.player_name) {
        Ok(name) => name,
        Err(outcome) => return outcome.into(),
    };
    let Ok(disc) = params.disc_color.parse::<Disc>() else {
        return Outcome::InvalidColor {
            value: params.disc_color.clone(),
        }
        .into();
    };
    session.join(name, disc)
}

#[instrument(skip(session), fields(name = %params.player_name, column = %params.column))]
async fn make_move(State(session): State<Arc<Session>>, Query(params): Query<MoveParams>) -> Reply {
    let column = params
        .column
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(Column::from_one_based);
    let Some(column) = column else {
        return Outcome::InvalidColumn {
            value: params.column.clone(),
        }
        .into();
    };
    session.make_move(params.player_name.trim(), column)
}

#[instrument(skip(session), fields(name = %params.player_name))]
async fn move_status(
    State(session): State<Arc<Session>>,
    Query(params): Query<PlayerParams>,
) -> Reply {
    session.move_status(params.player_name.trim())
}

#[instrument(skip(session), fields(name = %params.player_name))]
async fn disconnect(
    State(session): State<Arc<Session>>,
    Query(params): Query<PlayerParams>,
) -> Reply {
    session.disconnect(params.player_name.trim())
}

async fn health() -> &'static str {
    "ok"
}
