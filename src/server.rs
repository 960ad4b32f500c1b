//! HTTP transport for the backgammon engine.
//!
//! The transport resolves wire requests into session actions and serializes
//! the results back out. It holds no game logic: every legality decision is
//! made by the engine behind the session layer. Clients observe opponent
//! actions by polling the session state endpoint.

use crate::games::backgammon::Color;
use crate::session::{ErrorCode, PlayerId, PublicState, SessionError, SessionManager};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Builds the application router over a shared session registry.
pub fn router(sessions: SessionManager) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/health", get(health))
        .route("/games", post(create_game))
        .route("/games/{id}", get(game_state).delete(leave_game))
        .route("/games/{id}/join", post(join_game))
        .route("/games/{id}/roll", post(roll_dice))
        .route("/games/{id}/move", post(move_piece))
        .route("/games/{id}/end-turn", post(end_turn))
        .with_state(sessions)
}

// ─────────────────────────────────────────────────────────────
//  Wire types
// ─────────────────────────────────────────────────────────────

/// Request carrying only the acting participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    /// The acting participant.
    pub player_id: PlayerId,
}

/// Request proposing a move.
///
/// `from` and `to` are raw point integers; `-1` as `from` enters from the
/// bar, and `24` (White) or `-1` (Black) as `to` bears off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// The acting participant.
    pub player_id: PlayerId,
    /// Raw source point.
    pub from: i32,
    /// Raw destination point.
    pub to: i32,
}

/// Response to a dice roll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResponse {
    /// The two rolled faces.
    pub dice: [u8; 2],
    /// The color that rolled.
    pub turn: Color,
}

/// Response to an applied move.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    /// The session state after the move.
    pub state: PublicState,
    /// Set when this move bore off the fifteenth checker.
    pub winner: Option<Color>,
}

/// Response to ending a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    /// The color now on turn.
    pub turn: Color,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: &'static str,
    active_games: usize,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    games: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorCode,
    message: String,
}

/// A rejection serialized onto the wire with its reason code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: ErrorCode,
    message: String,
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        let code = error.code();
        let status = match code {
            ErrorCode::GameNotFound => StatusCode::NOT_FOUND,
            ErrorCode::GameFull | ErrorCode::NotYourTurn => StatusCode::CONFLICT,
            ErrorCode::MissingParameter => StatusCode::BAD_REQUEST,
            ErrorCode::NoDiceAvailable
            | ErrorCode::IllegalMove
            | ErrorCode::DieNotAvailable => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            code,
            message: error.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: ErrorCode::MissingParameter,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!(code = ?self.code, message = %self.message, "request rejected");
        let body = ErrorBody {
            error: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────
//  Handlers
// ─────────────────────────────────────────────────────────────

async fn status(State(sessions): State<SessionManager>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Backgammon Server Running",
        active_games: sessions.session_count(),
    })
}

async fn health(State(sessions): State<SessionManager>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        games: sessions.session_count(),
    })
}

#[instrument(skip(sessions, payload))]
async fn create_game(
    State(sessions): State<SessionManager>,
    payload: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicState>), ApiError> {
    let Json(request) = payload?;
    let state = sessions.create(request.player_id);
    info!(game_id = %state.game_id, "game created");
    Ok((StatusCode::CREATED, Json(state)))
}

#[instrument(skip(sessions, payload))]
async fn join_game(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    payload: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<Json<PublicState>, ApiError> {
    let Json(request) = payload?;
    let state = sessions.with_session(&id, |session| {
        session.join(request.player_id)?;
        Ok(session.public_state())
    })?;
    info!(game_id = %id, "second player joined");
    Ok(Json(state))
}

#[instrument(skip(sessions))]
async fn game_state(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
) -> Result<Json<PublicState>, ApiError> {
    let state = sessions.with_session(&id, |session| Ok(session.public_state()))?;
    Ok(Json(state))
}

#[instrument(skip(sessions, payload))]
async fn roll_dice(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    payload: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<Json<RollResponse>, ApiError> {
    let Json(request) = payload?;
    let response = sessions.with_session(&id, |session| {
        let dice = session.roll(&request.player_id, &mut rand::thread_rng())?;
        Ok(RollResponse {
            dice: dice.values(),
            turn: session.game().turn(),
        })
    })?;
    Ok(Json(response))
}

#[instrument(skip(sessions, payload))]
async fn move_piece(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<MoveResponse>, ApiError> {
    let Json(request) = payload?;
    let response = sessions.with_session(&id, |session| {
        let applied = session.make_move(&request.player_id, request.from, request.to)?;
        Ok(MoveResponse {
            state: session.public_state(),
            winner: applied.winner(),
        })
    })?;
    if let Some(winner) = response.winner {
        info!(game_id = %id, %winner, "game won");
    }
    Ok(Json(response))
}

#[instrument(skip(sessions, payload))]
async fn end_turn(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    payload: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<Json<TurnResponse>, ApiError> {
    let Json(request) = payload?;
    let turn = sessions.with_session(&id, |session| session.end_turn(&request.player_id))?;
    Ok(Json(TurnResponse { turn }))
}

#[instrument(skip(sessions, payload))]
async fn leave_game(
    State(sessions): State<SessionManager>,
    Path(id): Path<String>,
    payload: Result<Json<PlayerRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    sessions.remove(&id, &request.player_id)?;
    info!(game_id = %id, "participant left, session destroyed");
    Ok(StatusCode::NO_CONTENT)
}
