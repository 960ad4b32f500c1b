//! Game session management: seats, participant resolution, and the
//! session registry.
//!
//! A session pairs one engine [`Game`] with the participants seated at it.
//! The registry hands out per-session locks so each session processes at
//! most one action at a time while distinct sessions proceed in parallel.

use crate::games::backgammon::{
    ActionError, AppliedMove, Color, Dice, Game, Move, MoveError, Phase, PointState,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Unique identifier for a participant, assigned by the transport.
pub type PlayerId = String;

/// Machine-readable rejection codes surfaced to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The acting participant does not own the current turn (or seat).
    NotYourTurn,
    /// No session exists under the given identifier.
    GameNotFound,
    /// Both seats are already taken.
    GameFull,
    /// No dice rolled, or every pip already consumed.
    NoDiceAvailable,
    /// The action is not legal in the current state.
    IllegalMove,
    /// The required die value is not available.
    DieNotAvailable,
    /// A required request field is missing or malformed.
    MissingParameter,
}

/// Errors acting on a session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No session exists under the given identifier.
    #[display("game {_0} not found")]
    GameNotFound(SessionId),

    /// Both seats are already taken.
    #[display("game is full")]
    GameFull,

    /// A game action arrived before the second player joined.
    #[display("waiting for a second player")]
    NotStarted,

    /// The acting participant is not seated at this game.
    #[display("player {_0} is not seated at this game")]
    UnknownPlayer(PlayerId),

    /// The engine refused the action.
    #[display("{_0}")]
    Action(ActionError),
}

impl std::error::Error for SessionError {}

impl From<ActionError> for SessionError {
    fn from(error: ActionError) -> Self {
        Self::Action(error)
    }
}

impl From<MoveError> for SessionError {
    fn from(error: MoveError) -> Self {
        Self::Action(ActionError::Move(error))
    }
}

impl SessionError {
    /// Maps the rejection onto its wire reason code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::GameNotFound(_) => ErrorCode::GameNotFound,
            Self::GameFull => ErrorCode::GameFull,
            Self::NotStarted => ErrorCode::IllegalMove,
            Self::UnknownPlayer(_) => ErrorCode::NotYourTurn,
            Self::Action(ActionError::NotYourTurn(_)) => ErrorCode::NotYourTurn,
            Self::Action(ActionError::Move(MoveError::NoDiceAvailable)) => {
                ErrorCode::NoDiceAvailable
            }
            Self::Action(ActionError::Move(MoveError::DieNotAvailable(_))) => {
                ErrorCode::DieNotAvailable
            }
            Self::Action(_) => ErrorCode::IllegalMove,
        }
    }
}

/// Who is seated at a session.
///
/// The seating state is explicit: a session is either waiting for its
/// second player or full, never a pair of maybe-set identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seats {
    /// Only the creator is seated; game actions are not accepted yet.
    AwaitingOpponent {
        /// The creator, seated as White.
        white: PlayerId,
    },
    /// Both seats taken; the match is live.
    Full {
        /// The creator, seated as White.
        white: PlayerId,
        /// The joiner, seated as Black.
        black: PlayerId,
    },
}

/// Public snapshot of a session, safe to broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicState {
    /// Session identifier.
    pub game_id: SessionId,
    /// All 24 points in board order.
    pub board: Vec<PointState>,
    /// White checkers on the bar.
    pub white_bar: u8,
    /// Black checkers on the bar.
    pub black_bar: u8,
    /// White checkers borne off.
    pub white_off: u8,
    /// Black checkers borne off.
    pub black_off: u8,
    /// The color owning the current turn.
    pub turn: Color,
    /// The dice rolled this turn, if any.
    pub dice: Option<[u8; 2]>,
    /// Die values still consumable this turn.
    pub available_moves: Vec<u8>,
    /// Where the match stands.
    pub phase: Phase,
    /// The participant seated as White.
    pub white_player: PlayerId,
    /// The participant seated as Black, once joined.
    pub black_player: Option<PlayerId>,
}

/// A game session: one engine plus its seated participants.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    seats: Seats,
    game: Game,
}

impl GameSession {
    /// Creates a session with the creator seated as White.
    #[instrument]
    pub fn new(id: SessionId, creator: PlayerId) -> Self {
        info!(session_id = %id, creator = %creator, "creating game session");
        Self {
            id,
            seats: Seats::AwaitingOpponent { white: creator },
            game: Game::new(),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The engine state, read-only.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Seats the second participant as Black.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn join(&mut self, player: PlayerId) -> Result<Color, SessionError> {
        match &self.seats {
            Seats::AwaitingOpponent { white } => {
                info!(player = %player, "second player seated as black");
                self.seats = Seats::Full {
                    white: white.clone(),
                    black: player,
                };
                Ok(Color::Black)
            }
            Seats::Full { .. } => {
                warn!(player = %player, "join refused, session already full");
                Err(SessionError::GameFull)
            }
        }
    }

    /// Whether the participant is seated at this session.
    pub fn is_participant(&self, player: &str) -> bool {
        match &self.seats {
            Seats::AwaitingOpponent { white } => white == player,
            Seats::Full { white, black } => white == player || black == player,
        }
    }

    /// Resolves a participant to a seated color.
    pub fn color_of(&self, player: &str) -> Option<Color> {
        match &self.seats {
            Seats::AwaitingOpponent { .. } => None,
            Seats::Full { white, black } => {
                if white == player {
                    Some(Color::White)
                } else if black == player {
                    Some(Color::Black)
                } else {
                    None
                }
            }
        }
    }

    /// Resolves a participant for a game action, requiring a full table.
    fn seated(&self, player: &str) -> Result<Color, SessionError> {
        match &self.seats {
            Seats::AwaitingOpponent { .. } => {
                debug!(player, "action before second player joined");
                Err(SessionError::NotStarted)
            }
            Seats::Full { .. } => self
                .color_of(player)
                .ok_or_else(|| SessionError::UnknownPlayer(player.to_string())),
        }
    }

    /// Rolls the dice for the acting participant.
    #[instrument(skip(self, rng), fields(session_id = %self.id))]
    pub fn roll<R: Rng>(&mut self, player: &str, rng: &mut R) -> Result<Dice, SessionError> {
        let color = self.seated(player)?;
        Ok(self.game.roll(color, rng)?)
    }

    /// Attempts a move, decoding the raw wire points at this boundary.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn make_move(
        &mut self,
        player: &str,
        from: i32,
        to: i32,
    ) -> Result<AppliedMove, SessionError> {
        let color = self.seated(player)?;
        let action = Move::from_wire(color, from, to)?;
        Ok(self.game.try_move(action)?)
    }

    /// Ends the acting participant's turn.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn end_turn(&mut self, player: &str) -> Result<Color, SessionError> {
        let color = self.seated(player)?;
        Ok(self.game.end_turn(color)?)
    }

    /// Builds the public snapshot broadcast after every action.
    pub fn public_state(&self) -> PublicState {
        let board = self.game.board();
        let (white_player, black_player) = match &self.seats {
            Seats::AwaitingOpponent { white } => (white.clone(), None),
            Seats::Full { white, black } => (white.clone(), Some(black.clone())),
        };
        PublicState {
            game_id: self.id.clone(),
            board: board.points().to_vec(),
            white_bar: board.bar(Color::White),
            black_bar: board.bar(Color::Black),
            white_off: board.off(Color::White),
            black_off: board.off(Color::Black),
            turn: self.game.turn(),
            dice: self.game.dice().map(|d| d.values()),
            available_moves: self.game.pips().as_slice().to_vec(),
            phase: self.game.phase(),
            white_player,
            black_player,
        }
    }
}

/// Owns every live session, keyed by generated identifier.
///
/// The registry lock is held only to resolve an identifier; each session
/// carries its own lock, so actions against one session serialize while
/// independent sessions run in parallel.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<GameSession>>>>>,
}

impl SessionManager {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("creating session manager");
        Self::default()
    }

    /// Creates a session for `creator` and returns its initial state.
    #[instrument(skip(self))]
    pub fn create(&self, creator: PlayerId) -> PublicState {
        let mut sessions = self.sessions.write().unwrap();

        let mut rng = rand::thread_rng();
        let mut id = random_id(&mut rng);
        while sessions.contains_key(&id) {
            id = random_id(&mut rng);
        }

        let session = GameSession::new(id.clone(), creator);
        let state = session.public_state();
        sessions.insert(id.clone(), Arc::new(Mutex::new(session)));

        info!(session_id = %id, count = sessions.len(), "session created");
        state
    }

    /// Runs `f` against the session under its own lock.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let session = {
            let sessions = self.sessions.read().unwrap();
            sessions
                .get(id)
                .cloned()
                .ok_or_else(|| SessionError::GameNotFound(id.to_string()))?
        };
        let mut session = session.lock().unwrap();
        f(&mut session)
    }

    /// Tears down a session on participant departure.
    ///
    /// Only a seated participant may destroy the session.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str, player: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().unwrap();

        let session = sessions
            .get(id)
            .ok_or_else(|| SessionError::GameNotFound(id.to_string()))?;
        if !session.lock().unwrap().is_participant(player) {
            warn!(player, "teardown refused for non-participant");
            return Err(SessionError::UnknownPlayer(player.to_string()));
        }

        sessions.remove(id);
        info!(session_id = id, count = sessions.len(), "session destroyed");
        Ok(())
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

/// Generates a human-readable session id of the form `ABC-DEF-GHI`.
fn random_id<R: Rng>(rng: &mut R) -> SessionId {
    let mut id = String::with_capacity(11);
    for group in 0..3 {
        if group > 0 {
            id.push('-');
        }
        for _ in 0..3 {
            id.push(rng.gen_range(b'A'..=b'Z') as char);
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_ids_match_the_wire_format() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let id = random_id(&mut rng);
            assert_eq!(id.len(), 11);
            let groups: Vec<&str> = id.split('-').collect();
            assert_eq!(groups.len(), 3);
            for group in groups {
                assert!(group.chars().all(|c| c.is_ascii_uppercase()));
            }
        }
    }

    #[test]
    fn test_color_resolution_prefers_the_white_seat() {
        let mut session = GameSession::new("AAA-AAA-AAA".into(), "p1".into());
        session.join("p1".into()).unwrap();
        assert_eq!(session.color_of("p1"), Some(Color::White));
    }
}
