//! Backgammon server library - server-authoritative rules engine
//!
//! This library maintains the canonical state of concurrent two-player
//! backgammon matches and decides, on every proposed action, whether that
//! action is legal before applying it.
//!
//! # Architecture
//!
//! - **Games**: the pure rules engine (board, dice, legality, turn machine)
//! - **Session**: seats, participant resolution, and the session registry
//! - **Server**: HTTP transport resolving wire requests into engine actions
//!
//! # Example
//!
//! ```
//! use backgammon_server::{Color, Game, Move, MoveSource, MoveTarget};
//!
//! let game = Game::new();
//! assert_eq!(game.turn(), Color::White);
//!
//! // Moves are rejected until the current player rolls.
//! let mut game = game;
//! let action = Move::new(Color::White, MoveSource::Point(0), MoveTarget::Point(3));
//! assert!(game.try_move(action).is_err());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod games;
mod server;
mod session;

// Crate-level exports - engine types
pub use games::backgammon::{
    ActionError, AppliedMove, BAR_SOURCE, BLACK_OFF_TARGET, Board, CHECKERS_PER_COLOR, Color,
    ColorCounts, Dice, DiceError, Game, LayoutError, Move, MoveError, MoveKind, MoveSource,
    MoveTarget, POINT_COUNT, Phase, Pips, PointState, WHITE_OFF_TARGET, check_move,
};

// Crate-level exports - invariants
pub use games::backgammon::invariants;

// Crate-level exports - session management
pub use session::{
    ErrorCode, GameSession, PlayerId, PublicState, Seats, SessionError, SessionId, SessionManager,
};

// Crate-level exports - transport
pub use server::{MoveRequest, MoveResponse, PlayerRequest, RollResponse, TurnResponse, router};
