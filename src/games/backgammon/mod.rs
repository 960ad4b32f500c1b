//! Backgammon rules engine.
//!
//! Pure game logic: board model, dice, move legality, move application,
//! and turn sequencing. Nothing in this module knows about sessions,
//! participants, or the transport.

mod action;
mod board;
mod dice;
mod game;
pub mod invariants;
mod rules;
mod types;

pub use action::{
    BAR_SOURCE, BLACK_OFF_TARGET, Move, MoveError, MoveSource, MoveTarget, WHITE_OFF_TARGET,
};
pub use board::{Board, CHECKERS_PER_COLOR, LayoutError, POINT_COUNT};
pub use dice::{Dice, DiceError, Pips};
pub use game::{ActionError, AppliedMove, Game, Phase};
pub use rules::{MoveKind, check_move};
pub use types::{Color, ColorCounts, PointState};
