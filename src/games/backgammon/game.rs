//! The match engine: turn sequencing, move application, win detection.
//!
//! `Game` owns one match worth of state (board, turn, dice). Every action
//! is checked against the turn and phase before the rules module classifies
//! it; rejections leave the state untouched. The applier trusts the
//! classification completely and is only reachable through it.

use super::action::{Move, MoveError};
use super::board::{Board, CHECKERS_PER_COLOR};
use super::dice::{Dice, DiceError, Pips};
use super::invariants::{BoardInvariants, InvariantSet};
use super::rules::{self, MoveKind};
use super::types::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Where a match stands between actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The current player has not rolled yet.
    AwaitingRoll,
    /// Dice are out; the current player is moving.
    Moving,
    /// Terminal: a color bore off all fifteen checkers.
    Won(Color),
}

/// Errors sequencing an action against the turn state machine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The acting color does not own the current turn.
    #[display("it is {_0}'s turn")]
    NotYourTurn(Color),

    /// The match already ended.
    #[display("the game is over, {_0} won")]
    GameOver(Color),

    /// Roll attempted while dice are still out.
    #[display("dice already rolled this turn")]
    AlreadyRolled,

    /// End-turn attempted before rolling.
    #[display("roll the dice before ending the turn")]
    NotRolled,

    /// The move itself is illegal.
    #[display("{_0}")]
    Move(MoveError),
}

impl std::error::Error for ActionError {}

impl From<MoveError> for ActionError {
    fn from(error: MoveError) -> Self {
        Self::Move(error)
    }
}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    kind: MoveKind,
    winner: Option<Color>,
}

impl AppliedMove {
    /// How the move was classified and which die it consumed.
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The winning color, when this move bore off the fifteenth checker.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }
}

/// One match worth of engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    dice: Option<Dice>,
    pips: Pips,
    phase: Phase,
}

impl Game {
    /// Creates a match on the standard starting layout, White to roll.
    #[instrument]
    pub fn new() -> Self {
        Self::resume(Board::new(), Color::White)
    }

    /// Resumes a match at an arbitrary position, awaiting a roll.
    pub fn resume(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            dice: None,
            pips: Pips::empty(),
            phase: Phase::AwaitingRoll,
        }
    }

    /// Resumes a match mid-turn with dice out.
    ///
    /// `remaining` holds the pips not yet consumed this turn and must be a
    /// sub-multiset of what `dice` granted.
    pub fn resume_rolled(
        board: Board,
        turn: Color,
        dice: Dice,
        remaining: &[u8],
    ) -> Result<Self, DiceError> {
        let pips = Pips::resume(dice, remaining)?;
        Ok(Self {
            board,
            turn,
            dice: Some(dice),
            pips,
            phase: Phase::Moving,
        })
    }

    /// The board position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The color owning the current turn.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Where the match stands.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The dice rolled this turn, if any.
    pub fn dice(&self) -> Option<Dice> {
        self.dice
    }

    /// The pips still consumable this turn.
    pub fn pips(&self) -> &Pips {
        &self.pips
    }

    /// Rolls the dice for `color`.
    ///
    /// Only the current player may roll, and only once per turn. A double
    /// grants four pips, any other roll the two faces.
    #[instrument(skip(self, rng), fields(turn = %self.turn))]
    pub fn roll<R: Rng>(&mut self, color: Color, rng: &mut R) -> Result<Dice, ActionError> {
        if let Phase::Won(winner) = self.phase {
            return Err(ActionError::GameOver(winner));
        }
        if color != self.turn {
            return Err(ActionError::NotYourTurn(self.turn));
        }
        if self.phase == Phase::Moving {
            return Err(ActionError::AlreadyRolled);
        }

        let dice = Dice::roll(rng);
        self.dice = Some(dice);
        self.pips = dice.pips();
        self.phase = Phase::Moving;

        info!(%color, %dice, pips = ?self.pips.as_slice(), "dice rolled");
        Ok(dice)
    }

    /// Attempts a move for the acting color.
    ///
    /// Delegates legality to [`rules::check_move`]; on success applies the
    /// side effects, consumes the resolved die, and reports whether the
    /// move won the match. Rejections leave the state unchanged.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn try_move(&mut self, action: Move) -> Result<AppliedMove, ActionError> {
        if let Phase::Won(winner) = self.phase {
            return Err(ActionError::GameOver(winner));
        }
        if action.color != self.turn {
            return Err(ActionError::NotYourTurn(self.turn));
        }

        let kind = rules::check_move(&self.board, &self.pips, &action)?;
        self.apply(action.color, kind);

        debug_assert!(
            BoardInvariants::check_all(&self.board).is_ok(),
            "applied move broke a board invariant"
        );

        let winner = (self.board.off(action.color) == CHECKERS_PER_COLOR).then(|| {
            self.phase = Phase::Won(action.color);
            action.color
        });

        info!(%action, ?kind, winner = ?winner, "move applied");
        Ok(AppliedMove { kind, winner })
    }

    /// Ends the current player's turn, handing the dice to the opponent.
    ///
    /// Unused pips are forfeited; the engine never forces a player to
    /// exhaust playable moves first.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn end_turn(&mut self, color: Color) -> Result<Color, ActionError> {
        if let Phase::Won(winner) = self.phase {
            return Err(ActionError::GameOver(winner));
        }
        if color != self.turn {
            return Err(ActionError::NotYourTurn(self.turn));
        }
        if self.phase == Phase::AwaitingRoll {
            return Err(ActionError::NotRolled);
        }

        self.dice = None;
        self.pips.clear();
        self.turn = self.turn.opponent();
        self.phase = Phase::AwaitingRoll;

        info!(next = %self.turn, "turn ended");
        Ok(self.turn)
    }

    /// Runs the side effects of a classified move.
    fn apply(&mut self, color: Color, kind: MoveKind) {
        let die = match kind {
            MoveKind::Enter { point, die, hit } => {
                self.board.pop_bar(color);
                if hit {
                    self.board.remove_checker(point);
                    self.board.push_bar(color.opponent());
                }
                self.board.add_checker(point, color);
                die
            }
            MoveKind::Step { from, to, die, hit } => {
                self.board.remove_checker(from);
                if hit {
                    self.board.remove_checker(to);
                    self.board.push_bar(color.opponent());
                }
                self.board.add_checker(to, color);
                die
            }
            MoveKind::BearOff { point, die } => {
                self.board.remove_checker(point);
                self.board.push_off(color);
                die
            }
        };

        let consumed = self.pips.consume(die);
        debug_assert!(consumed, "classified move named a die outside the multiset");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
