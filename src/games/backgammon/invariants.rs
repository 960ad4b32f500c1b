//! First-class board invariants.
//!
//! Invariants are logical properties that must hold for every reachable
//! board. They are testable independently and re-checked as debug
//! postconditions after every applied move.

use super::board::{Board, CHECKERS_PER_COLOR};
use super::types::Color;
use strum::IntoEnumIterator;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: each color always owns fifteen checkers across the points,
/// the bar, and the off tray.
pub struct CheckerConservationInvariant;

impl Invariant<Board> for CheckerConservationInvariant {
    fn holds(board: &Board) -> bool {
        Color::iter().all(|color| board.total_in_play(color) == u16::from(CHECKERS_PER_COLOR))
    }

    fn description() -> &'static str {
        "Each color keeps fifteen checkers across points, bar, and off"
    }
}

/// Invariant: a point is owned exactly when it holds checkers.
pub struct PointOwnershipInvariant;

impl Invariant<Board> for PointOwnershipInvariant {
    fn holds(board: &Board) -> bool {
        board
            .points()
            .iter()
            .all(|p| (p.checkers() == 0) == p.owner().is_none())
    }

    fn description() -> &'static str {
        "A point is owned exactly when checkers sit on it"
    }
}

/// All board invariants as a composable set.
pub type BoardInvariants = (CheckerConservationInvariant, PointOwnershipInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::backgammon::types::ColorCounts;

    #[test]
    fn test_invariants_hold_for_starting_board() {
        let board = Board::new();
        assert!(CheckerConservationInvariant::holds(&board));
        assert!(PointOwnershipInvariant::holds(&board));
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariants_hold_for_layouts_with_bar_and_off() {
        let board = Board::from_layout(
            &[(3, Color::White, 12), (20, Color::Black, 14)],
            ColorCounts::new(2, 1),
            ColorCounts::new(1, 0),
        )
        .unwrap();
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_conservation_detects_a_lost_checker() {
        let mut board = Board::new();
        // Corrupt the board through the low-level mutators.
        board.remove_checker(0);
        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(
            violations,
            vec![InvariantViolation::new(
                CheckerConservationInvariant::description()
            )]
        );
    }

    #[test]
    fn test_mutators_keep_ownership_consistent() {
        let mut board = Board::new();
        board.add_checker(10, Color::White);
        board.add_checker(10, Color::White);
        board.remove_checker(0);
        board.remove_checker(0);
        // Point 0 emptied out and lost its owner along the way.
        assert_eq!(board.point(0).owner(), None);
        assert!(BoardInvariants::check_all(&board).is_ok());
    }
}
