//! Move legality: classification of a proposed move against the current
//! board and remaining dice.
//!
//! `check_move` is the single gate every move passes through. It never
//! mutates anything; on success it returns a fully resolved [`MoveKind`]
//! telling the applier which side effects to run and which die to consume.

use super::action::{Move, MoveError, MoveSource, MoveTarget};
use super::board::{Board, POINT_COUNT};
use super::dice::Pips;
use super::types::Color;
use tracing::instrument;

/// A legal move, classified, with the die the applier must consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Re-entry of a barred checker onto `point`.
    Enter {
        /// Destination point of the entry.
        point: usize,
        /// Die value consumed.
        die: u8,
        /// Whether a lone opposing checker is hit to the bar.
        hit: bool,
    },
    /// An interior move from `from` to `to`.
    Step {
        /// Source point.
        from: usize,
        /// Destination point.
        to: usize,
        /// Die value consumed.
        die: u8,
        /// Whether a lone opposing checker is hit to the bar.
        hit: bool,
    },
    /// Bearing a checker off from `point`.
    BearOff {
        /// Source point.
        point: usize,
        /// Die value consumed: the exact distance, or the largest
        /// available die on a permitted overshoot.
        die: u8,
    },
}

/// Decides whether a proposed move is legal.
///
/// Preconditions are checked in a fixed order; the first failure wins:
/// dice availability, then bar precedence, then the per-kind rules.
#[instrument(skip(board, pips))]
pub fn check_move(board: &Board, pips: &Pips, action: &Move) -> Result<MoveKind, MoveError> {
    if pips.is_empty() {
        return Err(MoveError::NoDiceAvailable);
    }

    // A barred checker must re-enter before anything else moves.
    if board.bar(action.color) > 0 && action.from != MoveSource::Bar {
        return Err(MoveError::MustEnterFromBar);
    }

    match (action.from, action.to) {
        (MoveSource::Bar, MoveTarget::Point(to)) => check_entry(board, pips, action.color, to),
        (MoveSource::Bar, MoveTarget::Off) => Err(MoveError::BearOffFromBar),
        (MoveSource::Point(from), MoveTarget::Off) => {
            check_bear_off(board, pips, action.color, from)
        }
        (MoveSource::Point(from), MoveTarget::Point(to)) => {
            check_step(board, pips, action.color, from, to)
        }
    }
}

/// Entry distance from the bar: 1 at the far end of the opponent's home,
/// so `to + 1` for White and `24 - to` for Black.
fn entry_distance(color: Color, to: usize) -> u8 {
    match color {
        Color::White => (to + 1) as u8,
        Color::Black => (POINT_COUNT - to) as u8,
    }
}

fn check_entry(board: &Board, pips: &Pips, color: Color, to: usize) -> Result<MoveKind, MoveError> {
    if board.bar(color) == 0 {
        return Err(MoveError::BarEmpty(color));
    }

    let die = entry_distance(color, to);
    if !pips.contains(die) {
        return Err(MoveError::DieNotAvailable(die));
    }

    let destination = board.point(to);
    if destination.blocks(color) {
        return Err(MoveError::PointBlocked(to));
    }

    Ok(MoveKind::Enter {
        point: to,
        die,
        hit: destination.blot_against(color),
    })
}

fn check_bear_off(
    board: &Board,
    pips: &Pips,
    color: Color,
    from: usize,
) -> Result<MoveKind, MoveError> {
    if !board.all_in_home(color) {
        return Err(MoveError::CheckersOutsideHome);
    }
    if board.point(from).owner() != Some(color) {
        return Err(MoveError::NoChecker(color, from));
    }

    let distance = match color {
        Color::White => (POINT_COUNT - from) as u8,
        Color::Black => (from + 1) as u8,
    };
    if pips.contains(distance) {
        return Ok(MoveKind::BearOff {
            point: from,
            die: distance,
        });
    }

    let Some(largest) = pips.largest() else {
        return Err(MoveError::NoDiceAvailable);
    };
    if distance > largest {
        return Err(MoveError::DieNotAvailable(distance));
    }
    // Overshoot: permitted only for the checker farthest from home.
    if board.checker_farther_from_home(color, from) {
        return Err(MoveError::CheckerFartherBack);
    }
    Ok(MoveKind::BearOff {
        point: from,
        die: largest,
    })
}

fn check_step(
    board: &Board,
    pips: &Pips,
    color: Color,
    from: usize,
    to: usize,
) -> Result<MoveKind, MoveError> {
    let source = board.point(from);
    if source.owner() != Some(color) {
        return Err(MoveError::NoChecker(color, from));
    }

    // White travels toward 23, Black toward 0.
    let distance = match color {
        Color::White => {
            if to <= from {
                return Err(MoveError::WrongDirection(color));
            }
            (to - from) as u8
        }
        Color::Black => {
            if to >= from {
                return Err(MoveError::WrongDirection(color));
            }
            (from - to) as u8
        }
    };
    if !pips.contains(distance) {
        return Err(MoveError::DieNotAvailable(distance));
    }

    let destination = board.point(to);
    if destination.blocks(color) {
        return Err(MoveError::PointBlocked(to));
    }

    Ok(MoveKind::Step {
        from,
        to,
        die: distance,
        hit: destination.blot_against(color),
    })
}
