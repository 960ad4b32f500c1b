//! First-class move actions and their wire encoding.
//!
//! A move is a domain event: the acting color plus a source and a
//! destination. The transport encodes off-board locations as out-of-range
//! point integers; decoding validates them here, at the boundary, so the
//! rules and applier only ever see typed locations.

use super::types::Color;
use serde::{Deserialize, Serialize};

/// Wire sentinel for a move entering from the bar (`from` value).
pub const BAR_SOURCE: i32 = -1;

/// Wire sentinel for a White bear-off destination (`to` value).
pub const WHITE_OFF_TARGET: i32 = 24;

/// Wire sentinel for a Black bear-off destination (`to` value).
pub const BLACK_OFF_TARGET: i32 = -1;

/// Where a move starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    /// Re-entry of a barred checker.
    Bar,
    /// An interior point, 0–23.
    Point(usize),
}

impl MoveSource {
    /// Decodes a raw wire integer: `-1` is the bar, 0–23 a point.
    pub fn from_wire(raw: i32) -> Result<Self, MoveError> {
        match raw {
            BAR_SOURCE => Ok(MoveSource::Bar),
            0..=23 => Ok(MoveSource::Point(raw as usize)),
            _ => Err(MoveError::OutOfRange(raw)),
        }
    }
}

/// Where a move ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    /// Bearing the checker off the board.
    Off,
    /// An interior point, 0–23.
    Point(usize),
}

impl MoveTarget {
    /// Decodes a raw wire integer for the acting color.
    ///
    /// The off sentinel is direction-dependent: `24` for White, `-1` for
    /// Black. The opponent's sentinel is rejected here rather than treated
    /// as a point.
    pub fn from_wire(color: Color, raw: i32) -> Result<Self, MoveError> {
        match (color, raw) {
            (Color::White, WHITE_OFF_TARGET) | (Color::Black, BLACK_OFF_TARGET) => {
                Ok(MoveTarget::Off)
            }
            (_, 0..=23) => Ok(MoveTarget::Point(raw as usize)),
            _ => Err(MoveError::OutOfRange(raw)),
        }
    }
}

/// A proposed move: acting color, source, destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The color making the move.
    pub color: Color,
    /// Where the checker comes from.
    pub from: MoveSource,
    /// Where the checker goes.
    pub to: MoveTarget,
}

impl Move {
    /// Creates a move.
    pub fn new(color: Color, from: MoveSource, to: MoveTarget) -> Self {
        Self { color, from, to }
    }

    /// Decodes a move from raw wire integers for the acting color.
    pub fn from_wire(color: Color, from: i32, to: i32) -> Result<Self, MoveError> {
        Ok(Self {
            color,
            from: MoveSource::from_wire(from)?,
            to: MoveTarget::from_wire(color, to)?,
        })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.color)?;
        match self.from {
            MoveSource::Bar => write!(f, "bar")?,
            MoveSource::Point(p) => write!(f, "{p}")?,
        }
        match self.to {
            MoveTarget::Off => write!(f, " -> off"),
            MoveTarget::Point(p) => write!(f, " -> {p}"),
        }
    }
}

/// Reasons a proposed move is refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// No dice rolled, or every pip already consumed.
    #[display("no dice available")]
    NoDiceAvailable,

    /// The required die value is not in the remaining multiset.
    #[display("die value {_0} is not available")]
    DieNotAvailable(u8),

    /// Checkers on the bar must re-enter before any other move.
    #[display("checkers on the bar must enter first")]
    MustEnterFromBar,

    /// An entry was proposed with no checker on the bar.
    #[display("{_0} has no checker on the bar")]
    BarEmpty(Color),

    /// The source point holds no checker of the acting color.
    #[display("{_0} has no checker on point {_1}")]
    NoChecker(Color, usize),

    /// The move runs against the color's fixed direction of travel.
    #[display("{_0} cannot move that direction")]
    WrongDirection(Color),

    /// The destination holds two or more opposing checkers.
    #[display("point {_0} is blocked")]
    PointBlocked(usize),

    /// Bear-off attempted with a checker outside the home board.
    #[display("all checkers must be home before bearing off")]
    CheckersOutsideHome,

    /// Overshoot bear-off refused: a checker sits farther from home.
    #[display("a checker farther from home must move first")]
    CheckerFartherBack,

    /// Bear-off attempted directly from the bar.
    #[display("cannot bear off from the bar")]
    BearOffFromBar,

    /// A wire integer is neither a point index nor a valid sentinel.
    #[display("{_0} is not a point on the board")]
    OutOfRange(i32),
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_sentinels_decode_per_color() {
        assert_eq!(MoveSource::from_wire(-1), Ok(MoveSource::Bar));
        assert_eq!(MoveSource::from_wire(12), Ok(MoveSource::Point(12)));
        assert_eq!(MoveSource::from_wire(24), Err(MoveError::OutOfRange(24)));

        assert_eq!(MoveTarget::from_wire(Color::White, 24), Ok(MoveTarget::Off));
        assert_eq!(MoveTarget::from_wire(Color::Black, -1), Ok(MoveTarget::Off));
        // The opponent's off sentinel is not a valid target.
        assert_eq!(
            MoveTarget::from_wire(Color::White, -1),
            Err(MoveError::OutOfRange(-1))
        );
        assert_eq!(
            MoveTarget::from_wire(Color::Black, 24),
            Err(MoveError::OutOfRange(24))
        );
    }

    #[test]
    fn test_moves_display_for_logs() {
        let entry = Move::from_wire(Color::White, -1, 1).unwrap();
        assert_eq!(entry.to_string(), "white: bar -> 1");

        let bear_off = Move::from_wire(Color::Black, 3, -1).unwrap();
        assert_eq!(bear_off.to_string(), "black: 3 -> off");
    }
}
