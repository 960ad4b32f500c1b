//! Core domain types for backgammon.

use serde::{Deserialize, Serialize};

/// Checker color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White moves from low indices toward 24 and bears off past point 23.
    White,
    /// Black moves from high indices toward -1 and bears off past point 0.
    Black,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// One of the 24 board positions.
///
/// Invariant: `checkers == 0` exactly when `owner` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointState {
    /// Number of checkers stacked on the point.
    pub(super) checkers: u8,
    /// Color occupying the point, if any.
    pub(super) owner: Option<Color>,
}

impl PointState {
    /// An unoccupied point.
    pub(super) const EMPTY: PointState = PointState {
        checkers: 0,
        owner: None,
    };

    /// Number of checkers stacked on the point.
    pub fn checkers(&self) -> u8 {
        self.checkers
    }

    /// Color occupying the point, if any.
    pub fn owner(&self) -> Option<Color> {
        self.owner
    }

    /// Whether the point refuses `mover`: two or more opposing checkers.
    pub fn blocks(&self, mover: Color) -> bool {
        matches!(self.owner, Some(o) if o != mover) && self.checkers >= 2
    }

    /// Whether the point holds a lone opposing checker `mover` would hit.
    pub fn blot_against(&self, mover: Color) -> bool {
        matches!(self.owner, Some(o) if o != mover) && self.checkers == 1
    }
}

/// Per-color counter pair, used for the bar and the off tray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCounts {
    white: u8,
    black: u8,
}

impl ColorCounts {
    /// Creates a counter pair.
    pub fn new(white: u8, black: u8) -> Self {
        Self { white, black }
    }

    /// Returns the count for the given color.
    pub fn of(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Adds one checker for the given color.
    pub(super) fn add(&mut self, color: Color) {
        match color {
            Color::White => self.white += 1,
            Color::Black => self.black += 1,
        }
    }

    /// Removes one checker for the given color.
    ///
    /// Removing from an empty counter is a programming error.
    pub(super) fn take(&mut self, color: Color) {
        let count = match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        debug_assert!(*count > 0, "removing a checker from an empty counter");
        *count -= 1;
    }
}
