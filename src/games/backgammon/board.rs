//! Board model: 24 points plus the bar and the off tray.
//!
//! The board is pure data. Mutators never check move legality (that is the
//! rules module's job); they only guard the low-level bookkeeping that keeps
//! the checker-conservation invariant intact across an applied move.

use super::types::{Color, ColorCounts, PointState};
use serde::{Deserialize, Serialize};

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// Checkers each color starts (and always owns) in total.
pub const CHECKERS_PER_COLOR: u8 = 15;

/// Board state: point array plus per-color bar and off counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    points: [PointState; POINT_COUNT],
    bar: ColorCounts,
    off: ColorCounts,
}

/// Errors building a board from an explicit layout.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LayoutError {
    /// A placement names a point outside 0–23.
    #[display("point {_0} is outside 0-23")]
    PointOutOfRange(usize),
    /// The same point appears twice in the layout.
    #[display("point {_0} is listed twice")]
    DuplicatePoint(usize),
    /// A placement puts zero checkers on a point.
    #[display("point {_0} is listed with zero checkers")]
    EmptyPlacement(usize),
    /// A color's points, bar, and off do not sum to fifteen.
    #[display("{_0} has {_1} checkers in play, expected {CHECKERS_PER_COLOR}")]
    WrongTotal(Color, u16),
}

impl std::error::Error for LayoutError {}

impl Board {
    /// Creates the standard backgammon starting layout.
    pub fn new() -> Self {
        let mut points = [PointState::EMPTY; POINT_COUNT];

        points[0] = PointState { checkers: 2, owner: Some(Color::White) };
        points[11] = PointState { checkers: 5, owner: Some(Color::White) };
        points[16] = PointState { checkers: 3, owner: Some(Color::White) };
        points[18] = PointState { checkers: 5, owner: Some(Color::White) };

        points[23] = PointState { checkers: 2, owner: Some(Color::Black) };
        points[12] = PointState { checkers: 5, owner: Some(Color::Black) };
        points[7] = PointState { checkers: 3, owner: Some(Color::Black) };
        points[5] = PointState { checkers: 5, owner: Some(Color::Black) };

        Self {
            points,
            bar: ColorCounts::default(),
            off: ColorCounts::default(),
        }
    }

    /// Builds a board from an explicit position.
    ///
    /// `checkers` lists occupied points as `(point, color, count)`; points
    /// not listed are empty. The layout is validated: indices in range, no
    /// point listed twice, no zero placements, and each color's points plus
    /// bar plus off summing to fifteen.
    pub fn from_layout(
        checkers: &[(usize, Color, u8)],
        bar: ColorCounts,
        off: ColorCounts,
    ) -> Result<Self, LayoutError> {
        let mut points = [PointState::EMPTY; POINT_COUNT];

        for &(point, color, count) in checkers {
            if point >= POINT_COUNT {
                return Err(LayoutError::PointOutOfRange(point));
            }
            if points[point] != PointState::EMPTY {
                return Err(LayoutError::DuplicatePoint(point));
            }
            if count == 0 {
                return Err(LayoutError::EmptyPlacement(point));
            }
            points[point] = PointState {
                checkers: count,
                owner: Some(color),
            };
        }

        let board = Self { points, bar, off };
        for color in [Color::White, Color::Black] {
            let total = board.total_in_play(color);
            if total != u16::from(CHECKERS_PER_COLOR) {
                return Err(LayoutError::WrongTotal(color, total));
            }
        }
        Ok(board)
    }

    /// Returns the state of a point (0–23).
    ///
    /// Indexing outside the board is a programming error and panics.
    pub fn point(&self, index: usize) -> PointState {
        self.points[index]
    }

    /// Returns all 24 points in board order.
    pub fn points(&self) -> &[PointState; POINT_COUNT] {
        &self.points
    }

    /// Checkers of `color` waiting on the bar.
    pub fn bar(&self, color: Color) -> u8 {
        self.bar.of(color)
    }

    /// Checkers of `color` borne off.
    pub fn off(&self, color: Color) -> u8 {
        self.off.of(color)
    }

    /// Point checkers plus bar plus off for one color.
    pub fn total_in_play(&self, color: Color) -> u16 {
        let on_points: u16 = self
            .points
            .iter()
            .filter(|p| p.owner == Some(color))
            .map(|p| u16::from(p.checkers))
            .sum();
        on_points + u16::from(self.bar.of(color)) + u16::from(self.off.of(color))
    }

    /// Whether every checker of `color` is in its home board and off the bar.
    ///
    /// Home is points 18–23 for White and 0–5 for Black.
    pub fn all_in_home(&self, color: Color) -> bool {
        if self.bar.of(color) > 0 {
            return false;
        }
        let outside = match color {
            Color::White => 0..18,
            Color::Black => 6..POINT_COUNT,
        };
        !self.occupied_in(outside, color)
    }

    /// Whether `color` has a checker farther from home than `point`:
    /// a higher-numbered point for White, a lower-numbered one for Black.
    pub fn checker_farther_from_home(&self, color: Color, point: usize) -> bool {
        let farther = match color {
            Color::White => point + 1..POINT_COUNT,
            Color::Black => 0..point,
        };
        self.occupied_in(farther, color)
    }

    fn occupied_in(&self, range: std::ops::Range<usize>, color: Color) -> bool {
        self.points[range].iter().any(|p| p.owner == Some(color))
    }

    // ─────────────────────────────────────────────────────────────
    //  Low-level mutators, used only by the move applier
    // ─────────────────────────────────────────────────────────────

    /// Stacks one checker of `color` on a point and takes ownership of it.
    pub(super) fn add_checker(&mut self, index: usize, color: Color) {
        let point = &mut self.points[index];
        point.checkers += 1;
        point.owner = Some(color);
    }

    /// Removes one checker from a point, clearing ownership at zero.
    ///
    /// Removing from an empty point is a programming error.
    pub(super) fn remove_checker(&mut self, index: usize) {
        let point = &mut self.points[index];
        debug_assert!(point.checkers > 0, "removing a checker from an empty point");
        point.checkers -= 1;
        if point.checkers == 0 {
            point.owner = None;
        }
    }

    /// Places one checker of `color` on the bar.
    pub(super) fn push_bar(&mut self, color: Color) {
        self.bar.add(color);
    }

    /// Takes one checker of `color` off the bar.
    pub(super) fn pop_bar(&mut self, color: Color) {
        self.bar.take(color);
    }

    /// Bears one checker of `color` off the board.
    pub(super) fn push_off(&mut self, color: Color) {
        self.off.add(color);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
