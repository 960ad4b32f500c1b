//! Dice and the remaining-move multiset for the current turn.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors constructing dice state by hand (resumed positions, tests).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DiceError {
    /// A die face outside 1–6.
    #[display("die face {_0} is outside 1-6")]
    FaceOutOfRange(u8),
    /// Remaining pips are not a subset of what the roll produced.
    #[display("remaining pips do not match the rolled dice")]
    PipsMismatch,
}

impl std::error::Error for DiceError {}

/// A rolled pair of dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    first: u8,
    second: u8,
}

impl Dice {
    /// Creates dice from explicit faces, validating the 1–6 range.
    pub fn new(first: u8, second: u8) -> Result<Self, DiceError> {
        for face in [first, second] {
            if !(1..=6).contains(&face) {
                return Err(DiceError::FaceOutOfRange(face));
            }
        }
        Ok(Self { first, second })
    }

    /// Rolls two independent uniform dice.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Self {
            first: rng.gen_range(1..=6),
            second: rng.gen_range(1..=6),
        }
    }

    /// Both faces in roll order.
    pub fn values(&self) -> [u8; 2] {
        [self.first, self.second]
    }

    /// Whether both faces match.
    pub fn is_double(&self) -> bool {
        self.first == self.second
    }

    /// The full pip multiset this roll grants: four copies of the face on a
    /// double, otherwise the two faces.
    pub fn pips(&self) -> Pips {
        if self.is_double() {
            Pips(vec![self.first; 4])
        } else {
            Pips(vec![self.first, self.second])
        }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.first, self.second)
    }
}

/// Multiset of die values still consumable this turn.
///
/// Values are removed by value, never by position; order among equal values
/// is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pips(Vec<u8>);

impl Pips {
    /// An empty multiset (no dice rolled, or all consumed).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Whether no pip remains.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pips remaining.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether one matching pip is available.
    pub fn contains(&self, value: u8) -> bool {
        self.0.contains(&value)
    }

    /// The largest remaining pip.
    pub fn largest(&self) -> Option<u8> {
        self.0.iter().copied().max()
    }

    /// Remaining pips in consumption order.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Removes one pip matching `value`; returns whether one was found.
    pub(super) fn consume(&mut self, value: u8) -> bool {
        match self.0.iter().position(|&v| v == value) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    /// Discards every remaining pip.
    pub(super) fn clear(&mut self) {
        self.0.clear();
    }

    /// Rebuilds a partially consumed multiset for a resumed turn.
    ///
    /// `remaining` must be a sub-multiset of what `dice` granted.
    pub(super) fn resume(dice: Dice, remaining: &[u8]) -> Result<Self, DiceError> {
        let mut fresh = dice.pips();
        for &value in remaining {
            if !fresh.consume(value) {
                return Err(DiceError::PipsMismatch);
            }
        }
        Ok(Self(remaining.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_doubles_grant_four_pips() {
        let dice = Dice::new(4, 4).unwrap();
        assert!(dice.is_double());
        assert_eq!(dice.pips().as_slice(), &[4, 4, 4, 4]);

        let dice = Dice::new(3, 5).unwrap();
        assert!(!dice.is_double());
        assert_eq!(dice.pips().as_slice(), &[3, 5]);
    }

    #[test]
    fn test_consume_removes_one_matching_value() {
        let mut pips = Dice::new(6, 6).unwrap().pips();
        assert!(pips.consume(6));
        assert_eq!(pips.len(), 3);
        assert!(!pips.consume(5));
        assert_eq!(pips.len(), 3);
    }

    #[test]
    fn test_faces_are_validated() {
        assert_eq!(Dice::new(0, 3), Err(DiceError::FaceOutOfRange(0)));
        assert_eq!(Dice::new(2, 7), Err(DiceError::FaceOutOfRange(7)));
    }

    #[test]
    fn test_resume_rejects_foreign_pips() {
        let dice = Dice::new(3, 5).unwrap();
        assert!(Pips::resume(dice, &[5]).is_ok());
        assert!(Pips::resume(dice, &[3, 5]).is_ok());
        assert_eq!(Pips::resume(dice, &[4]), Err(DiceError::PipsMismatch));
        assert_eq!(Pips::resume(dice, &[5, 5]), Err(DiceError::PipsMismatch));
    }

    #[test]
    fn test_rolled_faces_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let dice = Dice::roll(&mut rng);
            for face in dice.values() {
                assert!((1..=6).contains(&face));
            }
        }
    }
}
