//! Dice rolling.
//!
//! Every random decision in the engine goes through a [`Dice`] roller so a
//! session can be replayed exactly from its seed.

pub mod spec;

pub use spec::DiceSpec;

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MechError, MechResult};

/// A seedable dice roller.
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// A roller that produces the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Either a seeded roller or one drawing from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Sum of `count` rolls of a `sides`-sided die.
    ///
    /// A zero-sided die is rejected; zero dice total 0.
    pub fn roll(&mut self, count: u32, sides: u32) -> MechResult<u32> {
        if sides == 0 {
            return Err(MechError::InvalidDiceSpec(format!("{count}d0")));
        }
        Ok(self.roll_unchecked(count, sides))
    }

    /// Roll a validated dice expression.
    pub fn roll_spec(&mut self, spec: DiceSpec) -> u32 {
        self.roll_unchecked(spec.count(), spec.sides())
    }

    fn roll_unchecked(&mut self, count: u32, sides: u32) -> u32 {
        (0..count).map(|_| self.rng.random_range(1..=sides)).sum()
    }

    /// 1d100.
    pub fn percent(&mut self) -> u32 {
        self.roll_unchecked(1, 100)
    }

    /// A uniformly chosen index below `len`, or `None` for an empty range.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        let sides = u32::try_from(len).ok().filter(|&n| n > 0)?;
        Some(self.roll_unchecked(1, sides) as usize - 1)
    }
}

impl fmt::Debug for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dice").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sides_rejected() {
        let mut dice = Dice::seeded(1);
        assert!(matches!(
            dice.roll(2, 0),
            Err(MechError::InvalidDiceSpec(_))
        ));
    }

    #[test]
    fn zero_count_is_zero() {
        let mut dice = Dice::seeded(1);
        assert_eq!(dice.roll(0, 6).unwrap(), 0);
    }

    #[test]
    fn seeded_rolls_repeat() {
        let mut a = Dice::seeded(99);
        let mut b = Dice::seeded(99);
        let ra: Vec<u32> = (0..20).map(|_| a.roll(3, 6).unwrap()).collect();
        let rb: Vec<u32> = (0..20).map(|_| b.roll(3, 6).unwrap()).collect();
        assert_eq!(ra, rb);
    }

    #[test]
    fn percent_in_range() {
        let mut dice = Dice::seeded(5);
        for _ in 0..200 {
            let p = dice.percent();
            assert!((1..=100).contains(&p));
        }
    }

    #[test]
    fn pick_index_bounds() {
        let mut dice = Dice::seeded(3);
        assert_eq!(dice.pick_index(0), None);
        assert_eq!(dice.pick_index(1), Some(0));
        for _ in 0..50 {
            assert!(dice.pick_index(4).unwrap() < 4);
        }
    }
}
