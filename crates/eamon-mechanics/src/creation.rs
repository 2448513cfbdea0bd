//! Rolling up a new adventurer.

use eamon_core::{Gender, Player};
use tracing::debug;

use crate::dice::Dice;
use crate::error::MechResult;

/// Minimum hardiness for a new character.
pub const MIN_HARDINESS: u32 = 15;
/// Minimum agility for a new character.
pub const MIN_AGILITY: u32 = 12;
/// Minimum sum of the three prime attributes.
pub const MIN_TOTAL: u32 = 42;

/// Hardiness, agility, and charisma as rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeAttributes {
    /// Hardiness.
    pub hardiness: u32,
    /// Agility.
    pub agility: u32,
    /// Charisma.
    pub charisma: u32,
}

impl PrimeAttributes {
    /// Sum of all three.
    pub fn total(&self) -> u32 {
        self.hardiness + self.agility + self.charisma
    }

    fn acceptable(&self) -> bool {
        self.hardiness >= MIN_HARDINESS && self.agility >= MIN_AGILITY && self.total() >= MIN_TOTAL
    }
}

/// Roll 3d7 for each attribute until the set is good enough to adventure.
pub fn roll_prime_attributes(dice: &mut Dice) -> MechResult<PrimeAttributes> {
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let rolled = PrimeAttributes {
            hardiness: dice.roll(3, 7)?,
            agility: dice.roll(3, 7)?,
            charisma: dice.roll(3, 7)?,
        };
        if rolled.acceptable() {
            debug!(attempts, ?rolled, "prime attributes rolled");
            return Ok(rolled);
        }
    }
}

/// A new player with freshly rolled attributes.
pub fn create_player(
    id: u32,
    name: &str,
    gender: Gender,
    dice: &mut Dice,
) -> MechResult<Player> {
    let rolled = roll_prime_attributes(dice)?;
    let mut player = Player::new(id, name, gender);
    player.hardiness = rolled.hardiness;
    player.agility = rolled.agility;
    player.charisma = rolled.charisma;
    Ok(player)
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rolled_attributes_meet_minimums(seed in any::<u64>()) {
            let mut dice = Dice::seeded(seed);
            let a = roll_prime_attributes(&mut dice).unwrap();
            prop_assert!(a.hardiness >= MIN_HARDINESS && a.hardiness <= 21);
            prop_assert!(a.agility >= MIN_AGILITY && a.agility <= 21);
            prop_assert!(a.charisma >= 3 && a.charisma <= 21);
            prop_assert!(a.total() >= MIN_TOTAL);
        }
    }
}
