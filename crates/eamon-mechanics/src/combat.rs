//! To-hit odds, damage, and monster reactions.

use eamon_core::artifact::{Armor, Weapon};
use eamon_core::{Friendliness, Monster, Player, Reaction};

use crate::dice::{Dice, DiceSpec};
use crate::error::MechResult;

/// Rolls at or below this always hit, for double damage.
pub const CRITICAL_ROLL: u32 = 5;

/// One swing, fully described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    /// Percent chance to hit. May be negative or above 100.
    pub odds: i32,
    /// Damage dice.
    pub damage: DiceSpec,
    /// Target's armor class, subtracted from each hit.
    pub armor_class: u32,
}

/// What a swing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    /// The swing missed.
    Miss,
    /// The swing connected. `damage` is after armor.
    Hit {
        /// Damage dealt.
        damage: u32,
        /// Whether the roll was a critical.
        critical: bool,
    },
}

impl Strike {
    /// Roll 1d100 against the odds, then roll damage.
    pub fn resolve(&self, dice: &mut Dice) -> StrikeOutcome {
        let roll = dice.percent();
        let critical = roll <= CRITICAL_ROLL;
        let hit = critical || i64::from(roll) <= i64::from(self.odds);
        if !hit {
            return StrikeOutcome::Miss;
        }
        let mut raw = dice.roll_spec(self.damage);
        if critical {
            raw *= 2;
        }
        StrikeOutcome::Hit {
            damage: raw.saturating_sub(self.armor_class),
            critical,
        }
    }
}

/// To-hit penalty from armor the player hasn't trained for.
pub fn armor_factor(player: &Player, worn: &[&Armor]) -> u32 {
    let penalty: u32 = worn.iter().map(|a| a.armor_penalty).sum();
    penalty.saturating_sub(player.armor_expertise)
}

/// Weapon ability + weapon odds + 2 × agility − armor factor.
pub fn player_odds(player: &Player, weapon: Option<&Weapon>, worn: &[&Armor]) -> i32 {
    let (ability, odds) = weapon.map_or((0, 0), |w| {
        (player.weapon_abilities.get(w.weapon_type), w.odds)
    });
    to_i32(ability) + odds + 2 * to_i32(player.agility) - to_i32(armor_factor(player, worn))
}

/// Extra to-hit odds while the speed spell doubles agility.
pub fn speed_bonus(player: &Player) -> i32 {
    2 * to_i32(player.agility)
}

/// Attack odds + 2 × agility, plus weapon odds when armed.
pub fn monster_odds(monster: &Monster, weapon: Option<&Weapon>) -> i32 {
    to_i32(monster.attack_odds) + 2 * to_i32(monster.agility) + weapon.map_or(0, |w| w.odds)
}

/// The player's damage dice: the weapon's, or 1d2 bare-handed.
pub fn player_damage(weapon: Option<&Weapon>) -> MechResult<DiceSpec> {
    match weapon {
        Some(w) => DiceSpec::new(w.dice, w.sides),
        None => DiceSpec::new(1, 2),
    }
}

/// A monster's damage dice: its weapon's, or its natural weapon.
pub fn monster_damage(monster: &Monster, weapon: Option<&Weapon>) -> MechResult<DiceSpec> {
    match weapon {
        Some(w) => DiceSpec::new(w.dice, w.sides),
        None => DiceSpec::new(monster.weapon_dice, monster.weapon_sides),
    }
}

/// Total armor class of what the player wears.
pub fn player_armor_class(worn: &[&Armor]) -> u32 {
    worn.iter().map(|a| a.armor_class).sum()
}

/// Decide how a monster reacts on first sight.
///
/// `random` monsters roll twice against their friend odds, adjusted by
/// `(charisma - 10) × 2`: the first roll separates friends from the rest,
/// the second neutrals from the hostile.
pub fn roll_reaction(monster: &Monster, charisma: u32, dice: &mut Dice) -> Reaction {
    match monster.friendliness {
        Friendliness::Friend => Reaction::Friend,
        Friendliness::Neutral => Reaction::Neutral,
        Friendliness::Hostile => Reaction::Hostile,
        Friendliness::Random => {
            let odds = to_i32(monster.friend_odds) + (to_i32(charisma) - 10) * 2;
            if to_i32(dice.percent()) <= odds {
                Reaction::Friend
            } else if to_i32(dice.percent()) <= odds {
                Reaction::Neutral
            } else {
                Reaction::Hostile
            }
        }
    }
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
