//! Prices and progression: the witch's attributes, the wizard's spells, and
//! weapon valuation.

use eamon_core::artifact::Weapon;
use eamon_core::player::MAX_ABILITY;
use eamon_core::{Attribute, Player, Spell};
use tracing::{info, warn};

use crate::dice::Dice;
use crate::error::{MechError, MechResult};

/// Price of raising an attribute from `value`: `round(value³ / 100) * 100`.
pub fn attribute_price(value: u32) -> u32 {
    let cube = u64::from(value).pow(3);
    let price = (cube + 50) / 100 * 100;
    u32::try_from(price).unwrap_or(u32::MAX)
}

/// Debit the price and raise the attribute by exactly one. Returns the new
/// value.
pub fn buy_attribute(player: &mut Player, attribute: Attribute) -> MechResult<u32> {
    let current = player.attribute(attribute);
    let price = attribute_price(current);
    debit(player, price)?;
    let slot = player.attribute_mut(attribute);
    *slot += 1;
    info!(%attribute, value = *slot, price, "attribute bought");
    Ok(*slot)
}

/// The wizard's fee for a spell.
pub fn spell_price(spell: Spell) -> u32 {
    match spell {
        Spell::Blast => 1000,
        Spell::Heal => 500,
        Spell::Power => 100,
        Spell::Speed => 4000,
    }
}

/// How much a lesson raises an original ability of `original`.
///
/// `floor((100 - o) / 4) + 1d(max(1, floor((100 - o) / 2)))`, capped so the
/// result never passes 100.
pub fn spell_increase(original: u32, dice: &mut Dice) -> MechResult<u32> {
    let headroom = MAX_ABILITY.saturating_sub(original);
    let sides = (headroom / 2).max(1);
    let gain = headroom / 4 + dice.roll(1, sides)?;
    Ok(gain.min(headroom))
}

/// Result of a spell lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellLesson {
    /// The spell taught.
    pub spell: Spell,
    /// Whether the player didn't know the spell before.
    pub learned: bool,
    /// The new original ability.
    pub ability: u32,
}

impl SpellLesson {
    /// "learned" for a new spell, "increased" otherwise.
    pub fn verb(&self) -> &'static str {
        if self.learned { "learned" } else { "increased" }
    }
}

/// Debit the fee and raise the spell's original ability. The current ability
/// is restored to the new original.
pub fn buy_spell(player: &mut Player, spell: Spell, dice: &mut Dice) -> MechResult<SpellLesson> {
    let price = spell_price(spell);
    ensure_gold(player, price)?;
    let original = player.spell_abilities_original.get(spell);
    let increase = spell_increase(original, dice)?;
    debit(player, price)?;
    let ability = (original + increase).min(MAX_ABILITY);
    player.spell_abilities_original.set(spell, ability);
    player.spell_abilities.set(spell, ability);
    info!(%spell, ability, "spell bought");
    Ok(SpellLesson {
        spell,
        learned: original == 0,
        ability,
    })
}

/// Value of a weapon: `floor(max_damage^1.5 + odds) * 5`, never negative.
pub fn weapon_value(weapon: &Weapon) -> u32 {
    let base = f64::from(weapon.max_damage()).powf(1.5) + f64::from(weapon.odds);
    let value = base.floor() * 5.0;
    if value <= 0.0 {
        0
    } else {
        value.min(f64::from(u32::MAX)) as u32
    }
}

/// Reject unless the player holds at least `amount` gold.
pub(crate) fn ensure_gold(player: &Player, amount: u32) -> MechResult<()> {
    if player.gold < amount {
        warn!(needed = amount, available = player.gold, "not enough gold");
        return Err(MechError::InsufficientGold {
            needed: amount,
            available: player.gold,
        });
    }
    Ok(())
}

/// Take gold from the player or reject without changing anything.
pub(crate) fn debit(player: &mut Player, amount: u32) -> MechResult<()> {
    ensure_gold(player, amount)?;
    player.gold -= amount;
    Ok(())
}
