//! Rules engine for the Eamon adventure engine.
//!
//! Provides a seedable dice roller, the Main Hall economy (attribute and spell
//! prices, weapon valuation, the bank, the shared shop), character creation,
//! the combat arithmetic used by the `attack` command, and spell casting.

pub mod bank;
pub mod combat;
pub mod creation;
pub mod dice;
pub mod economy;
pub mod error;
pub mod magic;
pub mod shop;

pub use combat::{Strike, StrikeOutcome};
pub use creation::{PrimeAttributes, create_player, roll_prime_attributes};
pub use dice::{Dice, DiceSpec};
pub use economy::{SpellLesson, attribute_price, buy_attribute, buy_spell, spell_price, weapon_value};
pub use error::{MechError, MechResult};
pub use magic::{Casting, cast};
pub use shop::{Shop, ShopConfig};
