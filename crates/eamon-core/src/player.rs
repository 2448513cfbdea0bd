//! The player character and its closed sets of abilities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, WeaponType};
use crate::entity::{ArtifactId, PlayerId};

/// Upper bound for every percentage ability.
pub const MAX_ABILITY: u32 = 100;

/// Abilities above this are considered mastered by front-ends.
pub const MASTERY_THRESHOLD: u32 = 90;

/// Player gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// A prime attribute sold by the Main Hall witch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Hit points and carrying capacity.
    Hardiness,
    /// To-hit odds.
    Agility,
    /// Monster reactions.
    Charisma,
}

impl Attribute {
    /// All attributes in canonical order.
    pub const ALL: [Attribute; 3] = [Self::Hardiness, Self::Agility, Self::Charisma];

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hardiness => "hardiness",
            Self::Agility => "agility",
            Self::Charisma => "charisma",
        }
    }

    /// Parse from the lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == s.to_lowercase())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A spell sold by the Main Hall wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spell {
    /// Damage a monster.
    Blast,
    /// Heal the caster.
    Heal,
    /// Unpredictable adventure-specific effect.
    Power,
    /// Double agility for a while.
    Speed,
}

impl Spell {
    /// All spells in canonical order.
    pub const ALL: [Spell; 4] = [Self::Blast, Self::Heal, Self::Power, Self::Speed];

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blast => "blast",
            Self::Heal => "heal",
            Self::Power => "power",
            Self::Speed => "speed",
        }
    }

    /// Parse from the lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sp| sp.name() == s.to_lowercase())
    }

    /// Whether an ability is high enough that the wizard stops offering lessons.
    pub fn is_mastered(ability: u32) -> bool {
        ability > MASTERY_THRESHOLD
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Percent ability per spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpellAbilities {
    /// Blast.
    pub blast: u32,
    /// Heal.
    pub heal: u32,
    /// Power.
    pub power: u32,
    /// Speed.
    pub speed: u32,
}

impl SpellAbilities {
    /// The ability for one spell.
    pub fn get(&self, spell: Spell) -> u32 {
        match spell {
            Spell::Blast => self.blast,
            Spell::Heal => self.heal,
            Spell::Power => self.power,
            Spell::Speed => self.speed,
        }
    }

    fn slot(&mut self, spell: Spell) -> &mut u32 {
        match spell {
            Spell::Blast => &mut self.blast,
            Spell::Heal => &mut self.heal,
            Spell::Power => &mut self.power,
            Spell::Speed => &mut self.speed,
        }
    }

    /// Set one ability, clamped to 100.
    pub fn set(&mut self, spell: Spell, value: u32) {
        *self.slot(spell) = value.min(MAX_ABILITY);
    }

    fn clamp(&mut self) {
        for spell in Spell::ALL {
            let v = self.get(spell);
            self.set(spell, v);
        }
    }
}

/// Percent proficiency per weapon class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponAbilities {
    /// Axe.
    pub axe: u32,
    /// Bow.
    pub bow: u32,
    /// Club.
    pub club: u32,
    /// Spear.
    pub spear: u32,
    /// Sword.
    pub sword: u32,
}

impl WeaponAbilities {
    /// The proficiency for one class.
    pub fn get(&self, weapon_type: WeaponType) -> u32 {
        match weapon_type {
            WeaponType::Axe => self.axe,
            WeaponType::Bow => self.bow,
            WeaponType::Club => self.club,
            WeaponType::Spear => self.spear,
            WeaponType::Sword => self.sword,
        }
    }

    /// Set one proficiency, clamped to 100.
    pub fn set(&mut self, weapon_type: WeaponType, value: u32) {
        let slot = match weapon_type {
            WeaponType::Axe => &mut self.axe,
            WeaponType::Bow => &mut self.bow,
            WeaponType::Club => &mut self.club,
            WeaponType::Spear => &mut self.spear,
            WeaponType::Sword => &mut self.sword,
        };
        *slot = value.min(MAX_ABILITY);
    }

    fn clamp(&mut self) {
        for wt in WeaponType::ALL {
            let v = self.get(wt);
            self.set(wt, v);
        }
    }
}

/// The player character.
///
/// `inventory` is populated only in snapshot form: while a session runs the
/// registry owns the player's artifacts and this list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Player {
    /// Record id in the player store.
    pub id: PlayerId,
    /// Character name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Hit points and carrying capacity.
    pub hardiness: u32,
    /// To-hit odds.
    pub agility: u32,
    /// Monster reactions.
    pub charisma: u32,
    /// Current spell abilities (drained by casting).
    pub spell_abilities: SpellAbilities,
    /// Spell abilities as learned.
    pub spell_abilities_original: SpellAbilities,
    /// Proficiency per weapon class.
    pub weapon_abilities: WeaponAbilities,
    /// Skill at fighting in armor.
    pub armor_expertise: u32,
    /// Gold in hand.
    pub gold: u32,
    /// Gold in the bank.
    pub gold_in_bank: u32,
    /// Owned artifacts (snapshot form only).
    pub inventory: Vec<Artifact>,
    /// Readied weapon.
    pub ready_weapon: Option<ArtifactId>,
    /// Worn armor and shield.
    pub worn_armor: Vec<ArtifactId>,
    /// Damage taken and not yet healed. A player whose damage reaches
    /// hardiness is dead, and stays dead once saved.
    #[serde(default)]
    pub damage: u32,
}

impl Player {
    /// A fresh character with the Main Hall's starting stats and 200 gold.
    pub fn new(id: u32, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            gender,
            hardiness: 15,
            agility: 12,
            charisma: 15,
            spell_abilities: SpellAbilities::default(),
            spell_abilities_original: SpellAbilities::default(),
            weapon_abilities: WeaponAbilities {
                axe: 5,
                bow: 0,
                club: 20,
                spear: 10,
                sword: 0,
            },
            armor_expertise: 0,
            gold: 200,
            gold_in_bank: 0,
            inventory: Vec::new(),
            ready_weapon: None,
            worn_armor: Vec::new(),
            damage: 0,
        }
    }

    /// Read a prime attribute.
    pub fn attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Hardiness => self.hardiness,
            Attribute::Agility => self.agility,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Mutable access to a prime attribute.
    pub fn attribute_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Hardiness => &mut self.hardiness,
            Attribute::Agility => &mut self.agility,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Clamp every percentage field into 0..=100.
    pub fn clamp_abilities(&mut self) {
        self.spell_abilities.clamp();
        self.spell_abilities_original.clamp();
        self.weapon_abilities.clamp();
        self.armor_expertise = self.armor_expertise.min(MAX_ABILITY);
    }

    /// Most weight the player can carry.
    pub fn carry_limit(&self) -> u32 {
        self.hardiness.saturating_mul(10)
    }

    /// Remaining hit points.
    pub fn health(&self) -> u32 {
        self.hardiness.saturating_sub(self.damage)
    }

    /// Whether the player has died.
    pub fn is_dead(&self) -> bool {
        self.health() == 0
    }

    /// Apply damage, capped at hardiness.
    pub fn injure(&mut self, amount: u32) {
        self.damage = self.damage.saturating_add(amount).min(self.hardiness);
    }

    /// Heal damage.
    pub fn heal(&mut self, amount: u32) {
        self.damage = self.damage.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abilities_clamp_at_100() {
        let mut abilities = SpellAbilities::default();
        abilities.set(Spell::Heal, 250);
        assert_eq!(abilities.get(Spell::Heal), 100);

        let mut weapons = WeaponAbilities::default();
        weapons.set(WeaponType::Bow, 101);
        assert_eq!(weapons.get(WeaponType::Bow), 100);
    }

    #[test]
    fn clamp_abilities_fixes_loaded_values() {
        let mut p = Player::new(1, "Leia", Gender::Female);
        p.spell_abilities_original.power = 140;
        p.weapon_abilities.axe = 300;
        p.armor_expertise = 101;
        p.clamp_abilities();
        assert_eq!(p.spell_abilities_original.power, 100);
        assert_eq!(p.weapon_abilities.axe, 100);
        assert_eq!(p.armor_expertise, 100);
    }

    #[test]
    fn attribute_access() {
        let mut p = Player::new(1, "Leia", Gender::Female);
        *p.attribute_mut(Attribute::Charisma) += 1;
        assert_eq!(p.attribute(Attribute::Charisma), 16);
        assert_eq!(Attribute::parse("AGILITY"), Some(Attribute::Agility));
        assert_eq!(Attribute::parse("luck"), None);
    }

    #[test]
    fn spell_mastery_threshold() {
        assert!(!Spell::is_mastered(90));
        assert!(Spell::is_mastered(91));
        assert_eq!(Spell::parse("speed"), Some(Spell::Speed));
    }

    #[test]
    fn injury_and_death() {
        let mut p = Player::new(1, "Leia", Gender::Female);
        p.injure(5);
        assert_eq!(p.health(), 10);
        p.heal(2);
        assert_eq!(p.health(), 12);
        p.injure(100);
        assert!(p.is_dead());
        assert_eq!(p.damage, p.hardiness);
    }

    #[test]
    fn snapshot_round_trip_keeps_inventory() {
        let mut p = Player::new(7, "Han", Gender::Male);
        p.inventory.push(Artifact::new(
            1,
            "blaster",
            crate::artifact::Location::Carried(crate::artifact::Owner::Player),
        ));
        p.ready_weapon = Some(ArtifactId(1));
        let json = serde_json::to_string(&p).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
