use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{ArtifactId, MonsterId, RoomId};

/// Artifacts at or above this weight are fixed in place.
pub const IMMOVABLE_WEIGHT: u32 = 999;

/// Weapon class. Each class has its own player proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    /// Axes.
    Axe,
    /// Bows.
    Bow,
    /// Clubs and maces.
    Club,
    /// Spears.
    Spear,
    /// Swords.
    Sword,
}

impl WeaponType {
    /// All weapon classes in canonical order.
    pub const ALL: [WeaponType; 5] = [Self::Axe, Self::Bow, Self::Club, Self::Spear, Self::Sword];

    /// Lowercase display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Axe => "axe",
            Self::Bow => "bow",
            Self::Club => "club",
            Self::Spear => "spear",
            Self::Sword => "sword",
        }
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a wearable covers the body or is carried on the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    /// Body armor.
    Armor,
    /// A shield. Cannot be combined with a two-handed weapon.
    Shield,
}

/// Combat statistics of a weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weapon {
    /// Weapon class.
    pub weapon_type: WeaponType,
    /// To-hit bonus in percent. May be negative.
    pub odds: i32,
    /// Number of damage dice.
    pub dice: u32,
    /// Sides per damage die.
    pub sides: u32,
    /// 1 for one-handed, 2 for two-handed.
    pub hands: u8,
}

impl Weapon {
    /// The most damage one hit can do.
    pub fn max_damage(&self) -> u32 {
        self.dice * self.sides
    }
}

/// Protective statistics of a wearable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Armor {
    /// Armor or shield.
    pub armor_type: ArmorType,
    /// Damage absorbed per hit.
    pub armor_class: u32,
    /// Armor expertise needed to avoid a to-hit penalty.
    pub armor_penalty: u32,
}

/// Type-specific artifact data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// An ordinary weapon.
    Weapon(Weapon),
    /// A named magic weapon. Never breaks.
    MagicWeapon(Weapon),
    /// Armor or a shield.
    Wearable(Armor),
    /// Treasure, scenery, and everything else.
    Other,
}

/// Who is carrying an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// The player.
    Player,
    /// A monster.
    Monster(MonsterId),
    /// The Main Hall shop's standing inventory.
    Shop,
}

/// Where an artifact is. An artifact is in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Lying in a room.
    Room(RoomId),
    /// In someone's inventory.
    Carried(Owner),
}

/// An object in the game world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artifact {
    /// Artifact id, unique within the adventure.
    pub id: ArtifactId,
    /// Primary name.
    pub name: String,
    /// Description shown the first time the artifact is seen.
    pub description: String,
    /// Alternate names matched exactly.
    pub synonyms: Vec<String>,
    /// Price in gold.
    pub value: u32,
    /// Weight; see [`IMMOVABLE_WEIGHT`].
    pub weight: u32,
    /// Current location.
    pub location: Location,
    /// Type-specific data.
    pub kind: ArtifactKind,
    /// Whether the player has already seen this artifact.
    #[serde(skip)]
    pub seen: bool,
}

impl Artifact {
    /// Create a plain artifact lying in a room.
    pub fn new(id: u32, name: impl Into<String>, location: Location) -> Self {
        Self {
            id: ArtifactId(id),
            name: name.into(),
            description: String::new(),
            synonyms: Vec::new(),
            value: 0,
            weight: 1,
            location,
            kind: ArtifactKind::Other,
            seen: false,
        }
    }

    /// Builder: set the kind.
    pub fn with_kind(mut self, kind: ArtifactKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder: set the weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Builder: set the value.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    /// Builder: set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: add a synonym.
    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    /// Weapon stats, for weapons and magic weapons.
    pub fn weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ArtifactKind::Weapon(w) | ArtifactKind::MagicWeapon(w) => Some(w),
            _ => None,
        }
    }

    /// Armor stats, for wearables.
    pub fn armor(&self) -> Option<&Armor> {
        match &self.kind {
            ArtifactKind::Wearable(a) => Some(a),
            _ => None,
        }
    }

    /// Maximum damage per hit, or 0 for non-weapons.
    pub fn max_damage(&self) -> u32 {
        self.weapon().map_or(0, Weapon::max_damage)
    }

    /// Whether the artifact can be picked up at all.
    pub fn is_carryable(&self) -> bool {
        self.weight < IMMOVABLE_WEIGHT
    }

    /// Case-insensitive match: the name starts with `query`, or a synonym
    /// equals it.
    pub fn matches(&self, query: &str) -> bool {
        name_matches(&self.name, &self.synonyms, query)
    }
}

/// Shared matching rule for artifacts and monsters.
pub(crate) fn name_matches(name: &str, synonyms: &[String], query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return false;
    }
    name.to_lowercase().starts_with(&query) || synonyms.iter().any(|s| s.to_lowercase() == query)
}
