use serde::{Deserialize, Serialize};

use crate::artifact::name_matches;
use crate::entity::{ArtifactId, MonsterId, RoomId};

/// A monster's default disposition toward the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Friendliness {
    /// Always friendly.
    Friend,
    /// Always neutral.
    Neutral,
    /// Always hostile.
    Hostile,
    /// Rolled against `friend_odds` when first met.
    Random,
}

/// How a monster currently reacts to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    /// Not yet met.
    #[default]
    Unknown,
    /// Fights on the player's side.
    Friend,
    /// Ignores the player.
    Neutral,
    /// Attacks the player.
    Hostile,
}

/// Alive or dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterStatus {
    /// Still in play.
    #[default]
    Alive,
    /// Killed; no longer in any room.
    Dead,
}

/// A creature in the adventure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Monster {
    /// Monster id, unique within the adventure.
    pub id: MonsterId,
    /// Primary name.
    pub name: String,
    /// Description shown the first time the monster is seen.
    pub description: String,
    /// Alternate names matched exactly.
    pub synonyms: Vec<String>,
    /// Hit points.
    pub hardiness: u32,
    /// Affects to-hit odds.
    pub agility: u32,
    /// Percent willingness to keep fighting.
    pub courage: u32,
    /// Default disposition.
    pub friendliness: Friendliness,
    /// Percent chance a `random` monster starts friendly.
    pub friend_odds: u32,
    /// Base percent chance to hit.
    pub attack_odds: u32,
    /// Readied weapon, if the monster uses one.
    pub weapon_id: Option<ArtifactId>,
    /// Natural weapon dice count.
    pub weapon_dice: u32,
    /// Natural weapon sides.
    pub weapon_sides: u32,
    /// Damage absorbed per hit.
    pub armor_class: u32,
    /// Current room, or `None` when offstage.
    pub room_id: Option<RoomId>,
    /// Damage taken so far.
    #[serde(skip)]
    pub damage: u32,
    /// Current reaction to the player.
    #[serde(skip)]
    pub reaction: Reaction,
    /// Alive or dead.
    #[serde(skip)]
    pub status: MonsterStatus,
}

impl Monster {
    /// Create a neutral monster with default stats.
    pub fn new(id: u32, name: impl Into<String>, room_id: Option<RoomId>) -> Self {
        Self {
            id: MonsterId(id),
            name: name.into(),
            description: String::new(),
            synonyms: Vec::new(),
            hardiness: 10,
            agility: 10,
            courage: 100,
            friendliness: Friendliness::Neutral,
            friend_odds: 50,
            attack_odds: 50,
            weapon_id: None,
            weapon_dice: 1,
            weapon_sides: 4,
            armor_class: 0,
            room_id,
            damage: 0,
            reaction: Reaction::Unknown,
            status: MonsterStatus::Alive,
        }
    }

    /// Builder: set the disposition.
    pub fn with_friendliness(mut self, friendliness: Friendliness) -> Self {
        self.friendliness = friendliness;
        self
    }

    /// Builder: set hardiness.
    pub fn with_hardiness(mut self, hardiness: u32) -> Self {
        self.hardiness = hardiness;
        self
    }

    /// Builder: add a synonym.
    pub fn with_synonym(mut self, synonym: impl Into<String>) -> Self {
        self.synonyms.push(synonym.into());
        self
    }

    /// Case-insensitive match on name prefix or exact synonym.
    pub fn matches(&self, query: &str) -> bool {
        name_matches(&self.name, &self.synonyms, query)
    }

    /// Remaining hit points.
    pub fn health(&self) -> u32 {
        self.hardiness.saturating_sub(self.damage)
    }

    /// Whether the monster is still in play.
    pub fn is_alive(&self) -> bool {
        self.status == MonsterStatus::Alive
    }

    /// Override the reaction. Used by scripted hooks.
    pub fn set_reaction(&mut self, reaction: Reaction) {
        self.reaction = reaction;
    }

    /// Apply damage. Returns `true` when the blow was fatal.
    pub fn injure(&mut self, amount: u32) -> bool {
        self.damage = self.damage.saturating_add(amount).min(self.hardiness);
        if self.health() == 0 {
            self.status = MonsterStatus::Dead;
            self.room_id = None;
            true
        } else {
            false
        }
    }

    /// Undo damage.
    pub fn heal(&mut self, amount: u32) {
        self.damage = self.damage.saturating_sub(amount);
    }

    /// Make the monster hostile after the player attacks it.
    pub fn provoke(&mut self) {
        self.reaction = Reaction::Hostile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injure_until_dead() {
        let mut m = Monster::new(1, "goblin", Some(RoomId(1))).with_hardiness(8);
        assert!(!m.injure(5));
        assert_eq!(m.health(), 3);
        assert!(m.is_alive());
        m.heal(2);
        assert_eq!(m.health(), 5);
        assert!(!m.injure(2));
        assert!(m.injure(10));
        assert_eq!(m.health(), 0);
        assert_eq!(m.status, MonsterStatus::Dead);
        assert_eq!(m.room_id, None);
    }

    #[test]
    fn synonym_matching() {
        let m = Monster::new(2, "Alfred the butler", None).with_synonym("butler");
        assert!(m.matches("alfred"));
        assert!(m.matches("Butler"));
        assert!(!m.matches("the butler"));
    }

    #[test]
    fn provoke_turns_hostile() {
        let mut m = Monster::new(3, "guard", None).with_friendliness(Friendliness::Friend);
        m.set_reaction(Reaction::Friend);
        m.provoke();
        assert_eq!(m.reaction, Reaction::Hostile);
    }

    #[test]
    fn runtime_state_not_loaded_from_json() {
        let json = r#"{
            "id": 1, "name": "orc", "description": "", "synonyms": [],
            "hardiness": 12, "agility": 9, "courage": 80,
            "friendliness": "hostile", "friend_odds": 0, "attack_odds": 40,
            "weapon_id": null, "weapon_dice": 1, "weapon_sides": 6,
            "armor_class": 1, "room_id": 4
        }"#;
        let m: Monster = serde_json::from_str(json).unwrap();
        assert_eq!(m.damage, 0);
        assert_eq!(m.reaction, Reaction::Unknown);
        assert_eq!(m.room_id, Some(RoomId(4)));

        let with_damage = json.replace("\"room_id\": 4", "\"room_id\": 4, \"damage\": 3");
        assert!(serde_json::from_str::<Monster>(&with_damage).is_err());
    }
}
