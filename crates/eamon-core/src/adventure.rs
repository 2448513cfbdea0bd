use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, Location, Owner};
use crate::entity::{MonsterId, RoomId};
use crate::error::{CoreError, CoreResult};
use crate::monster::Monster;
use crate::room::Room;

/// Metadata about an adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdventureMeta {
    /// Adventure title.
    pub name: String,
    /// Introduction printed when the session starts.
    pub description: String,
    /// Room the player starts in.
    pub start_room: RoomId,
}

/// A complete adventure definition as loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdventureData {
    /// Title, introduction, and start room.
    pub meta: AdventureMeta,
    /// Rooms in declaration order.
    pub rooms: Vec<Room>,
    /// Monsters in declaration order.
    pub monsters: Vec<Monster>,
    /// Artifacts in declaration order.
    pub artifacts: Vec<Artifact>,
}

impl AdventureData {
    /// Parse and validate an adventure from a JSON string.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject duplicate ids and references to entities that don't exist.
    pub fn validate(&self) -> CoreResult<()> {
        let rooms = unique_ids("room", self.rooms.iter().map(|r| r.id.0))?;
        let monsters = unique_ids("monster", self.monsters.iter().map(|m| m.id.0))?;
        let artifacts = unique_ids("artifact", self.artifacts.iter().map(|a| a.id.0))?;

        let room_exists = |from: String, id: RoomId| -> CoreResult<()> {
            if rooms.contains(&id.0) {
                Ok(())
            } else {
                Err(CoreError::InvalidReference {
                    from,
                    target: id.to_string(),
                })
            }
        };

        room_exists("start room".to_string(), self.meta.start_room)?;

        for room in &self.rooms {
            for exit in &room.exits {
                room_exists(format!("{} exit {}", room.id, exit.direction), exit.room_to)?;
            }
        }

        for monster in &self.monsters {
            if let Some(room_id) = monster.room_id {
                room_exists(monster.id.to_string(), room_id)?;
            }
            if let Some(weapon_id) = monster.weapon_id.filter(|w| !artifacts.contains(&w.0)) {
                return Err(CoreError::InvalidReference {
                    from: monster.id.to_string(),
                    target: weapon_id.to_string(),
                });
            }
        }

        for artifact in &self.artifacts {
            match artifact.location {
                Location::Room(room_id) => room_exists(artifact.id.to_string(), room_id)?,
                Location::Carried(Owner::Monster(MonsterId(m))) if !monsters.contains(&m) => {
                    return Err(CoreError::InvalidReference {
                        from: artifact.id.to_string(),
                        target: MonsterId(m).to_string(),
                    });
                }
                Location::Carried(Owner::Shop) => {
                    return Err(CoreError::Validation(format!(
                        "{} cannot start in the shop",
                        artifact.id
                    )));
                }
                Location::Carried(_) => {}
            }
        }

        Ok(())
    }
}

fn unique_ids(kind: &'static str, ids: impl Iterator<Item = u32>) -> CoreResult<HashSet<u32>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::DuplicateId { kind, id });
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Direction;

    fn sample() -> AdventureData {
        AdventureData {
            meta: AdventureMeta {
                name: "Test".to_string(),
                description: "A test.".to_string(),
                start_room: RoomId(1),
            },
            rooms: vec![
                Room::new(1, "Hall").with_exit(Direction::North, 2),
                Room::new(2, "Yard").with_exit(Direction::South, 1),
            ],
            monsters: vec![Monster::new(1, "guard", Some(RoomId(2)))],
            artifacts: vec![
                Artifact::new(1, "throne", Location::Room(RoomId(1))).with_weight(999),
                Artifact::new(2, "key", Location::Carried(Owner::Monster(MonsterId(1)))),
            ],
        }
    }

    #[test]
    fn valid_adventure_passes() {
        sample().validate().unwrap();
    }

    #[test]
    fn json_round_trip() {
        let json = sample().to_json().unwrap();
        let back = AdventureData::from_json(&json).unwrap();
        assert_eq!(back.rooms.len(), 2);
        assert_eq!(back.meta, sample().meta);
    }

    #[test]
    fn duplicate_room_id_rejected() {
        let mut data = sample();
        data.rooms.push(Room::new(2, "Other"));
        assert!(matches!(
            data.validate(),
            Err(CoreError::DuplicateId { kind: "room", id: 2 })
        ));
    }

    #[test]
    fn dangling_exit_rejected() {
        let mut data = sample();
        data.rooms[0] = Room::new(1, "Hall").with_exit(Direction::Up, 9);
        assert!(matches!(
            data.validate(),
            Err(CoreError::InvalidReference { .. })
        ));
    }

    #[test]
    fn dangling_monster_owner_rejected() {
        let mut data = sample();
        data.artifacts[1].location = Location::Carried(Owner::Monster(MonsterId(5)));
        let err = data.validate().unwrap_err();
        assert!(err.to_string().contains("monster#5"));
    }

    #[test]
    fn missing_start_room_rejected() {
        let mut data = sample();
        data.meta.start_room = RoomId(77);
        assert!(data.validate().is_err());
    }

    #[test]
    fn unknown_top_level_field_rejected() {
        let json = sample().to_json().unwrap();
        let json = json.replacen('{', "{\"version\": 2,", 1);
        assert!(matches!(
            AdventureData::from_json(&json),
            Err(CoreError::Json(_))
        ));
    }
}
