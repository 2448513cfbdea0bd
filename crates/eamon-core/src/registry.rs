use std::collections::HashMap;

use tracing::debug;

use crate::adventure::{AdventureData, AdventureMeta};
use crate::artifact::{Artifact, Location, Owner};
use crate::entity::{ArtifactId, MonsterId, RoomId};
use crate::error::{CoreError, CoreResult};
use crate::monster::Monster;
use crate::player::Player;
use crate::room::Room;

/// Which entities a name lookup considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The given room plus, for artifacts, the player's inventory.
    Visible(RoomId),
    /// Every entity in the adventure.
    Global,
}

/// Owns every room, monster, and artifact of a running adventure, plus the
/// player.
///
/// Entities are kept in declaration order so name lookups can break ties
/// deterministically: the first-registered match wins.
#[derive(Debug, Clone)]
pub struct Registry {
    meta: AdventureMeta,
    rooms: Vec<Room>,
    monsters: Vec<Monster>,
    artifacts: Vec<Artifact>,
    player: Player,

    // Indexes
    room_index: HashMap<RoomId, usize>,
    monster_index: HashMap<MonsterId, usize>,
    artifact_index: HashMap<ArtifactId, usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new(meta: AdventureMeta, player: Player) -> Self {
        Self {
            meta,
            rooms: Vec::new(),
            monsters: Vec::new(),
            artifacts: Vec::new(),
            player,
            room_index: HashMap::new(),
            monster_index: HashMap::new(),
            artifact_index: HashMap::new(),
        }
    }

    /// Build a registry from validated adventure data and a player snapshot.
    ///
    /// The snapshot's inventory moves into the registry. Artifacts whose ids
    /// collide with adventure artifacts are given fresh ids, and the player's
    /// ready weapon and worn armor are remapped to match.
    pub fn load(data: AdventureData, mut player: Player) -> CoreResult<Self> {
        data.validate()?;
        player.clamp_abilities();
        let inventory = std::mem::take(&mut player.inventory);

        let mut registry = Self::new(data.meta, player);
        for room in data.rooms {
            registry.add_room(room)?;
        }
        for monster in data.monsters {
            registry.add_monster(monster)?;
        }
        for artifact in data.artifacts {
            registry.add_artifact(artifact)?;
        }

        let mut next_id = registry
            .artifacts
            .iter()
            .chain(inventory.iter())
            .map(|a| a.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let mut remapped: HashMap<ArtifactId, ArtifactId> = HashMap::new();
        let mut carried = Vec::with_capacity(inventory.len());
        for mut artifact in inventory {
            if registry.artifact_index.contains_key(&artifact.id) {
                let fresh = ArtifactId(next_id);
                next_id += 1;
                remapped.entry(artifact.id).or_insert(fresh);
                artifact.id = fresh;
            }
            artifact.location = Location::Carried(Owner::Player);
            carried.push(artifact.id);
            registry.add_artifact(artifact)?;
        }

        let remap = |id: ArtifactId| remapped.get(&id).copied().unwrap_or(id);
        let player = &mut registry.player;
        player.ready_weapon = player
            .ready_weapon
            .map(remap)
            .filter(|id| carried.contains(id));
        player.worn_armor = player
            .worn_armor
            .iter()
            .map(|&id| remap(id))
            .filter(|id| carried.contains(id))
            .collect();

        debug!(
            rooms = registry.rooms.len(),
            monsters = registry.monsters.len(),
            artifacts = registry.artifacts.len(),
            "registry loaded"
        );
        Ok(registry)
    }

    /// Adventure metadata.
    pub fn meta(&self) -> &AdventureMeta {
        &self.meta
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a room.
    pub fn add_room(&mut self, room: Room) -> CoreResult<RoomId> {
        let id = room.id;
        if self.room_index.contains_key(&id) {
            return Err(CoreError::DuplicateId { kind: "room", id: id.0 });
        }
        self.room_index.insert(id, self.rooms.len());
        self.rooms.push(room);
        Ok(id)
    }

    /// Register a monster.
    pub fn add_monster(&mut self, monster: Monster) -> CoreResult<MonsterId> {
        let id = monster.id;
        if self.monster_index.contains_key(&id) {
            return Err(CoreError::DuplicateId {
                kind: "monster",
                id: id.0,
            });
        }
        self.monster_index.insert(id, self.monsters.len());
        self.monsters.push(monster);
        Ok(id)
    }

    /// Register an artifact.
    pub fn add_artifact(&mut self, artifact: Artifact) -> CoreResult<ArtifactId> {
        let id = artifact.id;
        if self.artifact_index.contains_key(&id) {
            return Err(CoreError::DuplicateId {
                kind: "artifact",
                id: id.0,
            });
        }
        self.artifact_index.insert(id, self.artifacts.len());
        self.artifacts.push(artifact);
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Access by id
    // -----------------------------------------------------------------------

    /// Look up a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.room_index.get(&id).map(|&i| &self.rooms[i])
    }

    /// Mutable room lookup.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.room_index.get(&id).map(|&i| &mut self.rooms[i])
    }

    /// Look up a monster by id.
    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monster_index.get(&id).map(|&i| &self.monsters[i])
    }

    /// Mutable monster lookup.
    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monster_index.get(&id).map(|&i| &mut self.monsters[i])
    }

    /// Look up an artifact by id.
    pub fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifact_index.get(&id).map(|&i| &self.artifacts[i])
    }

    /// Mutable artifact lookup.
    pub fn artifact_mut(&mut self, id: ArtifactId) -> Option<&mut Artifact> {
        self.artifact_index.get(&id).map(|&i| &mut self.artifacts[i])
    }

    /// All rooms in declaration order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// All monsters in declaration order.
    pub fn monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter()
    }

    /// All artifacts in declaration order.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// The in-session player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the player, for stat adjustments.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Artifacts lying in a room.
    pub fn artifacts_in_room(&self, room: RoomId) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .iter()
            .filter(move |a| a.location == Location::Room(room))
    }

    /// Living monsters in a room.
    pub fn monsters_in_room(&self, room: RoomId) -> impl Iterator<Item = &Monster> {
        self.monsters
            .iter()
            .filter(move |m| m.is_alive() && m.room_id == Some(room))
    }

    /// Artifacts carried by an owner.
    pub fn carried_by(&self, owner: Owner) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .iter()
            .filter(move |a| a.location == Location::Carried(owner))
    }

    /// Artifacts the player is carrying.
    pub fn inventory(&self) -> impl Iterator<Item = &Artifact> {
        self.carried_by(Owner::Player)
    }

    /// Total weight an owner is carrying.
    pub fn carried_weight(&self, owner: Owner) -> u32 {
        self.carried_by(owner).map(|a| a.weight).sum()
    }

    /// Find an artifact by name or synonym.
    pub fn find_artifact(&self, query: &str, scope: Scope) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| {
            let in_scope = match scope {
                Scope::Global => true,
                Scope::Visible(room) => {
                    a.location == Location::Room(room)
                        || a.location == Location::Carried(Owner::Player)
                }
            };
            in_scope && a.matches(query)
        })
    }

    /// Find a living monster by name or synonym.
    pub fn find_monster(&self, query: &str, scope: Scope) -> Option<&Monster> {
        self.monsters.iter().find(|m| {
            let in_scope = match scope {
                Scope::Global => true,
                Scope::Visible(room) => m.is_alive() && m.room_id == Some(room),
            };
            in_scope && m.matches(query)
        })
    }

    /// Like [`Registry::find_artifact`], but a miss is a `NotFound` error.
    pub fn require_artifact(&self, query: &str, scope: Scope) -> CoreResult<ArtifactId> {
        self.find_artifact(query, scope)
            .map(|a| a.id)
            .ok_or_else(|| CoreError::NotFound(query.to_string()))
    }

    /// Like [`Registry::find_monster`], but a miss is a `NotFound` error.
    pub fn require_monster(&self, query: &str, scope: Scope) -> CoreResult<MonsterId> {
        self.find_monster(query, scope)
            .map(|m| m.id)
            .ok_or_else(|| CoreError::NotFound(query.to_string()))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Move an artifact. Picking it up checks that it is carryable and that
    /// the carrier can bear the extra weight; nothing changes on rejection.
    pub fn move_artifact(&mut self, id: ArtifactId, to: Location) -> CoreResult<()> {
        let artifact = self
            .artifact(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        let from = artifact.location;
        if from == to {
            return Ok(());
        }

        match to {
            Location::Room(room) => {
                if self.room(room).is_none() {
                    return Err(CoreError::InvalidReference {
                        from: id.to_string(),
                        target: room.to_string(),
                    });
                }
            }
            Location::Carried(owner) => {
                if !artifact.is_carryable() {
                    return Err(CoreError::NotCarryable(artifact.name.clone()));
                }
                let limit = match owner {
                    Owner::Player => self.player.carry_limit(),
                    Owner::Monster(m) => self
                        .monster(m)
                        .map(|m| m.hardiness.saturating_mul(10))
                        .ok_or_else(|| CoreError::InvalidReference {
                            from: id.to_string(),
                            target: m.to_string(),
                        })?,
                    Owner::Shop => {
                        return Err(CoreError::Validation(format!(
                            "{id} cannot be moved to the shop during an adventure"
                        )));
                    }
                };
                if self.carried_weight(owner) + artifact.weight > limit {
                    return Err(CoreError::TooHeavy(artifact.name.clone()));
                }
            }
        }

        if from == Location::Carried(Owner::Player) {
            self.player.ready_weapon = self.player.ready_weapon.filter(|&w| w != id);
            self.player.worn_armor.retain(|&w| w != id);
        }
        if let Some(artifact) = self.artifact_mut(id) {
            artifact.location = to;
        }
        debug!(%id, ?from, ?to, "artifact moved");
        Ok(())
    }

    /// Move a monster to a room, or offstage with `None`.
    pub fn move_monster(&mut self, id: MonsterId, to: Option<RoomId>) -> CoreResult<()> {
        if let Some(room) = to.filter(|r| self.room(*r).is_none()) {
            return Err(CoreError::InvalidReference {
                from: id.to_string(),
                target: room.to_string(),
            });
        }
        let monster = self
            .monster_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        monster.room_id = to;
        debug!(%id, ?to, "monster moved");
        Ok(())
    }

    /// Damage a monster. Returns `true` if it died; a dead monster drops
    /// everything it carried into the room where it fell.
    pub fn injure_monster(&mut self, id: MonsterId, amount: u32) -> CoreResult<bool> {
        let monster = self
            .monster_mut(id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;
        if !monster.is_alive() {
            return Err(CoreError::NotFound(monster.name.clone()));
        }
        let room = monster.room_id;
        let died = monster.injure(amount);
        if died {
            monster.weapon_id = None;
            if let Some(room) = room {
                for artifact in &mut self.artifacts {
                    if artifact.location == Location::Carried(Owner::Monster(id)) {
                        artifact.location = Location::Room(room);
                    }
                }
            }
            debug!(%id, "monster killed");
        }
        Ok(died)
    }

    /// A copy of the player with the inventory rebuilt from carried
    /// artifacts, ready to hand to a player store.
    pub fn player_snapshot(&self) -> Player {
        let mut snapshot = self.player.clone();
        snapshot.inventory = self.inventory().cloned().collect();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactKind, Weapon, WeaponType};
    use crate::player::Gender;
    use crate::room::Direction;

    fn meta() -> AdventureMeta {
        AdventureMeta {
            name: "Demo".to_string(),
            description: String::new(),
            start_room: RoomId(1),
        }
    }

    fn sword(id: u32, location: Location) -> Artifact {
        Artifact::new(id, "sword", location)
            .with_weight(5)
            .with_kind(ArtifactKind::Weapon(Weapon {
                weapon_type: WeaponType::Sword,
                odds: 10,
                dice: 1,
                sides: 8,
                hands: 1,
            }))
    }

    fn data() -> AdventureData {
        AdventureData {
            meta: meta(),
            rooms: vec![
                Room::new(1, "Throne room").with_exit(Direction::North, 2),
                Room::new(2, "Hall").with_exit(Direction::South, 1),
            ],
            monsters: vec![
                Monster::new(1, "king", Some(RoomId(1))).with_hardiness(5),
                Monster::new(2, "kitten", Some(RoomId(2))),
            ],
            artifacts: vec![
                Artifact::new(1, "throne", Location::Room(RoomId(1))).with_weight(999),
                Artifact::new(2, "crown", Location::Carried(Owner::Monster(MonsterId(1)))),
                sword(3, Location::Room(RoomId(1))),
                Artifact::new(4, "crowbar", Location::Room(RoomId(2))),
            ],
        }
    }

    fn player() -> Player {
        Player::new(1, "Leia", Gender::Female)
    }

    #[test]
    fn find_respects_visible_scope() {
        let reg = Registry::load(data(), player()).unwrap();
        assert_eq!(
            reg.find_artifact("cro", Scope::Visible(RoomId(2))).map(|a| a.id),
            Some(ArtifactId(4))
        );
        assert!(reg.find_artifact("throne", Scope::Visible(RoomId(2))).is_none());
        assert!(reg.find_artifact("throne", Scope::Global).is_some());
    }

    #[test]
    fn first_registered_match_wins() {
        let reg = Registry::load(data(), player()).unwrap();
        // "crown" (id 2) and "crowbar" (id 4) both start with "cro".
        assert_eq!(
            reg.find_artifact("cro", Scope::Global).map(|a| a.id),
            Some(ArtifactId(2))
        );
        assert_eq!(
            reg.find_monster("k", Scope::Global).map(|m| m.id),
            Some(MonsterId(1))
        );
    }

    #[test]
    fn immovable_artifact_rejected_without_change() {
        let mut reg = Registry::load(data(), player()).unwrap();
        let err = reg
            .move_artifact(ArtifactId(1), Location::Carried(Owner::Player))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotCarryable(name) if name == "throne"));
        assert_eq!(
            reg.artifact(ArtifactId(1)).unwrap().location,
            Location::Room(RoomId(1))
        );
    }

    #[test]
    fn carry_limit_enforced() {
        let mut p = player();
        p.hardiness = 1;
        let mut reg = Registry::load(data(), p).unwrap();
        reg.move_artifact(ArtifactId(3), Location::Carried(Owner::Player))
            .unwrap();
        reg.artifact_mut(ArtifactId(4)).unwrap().weight = 6;
        let err = reg
            .move_artifact(ArtifactId(4), Location::Carried(Owner::Player))
            .unwrap_err();
        assert!(matches!(err, CoreError::TooHeavy(_)));
    }

    #[test]
    fn dropping_ready_weapon_unreadies_it() {
        let mut reg = Registry::load(data(), player()).unwrap();
        reg.move_artifact(ArtifactId(3), Location::Carried(Owner::Player))
            .unwrap();
        reg.player_mut().ready_weapon = Some(ArtifactId(3));
        reg.move_artifact(ArtifactId(3), Location::Room(RoomId(1)))
            .unwrap();
        assert_eq!(reg.player().ready_weapon, None);
    }

    #[test]
    fn dead_monster_drops_inventory() {
        let mut reg = Registry::load(data(), player()).unwrap();
        assert!(!reg.injure_monster(MonsterId(1), 2).unwrap());
        assert!(reg.injure_monster(MonsterId(1), 10).unwrap());
        assert_eq!(
            reg.artifact(ArtifactId(2)).unwrap().location,
            Location::Room(RoomId(1))
        );
        assert!(reg.find_monster("king", Scope::Visible(RoomId(1))).is_none());
        assert!(reg.injure_monster(MonsterId(1), 1).is_err());
    }

    #[test]
    fn player_inventory_imported_with_fresh_ids() {
        let mut p = player();
        p.inventory.push(sword(3, Location::Carried(Owner::Player)));
        p.ready_weapon = Some(ArtifactId(3));
        let reg = Registry::load(data(), p).unwrap();

        assert!(reg.player().inventory.is_empty());
        let carried: Vec<_> = reg.inventory().collect();
        assert_eq!(carried.len(), 1);
        assert_eq!(carried[0].id, ArtifactId(5));
        assert_eq!(reg.player().ready_weapon, Some(ArtifactId(5)));

        let snapshot = reg.player_snapshot();
        assert_eq!(snapshot.inventory.len(), 1);
        assert_eq!(snapshot.ready_weapon, Some(ArtifactId(5)));
    }

    #[test]
    fn move_monster_validates_room() {
        let mut reg = Registry::load(data(), player()).unwrap();
        reg.move_monster(MonsterId(2), Some(RoomId(1))).unwrap();
        assert_eq!(reg.monsters_in_room(RoomId(1)).count(), 2);
        assert!(reg.move_monster(MonsterId(2), Some(RoomId(9))).is_err());
        assert!(reg.move_monster(MonsterId(9), None).is_err());
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut reg = Registry::new(meta(), player());
        reg.add_room(Room::new(1, "A")).unwrap();
        assert!(matches!(
            reg.add_room(Room::new(1, "B")),
            Err(CoreError::DuplicateId { kind: "room", id: 1 })
        ));
    }
}
