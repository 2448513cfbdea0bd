use eamon_core::{
    AdventureData, AdventureMeta, Artifact, ArtifactId, Gender, Location, Owner, Player, Registry,
    Room, RoomId, Scope,
};
use proptest::prelude::*;

fn adventure(names: &[String]) -> AdventureData {
    AdventureData {
        meta: AdventureMeta {
            name: "Lookup".to_string(),
            description: String::new(),
            start_room: RoomId(1),
        },
        rooms: vec![Room::new(1, "Cellar")],
        monsters: Vec::new(),
        artifacts: names
            .iter()
            .enumerate()
            .map(|(i, name)| Artifact::new(i as u32 + 1, name.clone(), Location::Room(RoomId(1))))
            .collect(),
    }
}

#[test]
fn adventure_json_loads_into_registry() {
    let json = r#"{
        "meta": {"name": "Tiny", "description": "Two rooms.", "start_room": 1},
        "rooms": [
            {"id": 1, "name": "Hall", "description": "A hall.", "exits": [{"direction": "north", "room_to": 2}]},
            {"id": 2, "name": "Yard", "description": "A yard.", "exits": []}
        ],
        "monsters": [],
        "artifacts": [
            {"id": 1, "name": "lamp", "description": "", "synonyms": ["lantern"], "value": 5,
             "weight": 2, "location": {"room": 2}, "kind": "other"}
        ]
    }"#;
    let data = AdventureData::from_json(json).unwrap();
    let registry = Registry::load(data, Player::new(1, "Leia", Gender::Female)).unwrap();
    assert_eq!(
        registry
            .find_artifact("lantern", Scope::Visible(RoomId(2)))
            .map(|a| a.id),
        Some(ArtifactId(1))
    );
    assert!(registry
        .find_artifact("lantern", Scope::Visible(RoomId(1)))
        .is_none());
}

#[test]
fn picked_up_artifacts_follow_the_player() {
    let names = vec!["coin".to_string(), "cup".to_string()];
    let mut registry =
        Registry::load(adventure(&names), Player::new(1, "Han", Gender::Male)).unwrap();
    registry
        .move_artifact(ArtifactId(2), Location::Carried(Owner::Player))
        .unwrap();
    // Visible from any room once carried.
    assert!(registry.find_artifact("cup", Scope::Visible(RoomId(99))).is_some());
    assert_eq!(registry.player_snapshot().inventory.len(), 1);
}

proptest! {
    #[test]
    fn lookup_returns_first_declared_match(
        names in prop::collection::vec("[a-c]{1,4}", 1..12),
        query in "[a-c]{1,2}",
    ) {
        let registry = Registry::load(adventure(&names), Player::new(1, "Leia", Gender::Female)).unwrap();
        let expected = names
            .iter()
            .position(|n| n.starts_with(&query))
            .map(|i| ArtifactId(i as u32 + 1));
        let found = registry.find_artifact(&query, Scope::Global).map(|a| a.id);
        prop_assert_eq!(found, expected);
    }
}
