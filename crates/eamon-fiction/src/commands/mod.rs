//! The built-in command set.

mod combat;
mod equipment;
mod help;
mod items;
mod look;
mod magic;
mod movement;
mod talk;

pub use combat::AttackCommand;
pub use equipment::{ReadyCommand, RemoveCommand, WearCommand};
pub use help::HelpCommand;
pub use items::{DropCommand, GetCommand, InventoryCommand};
pub use look::LookCommand;
pub use magic::{BlastCommand, HealCommand, PowerCommand, SpeedCommand};
pub use movement::{FleeCommand, MoveCommand};
pub use talk::SayCommand;

pub(crate) use combat::{monsters_act, roll_reactions};
pub(crate) use look::describe_room;

use crate::command::Command;
use crate::error::{FictionError, FictionResult};

/// Every built-in command, in registration order.
pub fn core_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(MoveCommand),
        Box::new(LookCommand),
        Box::new(GetCommand),
        Box::new(DropCommand),
        Box::new(InventoryCommand),
        Box::new(SayCommand),
        Box::new(ReadyCommand),
        Box::new(WearCommand),
        Box::new(RemoveCommand),
        Box::new(AttackCommand),
        Box::new(FleeCommand),
        Box::new(BlastCommand),
        Box::new(HealCommand),
        Box::new(SpeedCommand),
        Box::new(PowerCommand),
        Box::new(HelpCommand),
    ]
}

/// Upper-case the first letter, for names opening a sentence.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// The argument, or a "Get what?" style rejection.
fn required<'a>(verb: &str, arg: &'a str) -> FictionResult<&'a str> {
    if arg.is_empty() {
        Err(FictionError::MissingArgument(capitalize(verb)))
    } else {
        Ok(arg)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A small world for command tests.

    use eamon_core::artifact::{Armor, Weapon};
    use eamon_core::{
        AdventureData, AdventureMeta, ArmorType, Artifact, ArtifactKind, Direction, Gender,
        Location, Monster, MonsterId, Owner, Player, Room, RoomId, WeaponType,
    };

    use crate::{PlainAdventure, Session, SessionConfig};

    /// Cave (1) north to Hall (2), which holds a chest, a sword, a great
    /// axe, armor, a shield and a sleeping dog.
    pub(crate) fn world() -> AdventureData {
        let weapon = |weapon_type, hands| Weapon {
            weapon_type,
            odds: 10,
            dice: 1,
            sides: 8,
            hands,
        };
        let armor = |armor_type, armor_class| Armor {
            armor_type,
            armor_class,
            armor_penalty: 10,
        };
        AdventureData {
            meta: AdventureMeta {
                name: "Test Caves".into(),
                description: String::new(),
                start_room: RoomId(1),
            },
            rooms: vec![
                Room::new(1, "Cave")
                    .with_description("A damp cave.")
                    .with_exit(Direction::North, 2),
                Room::new(2, "Hall")
                    .with_description("A great hall.")
                    .with_exit(Direction::South, 1),
            ],
            monsters: vec![Monster::new(1, "dog", Some(RoomId(2)))],
            artifacts: vec![
                Artifact::new(1, "chest", Location::Room(RoomId(2))).with_weight(999),
                Artifact::new(2, "sword", Location::Room(RoomId(2)))
                    .with_kind(ArtifactKind::Weapon(weapon(WeaponType::Sword, 1)))
                    .with_description("A fine blade."),
                Artifact::new(3, "great axe", Location::Room(RoomId(2)))
                    .with_kind(ArtifactKind::Weapon(weapon(WeaponType::Axe, 2))),
                Artifact::new(4, "chain mail", Location::Room(RoomId(2)))
                    .with_kind(ArtifactKind::Wearable(armor(ArmorType::Armor, 3))),
                Artifact::new(5, "shield", Location::Room(RoomId(2)))
                    .with_kind(ArtifactKind::Wearable(armor(ArmorType::Shield, 1))),
                Artifact::new(6, "bone", Location::Carried(Owner::Monster(MonsterId(1)))),
            ],
        }
    }

    pub(crate) fn player() -> Player {
        Player::new(1, "Tester", Gender::Female)
    }

    pub(crate) fn session() -> Session {
        Session::bootstrap(
            world(),
            &PlainAdventure,
            player(),
            SessionConfig::default().with_seed(7),
        )
        .unwrap()
    }

    /// Bootstrapped and standing in the hall.
    pub(crate) fn in_hall() -> Session {
        let mut session = session();
        session.submit("n");
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("dog"), "Dog");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
    }

    #[test]
    fn required_argument() {
        assert_eq!(required("get", "lamp").unwrap(), "lamp");
        assert_eq!(required("get", "").unwrap_err().to_string(), "Get what?");
    }

    #[test]
    fn core_command_names() {
        let names: Vec<String> = core_commands()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "move", "look", "get", "drop", "inventory", "say", "ready", "wear", "remove",
                "attack", "flee", "blast", "heal", "speed", "power", "help"
            ]
        );
    }
}
