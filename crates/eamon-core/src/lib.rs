//! Core types for the Eamon adventure engine: rooms, monsters, artifacts,
//! players, and the entity registry that owns them during a session.
//!
//! This crate is independent of dice and command handling. You can build a
//! [`Registry`] programmatically or load one from an [`AdventureData`] JSON
//! document.

/// Adventure definition schema and load-time validation.
pub mod adventure;
/// Artifact records: weapons, wearables, and everything else.
pub mod artifact;
/// Entity identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Monster records and dispositions.
pub mod monster;
/// The player record, spells, and prime attributes.
pub mod player;
/// The registry that owns all entities for one session.
pub mod registry;
/// Rooms, exits, and compass directions.
pub mod room;
/// Player persistence boundary.
pub mod store;

/// Re-export the adventure schema.
pub use adventure::{AdventureData, AdventureMeta};
/// Re-export artifact types.
pub use artifact::{ArmorType, Artifact, ArtifactKind, Location, Owner, WeaponType};
/// Re-export identifier types.
pub use entity::{ArtifactId, MonsterId, PlayerId, RoomId};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export monster types.
pub use monster::{Friendliness, Monster, MonsterStatus, Reaction};
/// Re-export player types.
pub use player::{Attribute, Gender, Player, Spell, SpellAbilities, WeaponAbilities};
/// Re-export registry types.
pub use registry::{Registry, Scope};
/// Re-export room types.
pub use room::{Direction, Room, RoomExit};
/// Re-export persistence types.
pub use store::{JsonDirStore, MemoryStore, PlayerStore};
