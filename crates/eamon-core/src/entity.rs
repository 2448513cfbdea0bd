use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a room within one adventure.
    RoomId,
    "room"
);
numeric_id!(
    /// Identifier of a monster within one adventure.
    MonsterId,
    "monster"
);
numeric_id!(
    /// Identifier of an artifact within one adventure or the shop's stock.
    ArtifactId,
    "artifact"
);
numeric_id!(
    /// Identifier of a player record at the persistence boundary.
    PlayerId,
    "player"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        assert_eq!(RoomId(3).to_string(), "room#3");
        assert_eq!(ArtifactId(12).to_string(), "artifact#12");
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&MonsterId(7)).unwrap();
        assert_eq!(json, "7");
        let id: RoomId = serde_json::from_str("42").unwrap();
        assert_eq!(id, RoomId(42));
    }
}
