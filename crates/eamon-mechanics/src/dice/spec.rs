//! Validated dice expressions like `2d6`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// `count` dice of `sides` sides each. Sides are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceSpec {
    count: u32,
    sides: u32,
}

impl DiceSpec {
    /// Validate a dice expression.
    pub fn new(count: u32, sides: u32) -> MechResult<Self> {
        if sides == 0 {
            return Err(MechError::InvalidDiceSpec(format!("{count}d{sides}")));
        }
        Ok(Self { count, sides })
    }

    /// A dice expression known to be valid at compile time.
    pub(crate) const fn fixed(count: u32, sides: u32) -> Self {
        assert!(sides > 0, "dice need at least one side");
        Self { count, sides }
    }

    /// Number of dice.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sides per die.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Smallest possible total.
    pub fn min(&self) -> u32 {
        self.count
    }

    /// Largest possible total.
    pub fn max(&self) -> u32 {
        self.count.saturating_mul(self.sides)
    }

    /// Parse `"2d6"` or `"d20"` (an omitted count means one die).
    pub fn parse(s: &str) -> MechResult<Self> {
        let invalid = || MechError::InvalidDiceSpec(s.to_string());
        let lower = s.trim().to_lowercase();
        let (count, sides) = lower.split_once('d').ok_or_else(invalid)?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| invalid())?
        };
        let sides = sides.parse().map_err(|_| invalid())?;
        Self::new(count, sides).map_err(|_| invalid())
    }
}

impl FromStr for DiceSpec {
    type Err = MechError;

    fn from_str(s: &str) -> MechResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceSpec {
    type Error = MechError;

    fn try_from(s: String) -> MechResult<Self> {
        Self::parse(&s)
    }
}

impl From<DiceSpec> for String {
    fn from(spec: DiceSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        assert_eq!(DiceSpec::parse("2d6").unwrap(), DiceSpec::new(2, 6).unwrap());
        assert_eq!(DiceSpec::parse("D20").unwrap(), DiceSpec::new(1, 20).unwrap());
        assert_eq!(" 3d4 ".parse::<DiceSpec>().unwrap().max(), 12);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "d", "2d", "2x6", "2d0", "-1d6", "ad6"] {
            assert!(DiceSpec::parse(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let spec = DiceSpec::new(3, 6).unwrap();
        assert_eq!(serde_json::to_string(&spec).unwrap(), "\"3d6\"");
        assert!(serde_json::from_str::<DiceSpec>("\"1d0\"").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(DiceSpec::new(2, 8).unwrap().to_string(), "2d8");
    }
}
