//! Dice: formulas, die pairs and the providers the resolver rolls through.
//!
//! The kernel never generates random numbers itself. It asks a
//! [`DiceRoller`] to evaluate a formula and a [`RerollConfirmer`] whether to
//! keep rolling after doubles.

pub mod formula;
pub mod provider;
pub mod roll;

pub use formula::{DiceFormula, DiceTerm};
pub use provider::{
    AlwaysReroll, DiceRoller, NeverReroll, RandomDice, RerollConfirmer, ScriptedConfirm,
    ScriptedDice,
};
pub use roll::{RolledDice, extract_pair};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Six-sided die.
    D6,
    /// Ten-sided die, the MEGS default.
    D10,
    /// Twenty-sided die.
    D20,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D6 => 6,
            Self::D10 => 10,
            Self::D20 => 20,
            Self::Custom(n) => n,
        }
    }

    /// Parse a die from a string like "d10" or "d12".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "d6" => Some(Self::D6),
            "d10" => Some(Self::D10),
            "d20" => Some(Self::D20),
            other => {
                let num = other.strip_prefix('d')?.parse::<u32>().ok()?;
                if num >= 2 { Some(Self::Custom(num)) } else { None }
            }
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// The two dice of one MEGS roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiePair(pub u32, pub u32);

impl DiePair {
    /// Both dice show the same face.
    pub fn is_doubles(self) -> bool {
        self.0 == self.1
    }

    /// Both dice show 1: an automatic failure.
    pub fn is_double_ones(self) -> bool {
        self.0 == 1 && self.1 == 1
    }
}

impl std::fmt::Display for DiePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_from_str() {
        assert_eq!(Die::from_str_tag("d10"), Some(Die::D10));
        assert_eq!(Die::from_str_tag("D6"), Some(Die::D6));
        assert_eq!(Die::from_str_tag("d12"), Some(Die::Custom(12)));
        assert_eq!(Die::from_str_tag("d1"), None);
        assert_eq!(Die::from_str_tag("x10"), None);
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D10.to_string(), "d10");
        assert_eq!(Die::Custom(12).to_string(), "d12");
    }

    #[test]
    fn pair_classification() {
        assert!(DiePair(4, 4).is_doubles());
        assert!(!DiePair(4, 4).is_double_ones());
        assert!(DiePair(1, 1).is_doubles());
        assert!(DiePair(1, 1).is_double_ones());
        assert!(!DiePair(1, 2).is_doubles());
        assert_eq!(DiePair(3, 9).to_string(), "3 + 9");
    }
}
