//! Dice formula parsing ("1d10 + 1d10", "2d10").

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::Die;
use crate::error::{MechError, MechResult};

/// `count` dice of one type, e.g. the "2d10" in "2d10 + 1d6".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTerm {
    /// How many dice to roll.
    pub count: u32,
    /// The die type.
    pub die: Die,
}

/// A sum of dice terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceFormula {
    /// Terms in formula order.
    pub terms: Vec<DiceTerm>,
}

impl DiceFormula {
    /// Parse terms of the form `NdS` (or `dS`) joined by `+`.
    pub fn parse(input: &str) -> MechResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MechError::InvalidFormula("empty formula".to_string()));
        }

        let terms = input
            .split('+')
            .map(|term| parse_term(term.trim(), input))
            .collect::<MechResult<Vec<_>>>()?;

        Ok(Self { terms })
    }

    /// Total number of dice rolled.
    pub fn dice_count(&self) -> u32 {
        self.terms.iter().map(|t| t.count).sum()
    }

    /// Roll every die in order.
    pub fn roll(&self, rng: &mut StdRng) -> Vec<u32> {
        self.terms
            .iter()
            .flat_map(|t| std::iter::repeat_n(t.die, t.count as usize))
            .map(|die| rng.random_range(1..=die.sides()))
            .collect()
    }
}

impl std::fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .terms
            .iter()
            .map(|t| format!("{}{}", t.count, t.die))
            .collect();
        write!(f, "{}", parts.join(" + "))
    }
}

fn parse_term(term: &str, whole: &str) -> MechResult<DiceTerm> {
    let invalid = || MechError::InvalidFormula(format!("bad term '{term}' in '{whole}'"));

    let d_pos = term.find(['d', 'D']).ok_or_else(invalid)?;
    let count_str = &term[..d_pos];
    let count = if count_str.is_empty() {
        1
    } else {
        count_str.parse::<u32>().map_err(|_| invalid())?
    };
    if count == 0 {
        return Err(invalid());
    }
    let die = Die::from_str_tag(&term[d_pos..]).ok_or_else(invalid)?;
    Ok(DiceTerm { count, die })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn parses_default_formula() {
        let f = DiceFormula::parse("1d10 + 1d10").unwrap();
        assert_eq!(f.terms.len(), 2);
        assert_eq!(f.dice_count(), 2);
        assert_eq!(f.to_string(), "1d10 + 1d10");
    }

    #[test]
    fn parses_compact_forms() {
        let f = DiceFormula::parse("2D10").unwrap();
        assert_eq!(
            f.terms,
            vec![DiceTerm {
                count: 2,
                die: Die::D10
            }]
        );
        assert_eq!(DiceFormula::parse("d6+d6").unwrap().dice_count(), 2);
    }

    #[test]
    fn rejects_bad_formulas() {
        assert!(DiceFormula::parse("").is_err());
        assert!(DiceFormula::parse("10").is_err());
        assert!(DiceFormula::parse("0d10").is_err());
        assert!(DiceFormula::parse("1d10 + ").is_err());
        assert!(DiceFormula::parse("xd10").is_err());
        let err = DiceFormula::parse("1d1").unwrap_err();
        assert!(err.to_string().contains("bad term '1d1'"));
    }

    #[test]
    fn roll_stays_in_range() {
        let f = DiceFormula::parse("1d10 + 1d10").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let dice = f.roll(&mut rng);
            assert_eq!(dice.len(), 2);
            assert!(dice.iter().all(|d| (1..=10).contains(d)));
        }
    }

    #[test]
    fn roll_deterministic_with_seed() {
        let f = DiceFormula::parse("2d10").unwrap();
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        assert_eq!(f.roll(&mut rng1), f.roll(&mut rng2));
    }
}
