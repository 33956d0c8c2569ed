//! Raw dice results from a provider and die-pair extraction.

use serde::{Deserialize, Serialize};

use super::DiePair;

/// What a [`DiceRoller`](super::DiceRoller) hands back for one formula.
///
/// Providers may fill in the per-die values, the text form ("3 + 7"), or
/// both. The structured values win when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledDice {
    /// Individual die results, in formula order.
    pub values: Option<Vec<u32>>,
    /// Text rendering of the roll, e.g. "3 + 7".
    pub text: String,
}

impl RolledDice {
    /// A result with both structured values and the matching text.
    pub fn from_values(values: Vec<u32>) -> Self {
        let text = values
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        Self {
            values: Some(values),
            text,
        }
    }

    /// A result known only by its text form.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            values: None,
            text: text.into(),
        }
    }
}

impl From<DiePair> for RolledDice {
    fn from(pair: DiePair) -> Self {
        Self::from_values(vec![pair.0, pair.1])
    }
}

/// Pull the two dice out of a provider result.
///
/// Each side comes from the structured values if available, then from the
/// text form. A side that can't be recovered either way counts as 1.
pub fn extract_pair(rolled: &RolledDice) -> DiePair {
    let structured = rolled.values.as_deref().unwrap_or(&[]);
    let parsed = parse_text(&rolled.text);

    let side = |i: usize| -> u32 {
        structured
            .get(i)
            .or_else(|| parsed.get(i))
            .copied()
            .unwrap_or_else(|| {
                tracing::warn!(die = i, text = %rolled.text, "unreadable die result, using 1");
                1
            })
    };

    DiePair(side(0), side(1))
}

/// Parse "a + b" (optionally followed by "= total") into die values.
///
/// Stops at the first term that isn't a plain number so a garbled second die
/// doesn't shift later values into its place.
fn parse_text(text: &str) -> Vec<u32> {
    let expr = text.split('=').next().unwrap_or_default();
    expr.split('+')
        .map_while(|part| part.trim().parse::<u32>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_values() {
        let r = RolledDice::from_values(vec![3, 7]);
        assert_eq!(r.text, "3 + 7");
        assert_eq!(extract_pair(&r), DiePair(3, 7));
    }

    #[test]
    fn text_only() {
        assert_eq!(extract_pair(&RolledDice::from_text("4 + 9")), DiePair(4, 9));
        assert_eq!(extract_pair(&RolledDice::from_text("4+9 = 13")), DiePair(4, 9));
    }

    #[test]
    fn structured_preferred_over_text() {
        let r = RolledDice {
            values: Some(vec![2, 2]),
            text: "5 + 6".to_string(),
        };
        assert_eq!(extract_pair(&r), DiePair(2, 2));
    }

    #[test]
    fn sides_fill_in_from_text() {
        let r = RolledDice {
            values: Some(vec![8]),
            text: "8 + 3".to_string(),
        };
        assert_eq!(extract_pair(&r), DiePair(8, 3));
    }

    #[test]
    fn unreadable_sides_default_to_one() {
        assert_eq!(extract_pair(&RolledDice::from_text("6 + ?")), DiePair(6, 1));
        assert_eq!(extract_pair(&RolledDice::from_text("")), DiePair(1, 1));
        assert_eq!(extract_pair(&RolledDice::default()), DiePair(1, 1));
    }

    #[test]
    fn from_pair() {
        let r: RolledDice = DiePair(5, 10).into();
        assert_eq!(r.values, Some(vec![5, 10]));
        assert_eq!(r.text, "5 + 10");
    }
}
