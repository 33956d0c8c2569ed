//! The outcome record handed to presentation.

use serde::{Deserialize, Serialize};

use super::RollKind;

/// Which resolution branch produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    /// The roll fell short of the Success Number.
    Failure,
    /// Column shifts pushed past the Result Table: the effect applies in full.
    AllResult,
    /// The action landed but had no effect.
    NoEffect,
    /// A normal success with RAPs from the Result Table.
    Success,
    /// The final pair came up double 1s: automatic failure.
    #[serde(rename = "DOUBLE_1S")]
    DoubleOnes,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failure => write!(f, "Failure"),
            Self::AllResult => write!(f, "All Result"),
            Self::NoEffect => write!(f, "No Effect"),
            Self::Success => write!(f, "Success"),
            Self::DoubleOnes => write!(f, "Double 1s"),
        }
    }
}

/// The effect column of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectResult {
    /// RAPs read from the Result Table.
    Raps(i32),
    /// No effect ("N").
    NoEffect,
    /// ALL result: the full EV, plus APs for each column shifted past zero.
    All {
        /// The EV the result is based on.
        effect_value: i32,
        /// Columns shifted beyond the zero column.
        bonus: i32,
    },
}

impl std::fmt::Display for EffectResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raps(n) => write!(f, "{n}"),
            Self::NoEffect => write!(f, "N"),
            Self::All {
                effect_value,
                bonus: 0,
            } => write!(f, "A({effect_value})"),
            Self::All {
                effect_value,
                bonus,
            } => write!(f, "A({effect_value})+{bonus}"),
        }
    }
}

/// A fully resolved action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultData {
    /// Caller-supplied label for the roll (e.g. "Martial Artist").
    pub label: String,
    /// What kind of trait was rolled.
    pub kind: RollKind,
    /// The trait's rank as shown on the sheet.
    pub value_or_aps: i32,
    /// Which branch produced this result.
    pub outcome: OutcomeKind,
    /// Whether the action counts as a success.
    pub success: bool,
    /// AV after Hero Points.
    pub action_value: i32,
    /// OV after Hero Points.
    pub opposing_value: i32,
    /// EV after Hero Points.
    pub effect_value: i32,
    /// RV after Hero Points.
    pub resistance_value: i32,
    /// The Success Number the roll had to reach.
    pub difficulty: i32,
    /// Roll column shifts plus external RV shifts; 0 when the roll failed.
    pub column_shifts: i32,
    /// Effect column, absent when the roll failed.
    pub effect: Option<EffectResult>,
    /// RAP magnitude, absent when the roll failed.
    pub result_aps: Option<i32>,
    /// Every die rolled, in order.
    pub dice: Vec<u32>,
    /// Sum of `dice`.
    pub roll_total: i32,
    /// Rerolls accepted after doubles.
    pub rerolls: u32,
}

impl std::fmt::Display for ResultData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: rolled {} vs {}",
            self.outcome, self.roll_total, self.difficulty
        )?;
        if self.column_shifts != 0 {
            write!(f, ", {} column shifts", self.column_shifts)?;
        }
        if let Some(effect) = &self.effect {
            write!(f, ", RAPs {effect}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultData {
        ResultData {
            label: "Punch".to_string(),
            kind: RollKind::Attribute,
            value_or_aps: 5,
            outcome: OutcomeKind::Success,
            success: true,
            action_value: 5,
            opposing_value: 5,
            effect_value: 5,
            resistance_value: 5,
            difficulty: 6,
            column_shifts: 2,
            effect: Some(EffectResult::Raps(6)),
            result_aps: Some(6),
            dice: vec![4, 9],
            roll_total: 13,
            rerolls: 0,
        }
    }

    #[test]
    fn effect_display() {
        assert_eq!(EffectResult::Raps(7).to_string(), "7");
        assert_eq!(EffectResult::NoEffect.to_string(), "N");
        assert_eq!(
            EffectResult::All {
                effect_value: 10,
                bonus: 0
            }
            .to_string(),
            "A(10)"
        );
        assert_eq!(
            EffectResult::All {
                effect_value: 10,
                bonus: 2
            }
            .to_string(),
            "A(10)+2"
        );
    }

    #[test]
    fn outcome_display() {
        assert_eq!(OutcomeKind::AllResult.to_string(), "All Result");
        assert_eq!(OutcomeKind::DoubleOnes.to_string(), "Double 1s");
    }

    #[test]
    fn result_display() {
        assert_eq!(
            sample().to_string(),
            "Success: rolled 13 vs 6, 2 column shifts, RAPs 6"
        );
        let failed = ResultData {
            outcome: OutcomeKind::Failure,
            success: false,
            column_shifts: 0,
            effect: None,
            result_aps: None,
            ..sample()
        };
        assert_eq!(failed.to_string(), "Failure: rolled 13 vs 6");
    }

    #[test]
    fn serializes_for_presentation() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["outcome"], "SUCCESS");
        assert_eq!(json["rollTotal"], 13);
        assert_eq!(json["effect"]["Raps"], 6);
        assert_eq!(
            serde_json::to_value(OutcomeKind::DoubleOnes).unwrap(),
            "DOUBLE_1S"
        );
        assert_eq!(
            serde_json::to_value(OutcomeKind::AllResult).unwrap(),
            "ALL_RESULT"
        );
    }
}
