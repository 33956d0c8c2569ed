//! Action resolution: from AV/OV/EV/RV and dice to a finished result.
//!
//! [`Resolver::resolve`] runs the whole pipeline:
//! 1. column shifts from unskilled use, maneuvers and extra result shifts
//! 2. Hero Point adjustments and the Success Number
//! 3. the reroll loop
//! 4. double 1s / failure checks
//! 5. roll column shifts and the Result Table (or the ALL / No Effect case)

pub mod result;

pub use result::{EffectResult, OutcomeKind, ResultData};

use serde::{Deserialize, Serialize};

use crate::config::{AllResultPolicy, ResolverConfig};
use crate::dice::{DiceFormula, DiePair, DiceRoller, RerollConfirmer};
use crate::error::{MechError, MechResult};
use crate::maneuver::ManeuverTable;
use crate::reroll::{DiceSequence, RerollCoordinator};
use crate::shift::count_shifts;
use crate::tables::ResolutionTables;

/// Column shifts lost to unskilled use, on both OV and RV.
pub const UNSKILLED_SHIFTS: i32 = 2;

/// What kind of trait a roll uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollKind {
    /// A physical, mental or mystical attribute.
    #[default]
    Attribute,
    /// A power.
    Power,
    /// A skill or subskill.
    Skill,
    /// A gadget's ability.
    Gadget,
    /// Anything else.
    Other,
}

impl std::fmt::Display for RollKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute => write!(f, "attribute"),
            Self::Power => write!(f, "power"),
            Self::Skill => write!(f, "skill"),
            Self::Gadget => write!(f, "gadget"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// The four values of an action, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollValues {
    /// Display label for the roll.
    pub label: String,
    /// What kind of trait is rolled.
    pub kind: RollKind,
    /// The trait's rank (or AP cost) as shown on the sheet.
    pub value_or_aps: i32,
    /// Action Value.
    pub action_value: i32,
    /// Opposing Value.
    pub opposing_value: i32,
    /// Effect Value.
    pub effect_value: i32,
    /// Resistance Value.
    pub resistance_value: i32,
    /// Formula override; the resolver's default is used when absent.
    pub roll_formula: Option<String>,
    /// The actor lacks the skill and takes the unskilled penalty.
    pub unskilled: bool,
}

impl RollValues {
    /// An attribute roll with the given AV/OV/EV/RV.
    pub fn new(label: impl Into<String>, av: i32, ov: i32, ev: i32, rv: i32) -> Self {
        Self {
            label: label.into(),
            kind: RollKind::default(),
            value_or_aps: av,
            action_value: av,
            opposing_value: ov,
            effect_value: ev,
            resistance_value: rv,
            roll_formula: None,
            unskilled: false,
        }
    }

    /// Set the roll kind.
    pub fn with_kind(mut self, kind: RollKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the rank shown on the sheet.
    pub fn with_value_or_aps(mut self, value: i32) -> Self {
        self.value_or_aps = value;
        self
    }

    /// Override the dice formula.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.roll_formula = Some(formula.into());
        self
    }

    /// Mark the roll as unskilled.
    pub fn with_unskilled(mut self, unskilled: bool) -> Self {
        self.unskilled = unskilled;
        self
    }
}

/// Hero Points spent to raise each value for one roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPointSpend {
    /// Added to AV.
    pub av: i32,
    /// Added to OV.
    pub ov: i32,
    /// Added to EV.
    pub ev: i32,
    /// Added to RV.
    pub rv: i32,
}

/// Everything the resolver needs for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// The action's values.
    pub roll: RollValues,
    /// Hero Points spent on this roll.
    pub hero_points: HeroPointSpend,
    /// Combat maneuver key, if one is used.
    pub maneuver: Option<String>,
    /// Extra shifts added to the RV column shifts.
    pub extra_result_column_shifts: i32,
    /// A first roll the caller already made.
    pub initial_roll: Option<DiePair>,
}

impl ResolveRequest {
    /// A plain request with no Hero Points, maneuver or extra shifts.
    pub fn new(roll: RollValues) -> Self {
        Self {
            roll,
            hero_points: HeroPointSpend::default(),
            maneuver: None,
            extra_result_column_shifts: 0,
            initial_roll: None,
        }
    }

    /// Spend Hero Points.
    pub fn with_hero_points(mut self, hero_points: HeroPointSpend) -> Self {
        self.hero_points = hero_points;
        self
    }

    /// Use a combat maneuver.
    pub fn with_maneuver(mut self, maneuver: impl Into<String>) -> Self {
        self.maneuver = Some(maneuver.into());
        self
    }

    /// Add result column shifts.
    pub fn with_extra_shifts(mut self, shifts: i32) -> Self {
        self.extra_result_column_shifts = shifts;
        self
    }

    /// Start from a pair the caller already rolled.
    pub fn with_initial_roll(mut self, pair: DiePair) -> Self {
        self.initial_roll = Some(pair);
        self
    }
}

/// Column shifts applied before the roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnShifts {
    /// Subtracted from the OV column (and added to the RV index).
    pub ov: i32,
    /// Added to the roll's own column shifts.
    pub rv: i32,
}

/// Resolves actions against injected tables and maneuvers.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    tables: &'a ResolutionTables,
    maneuvers: &'a ManeuverTable,
    config: ResolverConfig,
}

impl<'a> Resolver<'a> {
    /// Create a resolver. Fails if the configured formula doesn't roll two dice.
    pub fn new(
        tables: &'a ResolutionTables,
        maneuvers: &'a ManeuverTable,
        config: ResolverConfig,
    ) -> MechResult<Self> {
        check_formula(&config.formula)?;
        Ok(Self {
            tables,
            maneuvers,
            config,
        })
    }

    /// OV and RV column shifts from unskilled use, a maneuver and extra shifts.
    pub fn column_shifts(
        &self,
        roll: &RollValues,
        maneuver: Option<&str>,
        extra_result_column_shifts: i32,
    ) -> MechResult<ColumnShifts> {
        let mut shifts = ColumnShifts::default();
        if roll.unskilled {
            shifts.ov = shifts.ov.saturating_sub(UNSKILLED_SHIFTS);
            shifts.rv = shifts.rv.saturating_sub(UNSKILLED_SHIFTS);
        }
        if let Some(key) = maneuver {
            let m = self.maneuvers.lookup(key)?;
            shifts.ov = shifts.ov.saturating_add(m.ov_shifts);
            shifts.rv = shifts.rv.saturating_add(m.rv_shifts);
        }
        shifts.rv = shifts.rv.saturating_add(extra_result_column_shifts);
        Ok(shifts)
    }

    /// Resolve one action.
    ///
    /// Game outcomes, including failure, are returned as `Ok`. Errors are
    /// configuration problems: an unknown maneuver, a bad formula, or an
    /// out-of-bounds lookup under the strict bounds policy.
    pub async fn resolve(
        &self,
        request: &ResolveRequest,
        dice: &dyn DiceRoller,
        confirm: &dyn RerollConfirmer,
    ) -> MechResult<ResultData> {
        let roll = &request.roll;
        let hp = request.hero_points;
        let bounds = self.config.bounds;

        let shifts = self.column_shifts(
            roll,
            request.maneuver.as_deref(),
            request.extra_result_column_shifts,
        )?;
        let formula = roll.roll_formula.as_deref().unwrap_or(&self.config.formula);
        check_formula(formula)?;

        let adjusted = Adjusted {
            av: roll.action_value.saturating_add(hp.av),
            ov: roll.opposing_value.saturating_add(hp.ov),
            ev: roll.effect_value.saturating_add(hp.ev),
            rv: roll.resistance_value.saturating_add(hp.rv),
        };
        let difficulty = self
            .tables
            .action_difficulty(adjusted.av, adjusted.ov, shifts.ov, bounds)?;
        tracing::debug!(
            label = %roll.label,
            av = adjusted.av,
            ov = adjusted.ov,
            ov_shifts = shifts.ov,
            rv_shifts = shifts.rv,
            difficulty,
            "resolving action"
        );

        let sequence = RerollCoordinator::new(dice, confirm, formula)
            .run(request.initial_roll)
            .await;
        let roll_total = i32::try_from(sequence.total()).unwrap_or(i32::MAX);
        let record = Record {
            roll,
            adjusted,
            difficulty,
            sequence: &sequence,
            roll_total,
        };

        if sequence.is_double_ones() {
            tracing::debug!("double 1s, automatic failure");
            return Ok(record.finish(OutcomeKind::DoubleOnes, false, 0, None));
        }
        if roll_total < difficulty {
            tracing::debug!(roll_total, difficulty, "roll failed");
            return Ok(record.finish(OutcomeKind::Failure, false, 0, None));
        }

        let av_index = self.tables.index_for(adjusted.av) as i32;
        let ov_index = (self.tables.index_for(adjusted.ov) as i32).saturating_sub(shifts.ov);
        let roll_shifts = count_shifts(roll_total, av_index, ov_index, self.tables.action_table());
        let total_shifts = (roll_shifts as i32).saturating_add(shifts.rv);

        let rv_index = (self.tables.index_for(adjusted.rv) as i32).saturating_add(shifts.ov);
        let shifted_rv_index = rv_index.saturating_sub(total_shifts);
        tracing::debug!(
            roll_total,
            roll_shifts,
            total_shifts,
            shifted_rv_index,
            "roll succeeded"
        );

        if shifted_rv_index <= 0 {
            let effect_value = match self.config.all_result {
                AllResultPolicy::IncludeHeroPoints => adjusted.ev,
                AllResultPolicy::ExcludeHeroPoints => roll.effect_value,
            };
            let bonus = shifted_rv_index.saturating_abs();
            let raps = effect_value.saturating_add(bonus);
            return Ok(if raps == 0 {
                record.finish(
                    OutcomeKind::NoEffect,
                    true,
                    total_shifts,
                    Some((EffectResult::NoEffect, raps)),
                )
            } else {
                record.finish(
                    OutcomeKind::AllResult,
                    true,
                    total_shifts,
                    Some((
                        EffectResult::All {
                            effect_value,
                            bonus,
                        },
                        raps,
                    )),
                )
            });
        }

        let raps = self
            .tables
            .result_aps(adjusted.ev, shifted_rv_index, bounds)?;
        Ok(if raps == 0 {
            record.finish(
                OutcomeKind::NoEffect,
                false,
                total_shifts,
                Some((EffectResult::NoEffect, raps)),
            )
        } else {
            record.finish(
                OutcomeKind::Success,
                true,
                total_shifts,
                Some((EffectResult::Raps(raps), raps)),
            )
        })
    }
}

/// Reject formulas that can't produce a die pair.
fn check_formula(formula: &str) -> MechResult<()> {
    let parsed = DiceFormula::parse(formula)?;
    if parsed.dice_count() != 2 {
        return Err(MechError::InvalidFormula(format!(
            "'{formula}' rolls {} dice, expected 2",
            parsed.dice_count()
        )));
    }
    Ok(())
}

/// AV/OV/EV/RV after Hero Points.
#[derive(Debug, Clone, Copy)]
struct Adjusted {
    av: i32,
    ov: i32,
    ev: i32,
    rv: i32,
}

/// The parts of a result known once the dice have landed.
struct Record<'r> {
    roll: &'r RollValues,
    adjusted: Adjusted,
    difficulty: i32,
    sequence: &'r DiceSequence,
    roll_total: i32,
}

impl Record<'_> {
    fn finish(
        &self,
        outcome: OutcomeKind,
        success: bool,
        column_shifts: i32,
        effect: Option<(EffectResult, i32)>,
    ) -> ResultData {
        ResultData {
            label: self.roll.label.clone(),
            kind: self.roll.kind,
            value_or_aps: self.roll.value_or_aps,
            outcome,
            success,
            action_value: self.adjusted.av,
            opposing_value: self.adjusted.ov,
            effect_value: self.adjusted.ev,
            resistance_value: self.adjusted.rv,
            difficulty: self.difficulty,
            column_shifts,
            effect: effect.map(|(e, _)| e),
            result_aps: effect.map(|(_, raps)| raps),
            dice: self.sequence.dice.clone(),
            roll_total: self.roll_total,
            rerolls: self.sequence.rerolls,
        }
    }
}
