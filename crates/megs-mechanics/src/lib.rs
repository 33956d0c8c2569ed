//! Action resolution kernel for the Mayfair Exponential Game System (MEGS).
//!
//! Turns an action's AV/OV/EV/RV, Hero Point spending, combat maneuvers and
//! a 2d10 roll (with rerolls on doubles) into a Success Number check,
//! column shifts and Result APs. Tables, maneuvers, dice and reroll
//! decisions are all injected, so the kernel itself is deterministic.

pub mod config;
pub mod dice;
pub mod error;
pub mod maneuver;
pub mod reroll;
pub mod resolution;
pub mod shift;
pub mod tables;

pub use config::{AllResultPolicy, BoundsPolicy, ResolverConfig};
pub use dice::{DiceFormula, DiceRoller, DiePair, RerollConfirmer, RolledDice};
pub use error::{MechError, MechResult};
pub use maneuver::{ManeuverShifts, ManeuverTable};
pub use reroll::{DiceSequence, RerollCoordinator};
pub use resolution::{
    EffectResult, HeroPointSpend, OutcomeKind, ResolveRequest, Resolver, ResultData, RollKind,
    RollValues,
};
pub use shift::count_shifts;
pub use tables::{ResolutionTables, TableData, TableIssue, validate_tables};
