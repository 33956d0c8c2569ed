//! Configuration for an action resolver.

use serde::{Deserialize, Serialize};

/// The dice formula used when a roll does not carry its own.
pub const DEFAULT_FORMULA: &str = "1d10 + 1d10";

/// What a table lookup does when an index falls outside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundsPolicy {
    /// Log the condition and clamp the index into the table.
    #[default]
    Permissive,
    /// Fail the lookup with [`MechError::TableBoundsExceeded`](crate::MechError).
    Strict,
}

/// Whether Hero Points spent on EV count towards an ALL result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AllResultPolicy {
    /// ALL results use the EV after Hero Point purchases.
    #[default]
    IncludeHeroPoints,
    /// ALL results use the EV as rolled, ignoring purchased AP.
    ExcludeHeroPoints,
}

/// Configuration for a [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Dice formula for rolls that don't specify one.
    pub formula: String,
    /// Out-of-bounds table index handling.
    pub bounds: BoundsPolicy,
    /// Hero Point handling for ALL results.
    pub all_result: AllResultPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            formula: DEFAULT_FORMULA.to_string(),
            bounds: BoundsPolicy::default(),
            all_result: AllResultPolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Set the default dice formula.
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    /// Set the bounds policy.
    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the ALL-result Hero Point policy.
    pub fn with_all_result(mut self, all_result: AllResultPolicy) -> Self {
        self.all_result = all_result;
        self
    }
}
