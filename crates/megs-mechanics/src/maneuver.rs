//! Combat maneuvers and the column shifts they apply.
//!
//! A maneuver trades accuracy for effect (or the reverse). Its OV shift is
//! added to the resolver's OV column shifts, so a negative value makes the
//! action harder; its RV shift is added to the result shifts, so a positive
//! value increases the effect.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

const BUNDLED_MANEUVERS: &str = include_str!("../data/maneuvers.json");

/// Column shifts contributed by one maneuver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManeuverShifts {
    /// Added to the OV column shifts.
    pub ov_shifts: i32,
    /// Added to the RV column shifts.
    pub rv_shifts: i32,
}

/// Maneuver keys mapped to their shifts. Keys match case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManeuverTable {
    /// Display key as loaded, plus shifts, indexed by lowercased key.
    entries: BTreeMap<String, (String, ManeuverShifts)>,
}

impl ManeuverTable {
    /// Build a table from `(key, shifts)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (String, ManeuverShifts)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, shifts)| (key.to_lowercase(), (key, shifts)))
                .collect(),
        }
    }

    /// The maneuvers shipped with the crate.
    pub fn bundled() -> MechResult<Self> {
        Self::from_json_str(BUNDLED_MANEUVERS)
    }

    /// Parse a JSON object of `key: { ovShifts, rvShifts }`.
    pub fn from_json_str(json: &str) -> MechResult<Self> {
        let raw: BTreeMap<String, ManeuverShifts> = serde_json::from_str(json)?;
        Ok(Self::new(raw))
    }

    /// Read and parse a maneuvers JSON file.
    pub fn from_path(path: &Path) -> MechResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Shifts for `key`, if known.
    pub fn get(&self, key: &str) -> Option<ManeuverShifts> {
        self.entries
            .get(&key.to_lowercase())
            .map(|(_, shifts)| *shifts)
    }

    /// Shifts for `key`, or [`MechError::UnknownManeuver`].
    pub fn lookup(&self, key: &str) -> MechResult<ManeuverShifts> {
        self.get(key)
            .ok_or_else(|| MechError::UnknownManeuver(key.to_string()))
    }

    /// All maneuvers, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ManeuverShifts)> {
        self.entries
            .values()
            .map(|(key, shifts)| (key.as_str(), *shifts))
    }

    /// Number of maneuvers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no maneuvers are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
