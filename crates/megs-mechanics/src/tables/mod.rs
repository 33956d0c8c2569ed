//! Table data: range bands, the Action Table and the Result Table.
//!
//! Tables are external data. [`ResolutionTables::bundled`] parses the copy
//! compiled into the crate; [`ResolutionTables::from_path`] and
//! [`ResolutionTables::from_json_str`] load replacements. Every loader runs
//! [`validate_tables`] and rejects data the lookups can't index safely.

pub mod lookup;
pub mod range;

pub use lookup::extrapolation;
pub use range::{Band, RangeTable};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Number of range bands (and Action Table rows/columns).
pub const BAND_COUNT: usize = 19;

/// Number of Result Table columns (shifted RV index 0..=19).
pub const RESULT_COLUMNS: usize = 20;

/// Highest tabulated AP value; larger values are extrapolated.
pub const TABLE_CEILING: i32 = 60;

const BUNDLED_TABLES: &str = include_str!("../../data/tables.json");

/// Raw table data as it appears on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    /// Range bands, `[min, max]` pairs.
    pub ranges: RangeTable,
    /// Success Numbers, `action_table[av_index][ov_index]`.
    pub action_table: Vec<Vec<i32>>,
    /// RAPs, `result_table[ev_index][shifted_rv_index]`; 0 is No Effect.
    pub result_table: Vec<Vec<i32>>,
}

/// Validated tables used by every lookup. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionTables {
    ranges: RangeTable,
    action_table: Vec<Vec<i32>>,
    result_table: Vec<Vec<i32>>,
}

impl ResolutionTables {
    /// Validate raw table data.
    pub fn new(data: TableData) -> MechResult<Self> {
        let issues = validate_tables(&data);
        if let Some(first) = issues.first() {
            let more = if issues.len() > 1 {
                format!(" (and {} more)", issues.len() - 1)
            } else {
                String::new()
            };
            return Err(MechError::InvalidTables(format!("{first}{more}")));
        }
        Ok(Self {
            ranges: data.ranges,
            action_table: data.action_table,
            result_table: data.result_table,
        })
    }

    /// The tables shipped with the crate.
    pub fn bundled() -> MechResult<Self> {
        Self::from_json_str(BUNDLED_TABLES)
    }

    /// Parse and validate tables from a JSON string.
    pub fn from_json_str(json: &str) -> MechResult<Self> {
        let data: TableData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// Read, parse and validate a tables JSON file.
    pub fn from_path(path: &Path) -> MechResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The range bands.
    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    /// The Action Table rows.
    pub fn action_table(&self) -> &[Vec<i32>] {
        &self.action_table
    }

    /// The Result Table rows.
    pub fn result_table(&self) -> &[Vec<i32>] {
        &self.result_table
    }

    /// Range index for a raw AP value, always in `0..BAND_COUNT`.
    pub fn index_for(&self, value: i32) -> usize {
        self.ranges.index_for(value)
    }
}

/// A problem found in table data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIssue {
    /// Which part of the data is affected ("ranges", "actionTable", ...).
    pub section: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for TableIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.section, self.message)
    }
}

/// Check table data for every shape problem, not just the first.
pub fn validate_tables(data: &TableData) -> Vec<TableIssue> {
    let mut issues = Vec::new();
    validate_ranges(&data.ranges, &mut issues);
    validate_grid(
        "actionTable",
        &data.action_table,
        BAND_COUNT,
        BAND_COUNT,
        &mut issues,
    );
    validate_grid(
        "resultTable",
        &data.result_table,
        BAND_COUNT,
        RESULT_COLUMNS,
        &mut issues,
    );

    for (row_idx, row) in data.result_table.iter().enumerate() {
        if let Some(col_idx) = row.iter().position(|v| *v < 0) {
            issues.push(TableIssue {
                section: "resultTable",
                message: format!("negative RAP value at row {row_idx}, column {col_idx}"),
            });
        }
    }

    issues
}

fn validate_ranges(ranges: &RangeTable, issues: &mut Vec<TableIssue>) {
    let bands = ranges.bands();
    if bands.len() != BAND_COUNT {
        issues.push(TableIssue {
            section: "ranges",
            message: format!("expected {BAND_COUNT} bands, found {}", bands.len()),
        });
    }

    let mut expected_min = 0;
    for (idx, band) in bands.iter().enumerate() {
        if band.min() > band.max() {
            issues.push(TableIssue {
                section: "ranges",
                message: format!("band {idx} ({band}) has min > max"),
            });
        }
        if band.min() != expected_min {
            issues.push(TableIssue {
                section: "ranges",
                message: format!("band {idx} starts at {}, expected {expected_min}", band.min()),
            });
        }
        expected_min = band.max() + 1;
    }

    if let Some(last) = bands.last().filter(|b| b.max() != TABLE_CEILING) {
        issues.push(TableIssue {
            section: "ranges",
            message: format!("last band ends at {}, expected {TABLE_CEILING}", last.max()),
        });
    }
}

fn validate_grid(
    section: &'static str,
    grid: &[Vec<i32>],
    rows: usize,
    columns: usize,
    issues: &mut Vec<TableIssue>,
) {
    if grid.len() != rows {
        issues.push(TableIssue {
            section,
            message: format!("expected {rows} rows, found {}", grid.len()),
        });
    }
    for (idx, row) in grid.iter().enumerate() {
        if row.len() != columns {
            issues.push(TableIssue {
                section,
                message: format!("row {idx} has {} columns, expected {columns}", row.len()),
            });
        }
    }
}
