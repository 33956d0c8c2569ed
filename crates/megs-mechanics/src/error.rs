//! Error types for the resolution kernel.

/// Errors that can occur while loading data or resolving an action.
///
/// Game outcomes (failure, no effect, double 1s) are never errors; they come
/// back as ordinary [`ResultData`](crate::ResultData) values.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A table lookup used an index outside the table (strict bounds policy only).
    #[error("{table} table index out of bounds: row {row}, column {column}")]
    TableBoundsExceeded {
        /// Which table was being read ("action" or "result").
        table: &'static str,
        /// The requested row.
        row: i32,
        /// The requested column.
        column: i32,
    },

    /// Table data is malformed (wrong shape, gaps between bands, ...).
    #[error("invalid tables: {0}")]
    InvalidTables(String),

    /// A combat maneuver key was not found in the maneuver table.
    #[error("unknown combat maneuver: {0}")]
    UnknownManeuver(String),

    /// A dice formula could not be parsed.
    #[error("invalid dice formula: {0}")]
    InvalidFormula(String),

    /// Reading a data file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file is not valid JSON for the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
