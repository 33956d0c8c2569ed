//! Column shifts earned by rolling well above the Success Number.
//!
//! After a successful roll, every consecutive Action Table column to the
//! right of the OV column whose value the roll still beats is one column
//! shift. Cells below [`COLUMN_SHIFT_THRESHOLD`] never count but don't end
//! the scan either; the first eligible cell the roll fails to beat does.

/// Cells below this value never earn a column shift.
pub const COLUMN_SHIFT_THRESHOLD: i32 = 11;

/// Count the column shifts `roll_total` earns on row `av_index` starting at `ov_index`.
///
/// Indices outside the table are clamped into it and logged.
pub fn count_shifts(
    roll_total: i32,
    av_index: i32,
    ov_index: i32,
    action_table: &[Vec<i32>],
) -> u32 {
    let Some(last_row) = action_table.len().checked_sub(1) else {
        return 0;
    };
    let row_idx = clamp_index(av_index, last_row, "row");
    let row = &action_table[row_idx];
    let Some(last_column) = row.len().checked_sub(1) else {
        return 0;
    };
    let ov_idx = clamp_index(ov_index, last_column, "column");

    let success_number = row[ov_idx];
    if roll_total <= success_number || roll_total < COLUMN_SHIFT_THRESHOLD {
        return 0;
    }

    let mut shifts = 0;
    for &value in &row[ov_idx + 1..] {
        if value < COLUMN_SHIFT_THRESHOLD {
            continue;
        }
        if roll_total > value {
            shifts += 1;
        } else {
            break;
        }
    }
    shifts
}

fn clamp_index(index: i32, last: usize, axis: &'static str) -> usize {
    if index < 0 || index as usize > last {
        tracing::warn!(axis, index, last, "column shift index out of bounds, clamping");
    }
    index.clamp(0, last as i32) as usize
}
