//! Action Table and Result Table lookups with extrapolation past AP 60.

use crate::config::BoundsPolicy;
use crate::error::{MechError, MechResult};

use super::{ResolutionTables, TABLE_CEILING};

/// Extra value for an AP above the tabulated ceiling: +5 per started block of 5.
///
/// 61-65 adds 5, 66-70 adds 10, and so on. Values at or below 60 add nothing.
pub fn extrapolation(raw: i32) -> i32 {
    if raw > TABLE_CEILING {
        5 * ((raw - (TABLE_CEILING + 1)) / 5 + 1)
    } else {
        0
    }
}

impl ResolutionTables {
    /// Success Number for an action.
    ///
    /// `ov_column_shifts` moves the OV column left (positive) or right
    /// (negative) before the lookup. AV and OV above 60 each add their own
    /// extrapolation on top of the tabulated value.
    pub fn action_difficulty(
        &self,
        av_raw: i32,
        ov_raw: i32,
        ov_column_shifts: i32,
        bounds: BoundsPolicy,
    ) -> MechResult<i32> {
        let av_index = self.index_for(av_raw) as i32;
        let ov_index = (self.index_for(ov_raw) as i32).saturating_sub(ov_column_shifts);
        let base = read_cell(self.action_table(), "action", av_index, ov_index, bounds)?;
        Ok(base
            .saturating_add(extrapolation(av_raw))
            .saturating_add(extrapolation(ov_raw)))
    }

    /// RAPs for an effect against a (column-shifted) resistance index.
    ///
    /// Indices past the last column are clamped to it. Non-positive indices
    /// are the ALL / No Effect case and belong to the resolver.
    pub fn result_aps(
        &self,
        ev_raw: i32,
        shifted_rv_index: i32,
        bounds: BoundsPolicy,
    ) -> MechResult<i32> {
        let last_column = self.result_table().first().map_or(0, |row| row.len()) as i32 - 1;
        let column = if shifted_rv_index > last_column {
            tracing::debug!(shifted_rv_index, last_column, "clamping result column");
            last_column
        } else {
            shifted_rv_index
        };
        let ev_index = self.index_for(ev_raw) as i32;
        let base = read_cell(self.result_table(), "result", ev_index, column, bounds)?;
        Ok(base.saturating_add(extrapolation(ev_raw)))
    }
}

/// Read `grid[row][column]`, logging indices outside the grid.
///
/// Permissive lookups clamp into the grid; strict lookups fail.
pub(crate) fn read_cell(
    grid: &[Vec<i32>],
    table: &'static str,
    row: i32,
    column: i32,
    bounds: BoundsPolicy,
) -> MechResult<i32> {
    let rows = grid.len() as i32;
    let columns = grid.first().map_or(0, |r| r.len()) as i32;
    let in_bounds = (0..rows).contains(&row) && (0..columns).contains(&column);

    if !in_bounds {
        tracing::warn!(table, row, column, "table index out of bounds");
        if bounds == BoundsPolicy::Strict || rows == 0 || columns == 0 {
            return Err(MechError::TableBoundsExceeded { table, row, column });
        }
    }

    let r = row.clamp(0, rows - 1) as usize;
    let c = column.clamp(0, columns - 1) as usize;
    Ok(grid[r][c])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LOOSE: BoundsPolicy = BoundsPolicy::Permissive;

    fn tables() -> ResolutionTables {
        ResolutionTables::bundled().unwrap()
    }

    #[test]
    fn extrapolation_steps() {
        assert_eq!(extrapolation(0), 0);
        assert_eq!(extrapolation(60), 0);
        assert_eq!(extrapolation(61), 5);
        assert_eq!(extrapolation(65), 5);
        assert_eq!(extrapolation(66), 10);
        assert_eq!(extrapolation(75), 15);
        assert_eq!(extrapolation(80), 20);
        assert_eq!(extrapolation(100), 40);
    }

    #[test]
    fn difficulty_reads_action_table() {
        let t = tables();
        // AV 14 is band 7, OV 0 is band 0
        assert_eq!(t.action_difficulty(14, 0, 0, LOOSE).unwrap(), 3);
        // equal bands sit on the diagonal
        assert_eq!(t.action_difficulty(5, 6, 0, LOOSE).unwrap(), 6);
        assert_eq!(t.action_difficulty(0, 60, 0, LOOSE).unwrap(), 80);
    }

    #[test]
    fn ov_shift_moves_column() {
        let t = tables();
        let plain = t.action_difficulty(5, 5, 0, LOOSE).unwrap();
        let harder = t.action_difficulty(5, 5, -2, LOOSE).unwrap();
        let easier = t.action_difficulty(5, 5, 2, LOOSE).unwrap();
        assert_eq!(plain, 6);
        assert_eq!(harder, 13);
        assert_eq!(easier, 4);
    }

    #[test]
    fn extrapolation_law_for_ov() {
        let t = tables();
        for av in [0, 7, 30, 60] {
            let base = t.action_difficulty(av, 60, 0, LOOSE).unwrap();
            for (ov, bonus) in [(61, 5), (65, 5), (66, 10), (70, 10), (73, 15), (80, 20)] {
                assert_eq!(t.action_difficulty(av, ov, 0, LOOSE).unwrap(), base + bonus);
            }
        }
    }

    #[test]
    fn extrapolation_is_additive() {
        let t = tables();
        let base = t.action_difficulty(60, 60, 0, LOOSE).unwrap();
        assert_eq!(t.action_difficulty(63, 72, 0, LOOSE).unwrap(), base + 5 + 15);
    }

    #[test]
    fn result_aps_scenario() {
        let t = tables();
        assert_eq!(t.result_table()[18][10], 12);
        assert_eq!(t.result_aps(100, 10, LOOSE).unwrap(), 52);
    }

    #[test]
    fn result_aps_clamps_wide_columns() {
        let t = tables();
        let last = t.result_aps(30, 19, LOOSE).unwrap();
        assert_eq!(t.result_aps(30, 25, LOOSE).unwrap(), last);
    }

    #[test]
    fn permissive_bounds_clamp() {
        let t = tables();
        // OV band 0 shifted two columns left
        assert_eq!(
            t.action_difficulty(30, 0, 2, LOOSE).unwrap(),
            t.action_difficulty(30, 0, 0, LOOSE).unwrap()
        );
        assert_eq!(t.result_aps(10, -3, LOOSE).unwrap(), t.result_table()[5][0]);
    }

    #[test]
    fn strict_bounds_fail() {
        let t = tables();
        let err = t
            .action_difficulty(30, 0, 2, BoundsPolicy::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            MechError::TableBoundsExceeded {
                table: "action",
                row: 12,
                column: -2
            }
        ));
        assert!(t.result_aps(10, -1, BoundsPolicy::Strict).is_err());
        // in-bounds lookups are unaffected by the policy
        assert_eq!(
            t.action_difficulty(30, 30, 0, BoundsPolicy::Strict).unwrap(),
            6
        );
    }

    #[test]
    fn extreme_values_saturate() {
        let t = tables();
        assert_eq!(
            t.action_difficulty(i32::MAX, i32::MAX, 0, LOOSE).unwrap(),
            i32::MAX
        );
        // a huge negative shift pins OV to the last column
        assert_eq!(
            t.action_difficulty(0, 0, i32::MIN, LOOSE).unwrap(),
            t.action_difficulty(0, 60, 0, LOOSE).unwrap()
        );
        assert!(t.result_aps(i32::MAX, 10, LOOSE).unwrap() > 0);
        assert_eq!(extrapolation(i32::MAX), 2_147_483_590);
    }

    #[test]
    fn empty_grid_is_an_error_even_when_permissive() {
        assert!(read_cell(&[], "action", 0, 0, LOOSE).is_err());
    }

    proptest! {
        #[test]
        fn range_index_is_total(v in 0i32..10_000) {
            let t = tables();
            let idx = t.index_for(v);
            prop_assert!(idx < 19);
            if v <= 60 {
                prop_assert!(t.ranges().bands()[idx].contains(v));
            } else {
                prop_assert_eq!(idx, 18);
            }
        }

        #[test]
        fn lookups_are_pure(av in 0i32..120, ov in 0i32..120, shift in -3i32..3, ev in 0i32..120, col in 1i32..25) {
            let t = tables();
            let a = t.action_difficulty(av, ov, shift, LOOSE).unwrap();
            let _ = t.result_aps(ev, col, LOOSE).unwrap();
            prop_assert_eq!(t.action_difficulty(av, ov, shift, LOOSE).unwrap(), a);
            let r = t.result_aps(ev, col, LOOSE).unwrap();
            prop_assert_eq!(t.result_aps(ev, col, LOOSE).unwrap(), r);
        }

        #[test]
        fn ov_extrapolation_law(av in 0i32..=60, ov in 61i32..=80) {
            let t = tables();
            let base = t.action_difficulty(av, 60, 0, LOOSE).unwrap();
            let expected = base + 5 * ((ov - 61) / 5 + 1);
            prop_assert_eq!(t.action_difficulty(av, ov, 0, LOOSE).unwrap(), expected);
        }
    }
}
