//! Gap-fill engine: early-period zero-fill, then linear interpolation with
//! edge extension, producing a dense year axis per row.
//!
//! Applied independently per wide row; rows never observe each other, so the
//! table-level pass runs in parallel without affecting results.

use rayon::prelude::*;

use crate::pivot::WideRow;
use crate::schema::{EARLY_YEAR_COUNT, YEAR_COUNT};

/// Fill one row's year axis in place.
///
/// Stage 1: if every cell in the early block (2000-2011) is missing, the
/// whole block becomes exactly 0.0. A single present early value leaves the
/// block to stage 2 instead.
///
/// Stage 2: interior gaps are linearly interpolated between the nearest
/// known neighbours (year distance as the interpolation variable); leading
/// cells take the first known value, trailing cells the last. A row with no
/// known cells at all stays entirely missing.
pub fn fill_row(cells: &mut [Option<f64>; YEAR_COUNT]) {
    if cells.iter().all(Option::is_none) {
        // No data anywhere: the degenerate all-missing row persists.
        // Zero-filling here would fabricate a signal out of nothing.
        return;
    }

    if cells[..EARLY_YEAR_COUNT].iter().all(Option::is_none) {
        for cell in &mut cells[..EARLY_YEAR_COUNT] {
            *cell = Some(0.0);
        }
    }

    let known: Vec<usize> = (0..YEAR_COUNT).filter(|&i| cells[i].is_some()).collect();
    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        return;
    };

    // Interior gaps between consecutive known cells
    for pair in known.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo < 2 {
            continue;
        }
        let (Some(a), Some(b)) = (cells[lo], cells[hi]) else {
            continue;
        };
        let span = (hi - lo) as f64;
        for i in lo + 1..hi {
            let t = (i - lo) as f64 / span;
            cells[i] = Some(a + (b - a) * t);
        }
    }

    // Edge extension
    let first_value = cells[first];
    for cell in &mut cells[..first] {
        *cell = first_value;
    }
    let last_value = cells[last];
    for cell in &mut cells[last + 1..] {
        *cell = last_value;
    }
}

/// Gap-fill every row of the wide table
pub fn fill_table(rows: &mut [WideRow]) {
    rows.par_iter_mut().for_each(|row| fill_row(&mut row.cells));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse(pairs: &[(usize, f64)]) -> [Option<f64>; YEAR_COUNT] {
        let mut cells = [None; YEAR_COUNT];
        for &(i, v) in pairs {
            cells[i] = Some(v);
        }
        cells
    }

    #[test]
    fn fully_empty_early_block_becomes_zero() {
        // 2015 = 100 only; indices are year - 2000
        let mut cells = sparse(&[(15, 100.0)]);
        fill_row(&mut cells);
        for i in 0..EARLY_YEAR_COUNT {
            assert_eq!(cells[i], Some(0.0), "year {}", 2000 + i);
        }
    }

    #[test]
    fn partial_early_block_is_exempt_from_zero_fill() {
        let mut cells = sparse(&[(5, 50.0), (15, 100.0)]);
        fill_row(&mut cells);
        // 2000-2004 extend backward from 2005, not zero
        for i in 0..5 {
            assert_eq!(cells[i], Some(50.0));
        }
        // 2005..2015 interpolates
        assert_eq!(cells[10], Some(75.0));
    }

    #[test]
    fn reference_scenario_2015_and_2020() {
        let mut cells = sparse(&[(15, 100.0), (20, 200.0)]);
        fill_row(&mut cells);

        let expect: Vec<(usize, f64)> = vec![
            (11, 0.0),
            (12, 25.0),
            (13, 50.0),
            (14, 75.0),
            (15, 100.0),
            (16, 120.0),
            (17, 140.0),
            (18, 160.0),
            (19, 180.0),
            (20, 200.0),
            (21, 200.0),
            (22, 200.0),
        ];
        for (i, v) in expect {
            assert_eq!(cells[i], Some(v), "year {}", 2000 + i);
        }
        assert!(cells.iter().all(Option::is_some));
    }

    #[test]
    fn all_missing_row_stays_missing() {
        let mut cells = [None; YEAR_COUNT];
        fill_row(&mut cells);
        // Early-zero would seed the row with fabricated data; it must not
        // fire when the row carries literally no signal
        assert!(cells.iter().all(Option::is_none));
    }

    #[test]
    fn single_value_extends_both_ways() {
        let mut cells = sparse(&[(8, 42.0)]);
        fill_row(&mut cells);
        assert!(cells.iter().all(|c| *c == Some(42.0)));
    }

    #[test]
    fn adjacent_known_cells_need_no_interpolation() {
        let mut cells = sparse(&[(0, 1.0), (1, 2.0)]);
        fill_row(&mut cells);
        assert_eq!(cells[0], Some(1.0));
        assert_eq!(cells[1], Some(2.0));
        assert_eq!(cells[22], Some(2.0));
    }

    #[test]
    fn dense_after_fill_when_any_value_present() {
        let mut cells = sparse(&[(13, 7.0)]);
        fill_row(&mut cells);
        assert!(cells.iter().all(Option::is_some));
    }
}
