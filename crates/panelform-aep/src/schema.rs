//! Output table layout: dimension columns plus the fixed year axis.
//!
//! Every wide row carries one cell per calendar year in [2000, 2022],
//! regardless of which years appear in the inputs.

use std::sync::LazyLock;

/// First year of the output axis (inclusive)
pub const YEAR_MIN: i32 = 2000;
/// Last year of the output axis (inclusive)
pub const YEAR_MAX: i32 = 2022;
/// Number of year columns
pub const YEAR_COUNT: usize = (YEAR_MAX - YEAR_MIN + 1) as usize;
/// Years [2000, 2011] form the early block subject to the zero-fill rule
pub const EARLY_YEAR_COUNT: usize = 12;

/// Descriptive columns identifying one logical time series, in output order
pub const DIMENSION_COLUMNS: [&str; 9] = [
    "country",
    "country_serial",
    "metric",
    "unit",
    "sector",
    "sub_sector",
    "sub_sub_sector",
    "source_link",
    "source",
];

/// Full CSV header: dimension columns then "2000".."2022"
pub static HEADER: LazyLock<Vec<String>> = LazyLock::new(|| {
    DIMENSION_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain((YEAR_MIN..=YEAR_MAX).map(|y| y.to_string()))
        .collect()
});

/// Index of `year` on the axis, or `None` when outside [2000, 2022]
pub fn year_index(year: i32) -> Option<usize> {
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        Some((year - YEAR_MIN) as usize)
    } else {
        None
    }
}

pub fn header() -> &'static [String] {
    HEADER.as_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_has_23_years() {
        assert_eq!(YEAR_COUNT, 23);
    }

    #[test]
    fn header_shape() {
        let header = header();
        assert_eq!(header.len(), 9 + 23);
        assert_eq!(header[0], "country");
        assert_eq!(header[8], "source");
        assert_eq!(header[9], "2000");
        assert_eq!(header[31], "2022");
    }

    #[test]
    fn year_index_bounds() {
        assert_eq!(year_index(2000), Some(0));
        assert_eq!(year_index(2011), Some(EARLY_YEAR_COUNT - 1));
        assert_eq!(year_index(2022), Some(22));
        assert_eq!(year_index(1999), None);
        assert_eq!(year_index(2023), None);
    }
}
