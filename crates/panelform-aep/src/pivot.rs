//! Pivot engine: tidy rows to one wide row per dimension key.
//!
//! Duplicate (key, year) observations resolve by an explicit reduce: the
//! first non-missing value in ingestion order wins and later ones are
//! silently discarded. Since ingestion order is fixed by ascending filename
//! order, the reduce is reproducible run to run.

use rustc_hash::FxHashMap;

use crate::schema::{self, YEAR_COUNT};
use crate::tidy::TidyRow;

/// The tuple identifying one logical time series.
///
/// Field order doubles as the lexicographic tie-break order used by the
/// writer, so keep it aligned with the output column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimensionKey {
    pub country: Option<String>,
    pub country_serial: Option<u32>,
    pub metric: Option<String>,
    pub unit: Option<String>,
    pub sector: Option<String>,
    pub sub_sector: Option<String>,
    pub sub_sub_sector: Option<String>,
    pub source_link: String,
    pub source: Option<String>,
}

impl DimensionKey {
    fn from_row(row: &TidyRow) -> Self {
        Self {
            country: row.country.clone(),
            country_serial: row.country_serial,
            metric: row.metric.clone(),
            unit: row.unit.clone(),
            sector: row.sector.clone(),
            sub_sector: row.sub_sector.clone(),
            sub_sub_sector: row.sub_sub_sector.clone(),
            source_link: row.source_link.clone(),
            source: row.source.clone(),
        }
    }
}

/// One output row: dimension key plus a dense year axis of optional cells
#[derive(Debug, Clone)]
pub struct WideRow {
    pub key: DimensionKey,
    pub cells: [Option<f64>; YEAR_COUNT],
}

impl WideRow {
    fn new(key: DimensionKey) -> Self {
        Self {
            key,
            cells: [None; YEAR_COUNT],
        }
    }
}

/// Group tidy rows by dimension key and spread year/value pairs into cells.
///
/// Every distinct key produces a row, even when none of its observations
/// carries a usable (year, value) pair; all 23 cells are materialized,
/// missing where no observation landed. Returned row order is the key's
/// first appearance in ingestion order; the writer re-sorts anyway.
pub fn pivot(rows: &[TidyRow]) -> Vec<WideRow> {
    let mut index: FxHashMap<DimensionKey, usize> = FxHashMap::default();
    let mut wide: Vec<WideRow> = Vec::new();

    for row in rows {
        let key = DimensionKey::from_row(row);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            wide.push(WideRow::new(key));
            wide.len() - 1
        });

        let (Some(year), Some(value)) = (row.year, row.value) else {
            continue;
        };
        let Some(idx) = schema::year_index(year) else {
            continue;
        };
        // First non-missing value wins; later duplicates are dropped
        let cell = &mut wide[slot].cells[idx];
        if cell.is_none() {
            *cell = Some(value);
        }
    }

    wide
}
