//! Writer: order rows and columns, serialize the wide table to CSV.
//!
//! Missing cells render as empty fields, never as a placeholder number.

use std::path::Path;

use anyhow::{Context, Result};

use crate::pivot::{DimensionKey, WideRow};
use crate::schema;

/// Sort key: serial ascending with missing serials last (rows whose country
/// was missing), then the remaining dimension fields for a total order so
/// repeated runs serialize byte-identically.
fn ordering(a: &DimensionKey, b: &DimensionKey) -> std::cmp::Ordering {
    let rank = |k: &DimensionKey| (k.country_serial.is_none(), k.country_serial);
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

fn format_cell(cell: Option<f64>) -> String {
    match cell {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

fn record(row: &WideRow) -> Vec<String> {
    let k = &row.key;
    let dim = [
        k.country.clone(),
        k.country_serial.map(|s| s.to_string()),
        k.metric.clone(),
        k.unit.clone(),
        k.sector.clone(),
        k.sub_sector.clone(),
        k.sub_sub_sector.clone(),
        Some(k.source_link.clone()),
        k.source.clone(),
    ];
    dim.into_iter()
        .map(Option::unwrap_or_default)
        .chain(row.cells.iter().map(|c| format_cell(*c)))
        .collect()
}

/// Sort the table and write it to `path` with the fixed header.
///
/// An empty table still produces a header-only file.
pub fn write_csv(rows: &mut [WideRow], path: &Path) -> Result<()> {
    rows.sort_by(|a, b| ordering(&a.key, &b.key));

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    wtr.write_record(schema::header())
        .context("failed to write header")?;
    for row in rows.iter() {
        wtr.write_record(record(row))
            .with_context(|| format!("failed to write row for {:?}", row.key.country))?;
    }
    wtr.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(serial: Option<u32>, country: Option<&str>, metric: &str) -> DimensionKey {
        DimensionKey {
            country: country.map(str::to_string),
            country_serial: serial,
            metric: Some(metric.to_string()),
            unit: None,
            sector: None,
            sub_sector: None,
            sub_sub_sector: None,
            source_link: "link".to_string(),
            source: None,
        }
    }

    fn wide(serial: Option<u32>, country: Option<&str>, metric: &str) -> WideRow {
        WideRow {
            key: key(serial, country, metric),
            cells: [None; schema::YEAR_COUNT],
        }
    }

    #[test]
    fn rows_sort_by_serial_then_metric() {
        let mut rows = vec![
            wide(Some(2), Some("Ghana"), "b"),
            wide(Some(1), Some("Algeria"), "z"),
            wide(Some(2), Some("Ghana"), "a"),
            wide(Some(1), Some("Algeria"), "a"),
        ];
        rows.sort_by(|a, b| ordering(&a.key, &b.key));
        let order: Vec<_> = rows
            .iter()
            .map(|r| (r.key.country_serial.unwrap(), r.key.metric.clone().unwrap()))
            .collect();
        assert_eq!(
            order,
            [
                (1, "a".to_string()),
                (1, "z".to_string()),
                (2, "a".to_string()),
                (2, "b".to_string())
            ]
        );
    }

    #[test]
    fn missing_serial_sorts_last() {
        let mut rows = vec![wide(None, None, "a"), wide(Some(3), Some("Kenya"), "a")];
        rows.sort_by(|a, b| ordering(&a.key, &b.key));
        assert_eq!(rows[0].key.country_serial, Some(3));
        assert_eq!(rows[1].key.country_serial, None);
    }

    #[test]
    fn missing_cells_render_empty() {
        let mut row = wide(Some(1), Some("Kenya"), "m");
        row.cells[0] = Some(0.0);
        row.cells[22] = Some(12.5);
        let rec = record(&row);
        assert_eq!(rec.len(), 9 + 23);
        assert_eq!(rec[9], "0");
        assert_eq!(rec[10], "");
        assert_eq!(rec[31], "12.5");
    }

    #[test]
    fn empty_table_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&mut [], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("country,country_serial,metric"));
        assert!(lines[0].ends_with("2021,2022"));
    }
}
