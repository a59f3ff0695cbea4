//! Ingestion: flatten scraped indicator JSON exports into observations.
//!
//! Each input file holds either a single indicator block or an array of
//! blocks; a block carries the metric label (`_id`) and a `data` array of
//! per-country-year items. Files are read in ascending filename order, which
//! fixes the duplicate-key tie-break downstream.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use panelform_core::ProgressContext;

/// One per-country-year data item as scraped from the portal.
///
/// `year` and `score` stay as raw JSON values here; the portal emits them
/// inconsistently as numbers or strings, and coercion happens in the
/// normalizer (parse failure means missing, never an error).
#[derive(Debug, Deserialize)]
pub struct DataItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Value,
    #[serde(default)]
    pub score: Value,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub indicator_topic: Option<String>,
    #[serde(default)]
    pub indicator_group: Option<String>,
    #[serde(default)]
    pub indicator_name: Option<String>,
    #[serde(default)]
    pub indicator_source: Option<String>,
}

/// One indicator block: metric label plus its data items
#[derive(Debug, Deserialize)]
pub struct IndicatorBlock {
    #[serde(rename = "_id", default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub data: Vec<DataItem>,
}

/// Top-level JSON shape of an export file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Export {
    Single(IndicatorBlock),
    Many(Vec<IndicatorBlock>),
}

impl Export {
    fn into_blocks(self) -> Vec<IndicatorBlock> {
        match self {
            Export::Single(block) => vec![block],
            Export::Many(blocks) => blocks,
        }
    }
}

/// Flat observation record, one per data item, tagged with its source file
#[derive(Debug)]
pub struct Observation {
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub year: Value,
    pub value: Value,
    pub unit: Option<String>,
    pub region_name: Option<String>,
    pub indicator_topic: Option<String>,
    pub indicator_group: Option<String>,
    pub indicator_name: Option<String>,
    pub indicator_source: Option<String>,
    pub metric: Option<String>,
    pub source_file: String,
}

/// Everything read from one input directory
#[derive(Debug)]
pub struct Ingested {
    pub observations: Vec<Observation>,
    pub files_read: usize,
}

/// Read every `*.json` file under `dir` and flatten it to observations.
///
/// Files are visited in ascending filename order. A missing or empty
/// directory yields zero observations; malformed JSON in any file aborts
/// the whole ingestion.
pub fn load_dir(dir: &Path, progress: &ProgressContext) -> Result<Ingested> {
    let pattern = dir.join("*.json");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("non-UTF-8 input path: {}", dir.display()))?;

    // glob yields alphabetically sorted paths per directory
    let paths: Vec<_> = glob::glob(pattern)
        .context("invalid glob pattern")?
        .collect::<Result<_, _>>()
        .context("failed to list input directory")?;

    let pb = progress.file_bar("ingest", paths.len() as u64);
    let mut observations = Vec::new();
    let files_read = paths.len();

    for path in paths {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(filename.clone());

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let export: Export = serde_json::from_str(&text)
            .with_context(|| format!("malformed JSON in {}", path.display()))?;

        let before = observations.len();
        for block in export.into_blocks() {
            flatten_block(block, &filename, &mut observations);
        }
        log::debug!("{}: {} observations", filename, observations.len() - before);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(Ingested {
        observations,
        files_read,
    })
}

/// Flatten one block's data items, preserving item order
fn flatten_block(block: IndicatorBlock, source_file: &str, out: &mut Vec<Observation>) {
    let IndicatorBlock { metric, data } = block;
    for item in data {
        out.push(Observation {
            country_code: item.id,
            country_name: item.name,
            year: item.year,
            value: item.score,
            unit: item.unit,
            region_name: item.region_name,
            indicator_topic: item.indicator_topic,
            indicator_group: item.indicator_group,
            indicator_name: item.indicator_name,
            indicator_source: item.indicator_source,
            metric: metric.clone(),
            source_file: source_file.to_string(),
        });
    }
}
