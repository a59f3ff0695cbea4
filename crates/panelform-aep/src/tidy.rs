//! Normalizer: observations to canonical tidy rows.
//!
//! Pure per-record transform. Field renames, numeric coercion (parse failure
//! means missing, never an error), the trailing-parenthetical strip for
//! `sub_sub_sector`, and the dataset-level unit fallback policy.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::ingest::Observation;
use crate::serial::SerialMap;

/// One trailing `(...)` group plus surrounding whitespace
static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("invalid regex"));

/// Captures the content of a final `(...)` group, e.g. the unit in
/// "Access to electricity (% of population)"
static METRIC_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)\s*$").expect("invalid regex"));

/// One observation in canonical dimension form, still one row per year
#[derive(Debug, Clone, PartialEq)]
pub struct TidyRow {
    pub country: Option<String>,
    pub country_serial: Option<u32>,
    pub metric: Option<String>,
    pub unit: Option<String>,
    pub sector: Option<String>,
    pub sub_sector: Option<String>,
    pub sub_sub_sector: Option<String>,
    pub source_link: String,
    pub source: Option<String>,
    pub year: Option<i32>,
    pub value: Option<f64>,
}

/// Where the `unit` column comes from, decided once per run.
///
/// The portal sometimes omits the per-item unit field entirely; when it is
/// missing across the whole dataset, the unit is recovered from the trailing
/// parenthetical of the metric label instead. This is an explicit dataset-level
/// policy, never a per-row dynamic branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitPolicy {
    /// Use each item's own unit field
    Column,
    /// Derive from the metric label's trailing `(...)` group
    MetricLabel,
}

impl UnitPolicy {
    /// Select the policy from one scan over the ingested observations.
    ///
    /// `MetricLabel` only when no observation carries a unit at all.
    pub fn detect(observations: &[Observation]) -> Self {
        if observations.iter().all(|o| o.unit.is_none()) {
            UnitPolicy::MetricLabel
        } else {
            UnitPolicy::Column
        }
    }
}

/// Coerce a raw JSON year to an integer; anything non-numeric is missing
pub fn coerce_year(raw: &Value) -> Option<i32> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i32))
        }
        _ => None,
    }
}

/// Coerce a raw JSON score to a float; anything non-numeric is missing
pub fn coerce_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Strip one trailing parenthetical unit annotation, e.g.
/// "Electricity production (GWh)" -> "Electricity production"
pub fn strip_trailing_parenthetical(s: &str) -> String {
    TRAILING_PAREN.replace(s, "").trim().to_string()
}

/// Extract the unit embedded in a metric label's final `(...)` group
pub fn unit_from_metric(metric: &str) -> Option<String> {
    METRIC_UNIT
        .captures(metric)
        .map(|caps| caps[1].to_string())
}

/// Normalize every observation into a tidy row. No record is dropped.
pub fn normalize(
    observations: Vec<Observation>,
    serials: &SerialMap,
    unit_policy: UnitPolicy,
    source_link: &str,
) -> Vec<TidyRow> {
    observations
        .into_iter()
        .map(|o| normalize_one(o, serials, unit_policy, source_link))
        .collect()
}

fn normalize_one(
    o: Observation,
    serials: &SerialMap,
    unit_policy: UnitPolicy,
    source_link: &str,
) -> TidyRow {
    let unit = match unit_policy {
        UnitPolicy::Column => o.unit,
        UnitPolicy::MetricLabel => o.metric.as_deref().and_then(unit_from_metric),
    };
    TidyRow {
        country_serial: o.country_name.as_deref().and_then(|c| serials.get(c)),
        country: o.country_name,
        unit,
        sector: o.indicator_group,
        sub_sector: o.indicator_topic,
        sub_sub_sector: o
            .indicator_name
            .as_deref()
            .map(strip_trailing_parenthetical),
        source_link: source_link.to_string(),
        source: o.indicator_source,
        year: coerce_year(&o.year),
        value: coerce_value(&o.value),
        metric: o.metric,
    }
}
