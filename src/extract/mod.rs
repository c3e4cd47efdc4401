// src/extract/mod.rs
//! Per-filing extraction: report date + the target item's value.
//!
//! Every failure here is scoped to one table. It is logged, counted and the
//! table is skipped; nothing propagates to the interpolation step.

use anyhow::Result;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RunConfig;
use crate::series::QuarterlyObservation;
use crate::table::RawTable;

pub mod columns;
pub mod date_parser;
pub mod report_date;

use columns::ResolvedColumns;
use report_date::discover_report_date;

/// Why a table contributed no observation.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("load error: {0:#}")]
    Load(anyhow::Error),

    #[error("could not determine report date")]
    NoReportDate,

    #[error("invalid report date value '{0}'")]
    InvalidReportDate(String),

    #[error("item {0} not present")]
    ItemNotFound(String),

    #[error("non-numeric value for {item_code}: '{raw}'")]
    NonNumericValue { item_code: String, raw: String },
}

impl SkipReason {
    /// Expected outcome rather than a data problem.
    pub fn is_expected(&self) -> bool {
        matches!(self, SkipReason::ItemNotFound(_))
    }

    /// Stable label for counting skips by cause.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::Load(_) => "load",
            SkipReason::NoReportDate => "no_report_date",
            SkipReason::InvalidReportDate(_) => "invalid_report_date",
            SkipReason::ItemNotFound(_) => "item_not_found",
            SkipReason::NonNumericValue { .. } => "non_numeric_value",
        }
    }
}

/// A table that produced nothing, and why.
#[derive(Debug)]
pub struct SkippedTable {
    pub source: String,
    pub reason: SkipReason,
}

/// All observations of one run, in input order, plus the skipped tables.
#[derive(Debug, Default)]
pub struct Extraction {
    pub observations: Vec<QuarterlyObservation>,
    pub skipped: Vec<SkippedTable>,
}

impl Extraction {
    pub fn tables_seen(&self) -> usize {
        self.observations.len() + self.skipped.len()
    }

    /// Skips caused by unusable data, i.e. excluding absent items.
    pub fn problem_count(&self) -> usize {
        self.skipped.iter().filter(|s| !s.reason.is_expected()).count()
    }

    /// Skipped tables per [`SkipReason::kind`]; causes that never occurred are absent.
    pub fn skips_by_cause(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for skip in &self.skipped {
            *counts.entry(skip.reason.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// Extract the target item from every `(source name, loaded table)` pair.
///
/// Inputs are consumed one at a time, so a lazy iterator keeps only one
/// table in memory.
pub fn extract_all<I>(inputs: I, config: &RunConfig) -> Extraction
where
    I: IntoIterator<Item = (String, Result<RawTable>)>,
{
    let mut out = Extraction::default();

    for (source, loaded) in inputs {
        let outcome = loaded
            .map_err(SkipReason::Load)
            .and_then(|table| extract_observation(&table, &source, config));

        match outcome {
            Ok(obs) => {
                debug!(file = %source, period = %obs.period, value = obs.value, "extracted");
                out.observations.push(obs);
            }
            Err(reason) => {
                if reason.is_expected() {
                    debug!(file = %source, %reason, "skipping file");
                } else {
                    warn!(file = %source, %reason, "skipping file");
                }
                out.skipped.push(SkippedTable { source, reason });
            }
        }
    }

    out
}

/// Extract one observation from one table.
pub fn extract_observation(
    table: &RawTable,
    source: &str,
    config: &RunConfig,
) -> Result<QuarterlyObservation, SkipReason> {
    // 1) Column resolution
    let cols = ResolvedColumns::resolve(&table.headers, &config.columns);

    // 2) Report date discovery
    let raw_date = discover_report_date(table, &cols).ok_or(SkipReason::NoReportDate)?;
    debug!(file = %source, raw = %raw_date.value, from = %raw_date.source, "report date");
    if raw_date.source.is_heuristic() {
        warn!(
            file = %source,
            token = %raw_date.value,
            "report date taken from first 8-digit cell; verify this file"
        );
    }

    // 3) Date parsing
    let period = date_parser::parse_report_date(&raw_date.value)
        .ok_or_else(|| SkipReason::InvalidReportDate(raw_date.value.clone()))?;

    // 4) Row selection, first match wins
    let target = config.target_item_code.as_str();
    let row = cols
        .item_code
        .and_then(|col| {
            table
                .rows
                .iter()
                .position(|r| r.get(col).is_some_and(|cell| cell.trim() == target))
        })
        .ok_or_else(|| SkipReason::ItemNotFound(target.to_string()))?;

    // 5) Value extraction
    let value_col = cols.value.or_else(|| table.last_column());
    let raw_value = value_col.and_then(|c| table.cell(row, c)).unwrap_or_default();
    let value = parse_value(&raw_value).ok_or_else(|| SkipReason::NonNumericValue {
        item_code: target.to_string(),
        raw: raw_value.clone(),
    })?;

    let description = cols
        .description
        .and_then(|c| table.cell(row, c))
        .unwrap_or_default();

    // 6) Emit
    Ok(QuarterlyObservation::new(period, target, description, value, source))
}

/// Numeric cell → `f64`, thousands separators removed.
pub fn parse_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let v = cleaned.trim().parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
