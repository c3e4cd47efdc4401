//! Quarterly observations and the monthly series derived from them.

use chrono::NaiveDate;
use std::fmt;

pub mod calendar;
pub mod interpolate;

pub use interpolate::build_monthly_series;

/// Whether a value was read from a filing or filled in between filings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Original,
    Imputed,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Original => "original",
            Provenance::Imputed => "imputed",
        }
    }

    /// Label written to the `Remark` column.
    pub fn remark(&self) -> &'static str {
        match self {
            Provenance::Original => "Quarterly data",
            Provenance::Imputed => "Imputed",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item value read from one filing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterlyObservation {
    /// Report date of the filing.
    pub period: NaiveDate,
    pub item_code: String,
    pub item_description: String,
    pub value: f64,
    pub provenance: Provenance,
    /// File the observation came from.
    pub source: String,
}

impl QuarterlyObservation {
    pub fn new(
        period: NaiveDate,
        item_code: impl Into<String>,
        item_description: impl Into<String>,
        value: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            period,
            item_code: item_code.into(),
            item_description: item_description.into(),
            value,
            provenance: Provenance::Original,
            source: source.into(),
        }
    }
}

/// One month-end row of the output series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecord {
    pub period: NaiveDate,
    pub item_code: String,
    pub item_description: String,
    pub value: f64,
    pub provenance: Provenance,
}
