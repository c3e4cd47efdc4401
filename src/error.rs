use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a run.
#[derive(Error, Debug)]
pub enum RunError {
    /// The configured data location does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No table yielded an observation for the item.
    #[error("No records found for MDRM {item_code} in {dir}")]
    NoRecordsFound { item_code: String, dir: PathBuf },

    /// Observations were found but none falls on a month end, so no month
    /// of the monthly series is anchored.
    #[error("No month-end report dates for MDRM {item_code}; monthly series would be empty")]
    NoAnchoredMonths { item_code: String },
}
