use std::fmt;

use super::columns::ResolvedColumns;
use crate::table::{
    utils::{clean_str, is_eight_digit_token},
    RawTable,
};

const REPORT_DATE_LABEL: &str = "report date";

/// Which rule located the report date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// A dedicated report-date column.
    DateColumn,
    /// A row labelled "report date" in the item-code or description column.
    LabelRow,
    /// First 8-digit token anywhere in the table. Any 8-digit field can match.
    CellScan,
}

impl DateSource {
    pub fn is_heuristic(&self) -> bool {
        matches!(self, DateSource::CellScan)
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateSource::DateColumn => "date column",
            DateSource::LabelRow => "report date row",
            DateSource::CellScan => "cell scan",
        })
    }
}

/// Raw report-date text plus where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReportDate {
    pub value: String,
    pub source: DateSource,
}

/// Locate the report date; the first rule that yields a value wins.
pub fn discover_report_date(table: &RawTable, cols: &ResolvedColumns) -> Option<RawReportDate> {
    from_date_column(table, cols)
        .map(|value| RawReportDate {
            value,
            source: DateSource::DateColumn,
        })
        .or_else(|| {
            from_label_row(table, cols).map(|value| RawReportDate {
                value,
                source: DateSource::LabelRow,
            })
        })
        .or_else(|| {
            from_cell_scan(table).map(|value| RawReportDate {
                value,
                source: DateSource::CellScan,
            })
        })
}

fn from_date_column(table: &RawTable, cols: &ResolvedColumns) -> Option<String> {
    let col = cols.date?;
    (0..table.rows.len()).find_map(|row| table.cell(row, col))
}

fn from_label_row(table: &RawTable, cols: &ResolvedColumns) -> Option<String> {
    let value_col = cols.value.or_else(|| table.last_column())?;
    let is_label = |row: usize, col: Option<usize>| {
        col.and_then(|c| table.cell(row, c))
            .is_some_and(|s| s.to_lowercase().contains(REPORT_DATE_LABEL))
    };

    (0..table.rows.len())
        .filter(|&row| is_label(row, cols.item_code) || is_label(row, cols.description))
        .find_map(|row| table.cell(row, value_col))
}

// Row by row, left to right; headers are not scanned.
fn from_cell_scan(table: &RawTable) -> Option<String> {
    table
        .rows
        .iter()
        .flat_map(|row| row.iter())
        .map(|cell| clean_str(cell))
        .find(|token| is_eight_digit_token(token))
}
