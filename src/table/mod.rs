// src/table/mod.rs
use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;
use glob::{glob_with, MatchOptions, Pattern};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

pub mod utils;

use utils::{clean_str, normalize_header};

/// One filing extract, every cell kept as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names from the header row, trimmed.
    pub headers: Vec<String>,
    /// Data rows in file order. Rows may be shorter or longer than `headers`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the right-most column, the fallback for value lookups.
    pub fn last_column(&self) -> Option<usize> {
        self.headers.len().checked_sub(1)
    }

    /// Cleaned cell at (`row`, `col`), `None` when missing or blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<String> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| clean_str(s))
            .filter(|s| !s.is_empty())
    }
}

/// Read `path` as a headed CSV with all cells as strings.
pub fn load_csv_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // filings are not always rectangular
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header row of {}", path.display()))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        bail!("{} has no header row", path.display());
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // +2: header is line 1, records are 1-based
        let record = result
            .with_context(|| format!("CSV parse error in {} at line {}", path.display(), idx + 2))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    trace!(path = %path.display(), columns = headers.len(), rows = rows.len(), "loaded table");

    Ok(RawTable { headers, rows })
}

/// List `*.csv` files (extension matched case-insensitively) directly under
/// `dir`, sorted by file name. `exclude` is skipped when it is the same file
/// as a listed entry; a same-named file elsewhere does not count.
pub fn list_table_files(dir: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .ok_or_else(|| anyhow!("data directory {:?} is not valid UTF-8", dir))?;
    let pattern = format!("{}/*.csv", Pattern::escape(dir_str.trim_end_matches(['/', '\\'])));
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    // Not yet written on a first run, so it cannot match anything.
    let exclude = exclude.and_then(|p| p.canonicalize().ok());
    let mut files = Vec::new();
    for entry in glob_with(&pattern, options).with_context(|| format!("bad glob {pattern}"))? {
        let path = entry.context("reading directory entry")?;
        if !path.is_file() {
            continue;
        }
        if exclude.is_some() && path.canonicalize().ok() == exclude {
            debug!(file = %path.display(), "skipping previous output");
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
