// src/pipeline.rs
use anyhow::{Context, Result};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tracing::{info, info_span};

use crate::{
    config::RunConfig,
    error::RunError,
    extract::{self, Extraction},
    output, series,
    table::{self, load_csv_table},
};

/// What a finished run did.
#[derive(Debug)]
pub struct RunSummary {
    pub scan_dir: PathBuf,
    pub output_path: PathBuf,
    pub files_scanned: usize,
    pub observations: usize,
    pub skipped_files: usize,
    pub problem_files: usize,
    /// Skipped files keyed by cause, e.g. `item_not_found`.
    pub skips_by_cause: BTreeMap<&'static str, usize>,
    pub monthly_records: usize,
    pub imputed_records: usize,
}

/// Directory to scan: `data_dir` itself, or its parent when it names a file.
pub fn resolve_scan_dir(data_dir: &Path) -> Result<PathBuf> {
    if data_dir.is_dir() {
        return Ok(data_dir.to_path_buf());
    }
    if data_dir.is_file() {
        let parent = data_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        return Ok(parent.to_path_buf());
    }
    Err(RunError::DataPathNotFound(data_dir.to_path_buf()).into())
}

/// One full run: list → load → extract → interpolate → write.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let _span = info_span!("run", item = %config.target_item_code).entered();

    // ─── 1) locate inputs ────────────────────────────────────────────
    let scan_dir = resolve_scan_dir(&config.data_dir)?;
    let output_path = config
        .output
        .clone()
        .unwrap_or_else(|| output::default_output_path(&scan_dir, &config.target_item_code));
    let files = table::list_table_files(&scan_dir, Some(output_path.as_path()))
        .with_context(|| format!("listing tables in {}", scan_dir.display()))?;
    info!(dir = %scan_dir.display(), files = files.len(), "scanning");

    // ─── 2) extract, one file at a time ──────────────────────────────
    let inputs = files.iter().map(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        (name, load_csv_table(path))
    });
    let extraction = extract::extract_all(inputs, config);
    let problem_files = extraction.problem_count();
    let skips_by_cause = extraction.skips_by_cause();
    let Extraction {
        observations,
        skipped,
    } = extraction;

    if observations.is_empty() {
        return Err(RunError::NoRecordsFound {
            item_code: config.target_item_code.clone(),
            dir: scan_dir,
        }
        .into());
    }
    info!(
        observations = observations.len(),
        skipped = skipped.len(),
        by_cause = ?skips_by_cause,
        "quarterly data:\n{}",
        output::format_quarterly_preview(&observations, config.preview_rows)
    );

    // ─── 3) interpolate ──────────────────────────────────────────────
    let monthly = series::build_monthly_series(&observations);
    if monthly.is_empty() {
        return Err(RunError::NoAnchoredMonths {
            item_code: config.target_item_code.clone(),
        }
        .into());
    }
    let imputed_records = monthly
        .iter()
        .filter(|r| r.provenance == series::Provenance::Imputed)
        .count();
    info!(
        months = monthly.len(),
        imputed = imputed_records,
        "monthly series:\n{}",
        output::format_monthly_preview(&monthly, config.preview_rows)
    );

    // ─── 4) persist ──────────────────────────────────────────────────
    output::write_monthly_csv(&output_path, &monthly)
        .with_context(|| format!("writing {}", output_path.display()))?;
    info!(path = %output_path.display(), "saved output");

    Ok(RunSummary {
        scan_dir,
        output_path,
        files_scanned: files.len(),
        observations: observations.len(),
        skipped_files: skipped.len(),
        problem_files,
        skips_by_cause,
        monthly_records: monthly.len(),
        imputed_records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_dir_from_file_path() -> Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("q1.csv");
        fs::write(&file, "a\n")?;
        assert_eq!(resolve_scan_dir(&file)?, dir.path());
        assert_eq!(resolve_scan_dir(dir.path())?, dir.path());
        Ok(())
    }

    #[test]
    fn missing_data_dir_is_fatal() {
        let err = resolve_scan_dir(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RunError>(),
            Some(RunError::DataPathNotFound(_))
        ));
    }
}
