use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use crate::series::{MonthlyRecord, QuarterlyObservation};

/// `mdrm_<code>_monthly_imputed.csv`
pub fn output_file_name(item_code: &str) -> String {
    format!("mdrm_{}_monthly_imputed.csv", item_code)
}

pub fn default_output_path(dir: &Path, item_code: &str) -> PathBuf {
    dir.join(output_file_name(item_code))
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "MDRM Name")]
    item_code: &'a str,
    #[serde(rename = "MDRM Description")]
    item_description: &'a str,
    #[serde(rename = "Value")]
    value: f64,
    #[serde(rename = "Remark")]
    remark: &'static str,
}

impl<'a> From<&'a MonthlyRecord> for OutputRow<'a> {
    fn from(r: &'a MonthlyRecord) -> Self {
        Self {
            period: r.period.format("%Y-%m-%d").to_string(),
            item_code: &r.item_code,
            item_description: &r.item_description,
            value: r.value,
            remark: r.provenance.remark(),
        }
    }
}

/// Write the monthly series to `path`
///
/// - one header row, one row per month
/// - written to a dot-prefixed temp file next to `path`, then renamed over it
pub fn write_monthly_csv(path: &Path, records: &[MonthlyRecord]) -> Result<()> {
    // 1) Temp file alongside the target
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("output path {:?} has no file name", path))?
        .to_string_lossy();
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    // 2) Serialize every record
    {
        let mut wtr = csv::Writer::from_path(&tmp_path)
            .with_context(|| format!("creating {:?}", tmp_path))?;
        for record in records {
            wtr.serialize(OutputRow::from(record))
                .with_context(|| format!("writing row for {}", record.period))?;
        }
        wtr.flush().with_context(|| format!("flushing {:?}", tmp_path))?;
    }

    // 3) Swap into place
    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    Ok(())
}

/// Plain-text table of the first `n` quarterly observations.
pub fn format_quarterly_preview(observations: &[QuarterlyObservation], n: usize) -> String {
    let mut sorted: Vec<&QuarterlyObservation> = observations.iter().collect();
    sorted.sort_by_key(|o| o.period);

    let mut out = String::from("Period      Value                 Source\n");
    for o in sorted.into_iter().take(n) {
        let _ = writeln!(out, "{}  {:<20}  {}", o.period, o.value, o.source);
    }
    out
}

/// Plain-text table of the first `n` monthly records.
pub fn format_monthly_preview(records: &[MonthlyRecord], n: usize) -> String {
    let mut out = String::from("Period      Value                 Remark\n");
    for r in records.iter().take(n) {
        let _ = writeln!(out, "{}  {:<20}  {}", r.period, r.value, r.provenance.remark());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Provenance;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(y: i32, m: u32, d: u32, value: f64, provenance: Provenance) -> MonthlyRecord {
        MonthlyRecord {
            period: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            item_code: "BHDM1766".into(),
            item_description: "Loans, net".into(),
            value,
            provenance,
        }
    }

    #[test]
    fn output_name_is_derived_from_item_code() {
        assert_eq!(output_file_name("BHDM1766"), "mdrm_BHDM1766_monthly_imputed.csv");
        assert_eq!(
            default_output_path(Path::new("/data"), "BHCK2170"),
            PathBuf::from("/data/mdrm_BHCK2170_monthly_imputed.csv")
        );
    }

    #[test]
    fn writes_header_and_rows() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        let records = vec![
            record(2020, 3, 31, 100.0, Provenance::Original),
            record(2020, 4, 30, 103.5, Provenance::Imputed),
        ];

        write_monthly_csv(&path, &records)?;
        let text = fs::read_to_string(&path)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Period,MDRM Name,MDRM Description,Value,Remark");
        assert_eq!(lines[1], "2020-03-31,BHDM1766,\"Loans, net\",100.0,Quarterly data");
        assert_eq!(lines[2], "2020-04-30,BHDM1766,\"Loans, net\",103.5,Imputed");
        assert_eq!(lines.len(), 3);
        assert!(!dir.path().join(".out.csv.tmp").exists());
        Ok(())
    }

    #[test]
    fn rewrite_replaces_existing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale\n")?;
        write_monthly_csv(&path, &[record(2020, 3, 31, 1.0, Provenance::Original)])?;
        assert!(!fs::read_to_string(&path)?.contains("stale"));
        Ok(())
    }

    #[test]
    fn previews_are_truncated() {
        let records = vec![
            record(2020, 3, 31, 1.0, Provenance::Original),
            record(2020, 4, 30, 2.0, Provenance::Imputed),
        ];
        let text = format_monthly_preview(&records, 1);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("2020-03-31"));
        assert!(!text.contains("2020-04-30"));
    }
}
