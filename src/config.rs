use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATE_COL: &str = "Report Date";
pub const DEFAULT_VALUE_COL: &str = "Value";
pub const DEFAULT_ITEM_CODE_COL: &str = "ItemName";
pub const DEFAULT_DESCRIPTION_COL: &str = "Description";
pub const DEFAULT_PREVIEW_ROWS: usize = 12;

/// Configured column names. Matched case-insensitively against each file's headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub date: String,
    pub value: String,
    pub item_code: String,
    pub description: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_COL.to_string(),
            value: DEFAULT_VALUE_COL.to_string(),
            item_code: DEFAULT_ITEM_CODE_COL.to_string(),
            description: DEFAULT_DESCRIPTION_COL.to_string(),
        }
    }
}

/// Everything one run needs. Built once, then only borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory to scan (or a file inside it).
    pub data_dir: PathBuf,
    /// MDRM code to extract, e.g. `BHCK2170`.
    pub target_item_code: String,
    pub columns: ColumnNames,
    /// Explicit output path; defaults to `mdrm_<code>_monthly_imputed.csv` in the data dir.
    pub output: Option<PathBuf>,
    /// Rows of each series echoed to the log.
    pub preview_rows: usize,
}

impl RunConfig {
    pub fn new(data_dir: impl Into<PathBuf>, target_item_code: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            target_item_code: target_item_code.into().trim().to_string(),
            columns: ColumnNames::default(),
            output: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Build a monthly series for one FR Y-9C line item from a folder of quarterly extracts
#[derive(Parser, Debug, Clone)]
#[command(name = "y9c-monthly", version)]
pub struct Cli {
    /// Folder holding the quarterly CSV extracts (a file path selects its folder)
    #[arg(long, short = 'd', env = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// MDRM code to extract, e.g. BHCK2170
    #[arg(long, short = 'i', env = "TARGET_ITEM_CODE")]
    pub item_code: String,

    /// Column holding the report date
    #[arg(long, default_value = DEFAULT_DATE_COL)]
    pub date_col: String,

    /// Column holding the reported value
    #[arg(long, default_value = DEFAULT_VALUE_COL)]
    pub value_col: String,

    /// Column holding the MDRM code
    #[arg(long, default_value = DEFAULT_ITEM_CODE_COL)]
    pub item_code_col: String,

    /// Column holding the MDRM description
    #[arg(long, default_value = DEFAULT_DESCRIPTION_COL)]
    pub description_col: String,

    /// Write the monthly series here instead of the data folder
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Rows of the quarterly and monthly series to log
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview: usize,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        let mut config = RunConfig::new(self.data_dir, self.item_code).with_columns(ColumnNames {
            date: self.date_col,
            value: self.value_col,
            item_code: self.item_code_col,
            description: self.description_col,
        });
        config.output = self.output;
        config.preview_rows = self.preview;
        config
    }
}
