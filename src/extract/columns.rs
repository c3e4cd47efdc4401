use crate::config::ColumnNames;

/// Header positions of the configured columns in one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub date: Option<usize>,
    pub value: Option<usize>,
    pub item_code: Option<usize>,
    pub description: Option<usize>,
}

impl ResolvedColumns {
    pub fn resolve(headers: &[String], names: &ColumnNames) -> Self {
        Self {
            date: find_column(headers, &names.date),
            value: find_column(headers, &names.value),
            item_code: find_column(headers, &names.item_code),
            description: find_column(headers, &names.description),
        }
    }
}

/// Exact header match first, then a case-insensitive one.
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    let name = name.trim();
    if let Some(idx) = headers.iter().position(|h| h == name) {
        return Some(idx);
    }
    let lowered = name.to_lowercase();
    headers.iter().position(|h| h.to_lowercase() == lowered)
}
