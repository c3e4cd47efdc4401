/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// True when `token` is exactly 8 ASCII digits, e.g. a `YYYYMMDD` stamp.
pub fn is_eight_digit_token(token: &str) -> bool {
    token.len() == 8 && token.bytes().all(|b| b.is_ascii_digit())
}

/// Header names as written by spreadsheet tools: trimmed, BOM removed.
pub fn normalize_header(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_str_strips_quotes_and_whitespace() {
        assert_eq!(clean_str("  \"20200930\" "), "20200930");
        assert_eq!(clean_str(" BHCK2170 "), "BHCK2170");
        assert_eq!(clean_str("\""), "\"");
    }

    #[test]
    fn eight_digit_tokens() {
        assert!(is_eight_digit_token("20201231"));
        assert!(!is_eight_digit_token("2020123"));
        assert!(!is_eight_digit_token("2020-12-31"));
        assert!(!is_eight_digit_token("2020123a"));
        assert!(!is_eight_digit_token("١٢٣٤٥٦٧٨"));
    }

    #[test]
    fn header_bom_is_removed() {
        assert_eq!(normalize_header("\u{feff}ItemName "), "ItemName");
    }
}
