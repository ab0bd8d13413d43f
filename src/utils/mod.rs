pub mod config;
pub mod errors;

pub use config::{
    ApiConfig, AppConfig, ColumnDataType, DeleteConfig, ExportOptions, MetadataColumn,
};
pub use errors::{GridlySyncError, Result};

/// Removes a leading and a trailing double quote, each independently.
pub fn trim_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::trim_quotes;

    #[test]
    fn trims_wrapping_quotes() {
        assert_eq!(trim_quotes("\"abc\""), "abc");
        assert_eq!(trim_quotes("plain"), "plain");
        assert_eq!(trim_quotes("\"\""), "");
    }

    #[test]
    fn unbalanced_quotes_are_trimmed_on_their_own_side() {
        assert_eq!(trim_quotes("\"abc"), "abc");
        assert_eq!(trim_quotes("abc\""), "abc");
        assert_eq!(trim_quotes("he said \"hi\""), "he said \"hi");
        assert_eq!(trim_quotes("\""), "");
    }
}
