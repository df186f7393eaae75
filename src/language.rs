use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of rows expected in the primary (English) partition
pub const PRIMARY_ROWS: u32 = 6000;

/// Placeholder returned when the Chinese partition has no row for an id
pub const ZH_PLACEHOLDER: &str = "这是一个默认的中文打字测试文本。";

/// Language of a practice passage; each one maps to its own table
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
pub enum Language {
    #[default]
    #[value(name = "en")]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    #[value(name = "zh")]
    #[serde(rename = "zh")]
    #[strum(serialize = "zh")]
    Chinese,
}

/// What the store hands back when a lookup misses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Re-query this id in the same partition
    Row(u32),
    /// Return a fixed string without touching the store again
    Text(&'static str),
}

impl Language {
    pub fn table(&self) -> &'static str {
        match self {
            Language::English => "data",
            Language::Chinese => "zh_data",
        }
    }

    pub fn fallback(&self) -> Fallback {
        match self {
            Language::English => Fallback::Row(1),
            Language::Chinese => Fallback::Text(ZH_PLACEHOLDER),
        }
    }

    /// Whether difficulty sampling reads the stored `difficulty` column
    /// instead of the contiguous id bands.
    pub fn samples_by_column(&self) -> bool {
        matches!(self, Language::Chinese)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_distinct() {
        assert_eq!(Language::English.table(), "data");
        assert_eq!(Language::Chinese.table(), "zh_data");
    }

    #[test]
    fn test_display_uses_language_code() {
        assert_eq!(Language::English.to_string(), "en");
        assert_eq!(Language::Chinese.to_string(), "zh");
    }

    #[test]
    fn test_fallback_policies_differ() {
        assert_eq!(Language::English.fallback(), Fallback::Row(1));
        assert_eq!(Language::Chinese.fallback(), Fallback::Text(ZH_PLACEHOLDER));
    }

    #[test]
    fn test_serde_codes() {
        let lang: Language = serde_json::from_str("\"zh\"").unwrap();
        assert_eq!(lang, Language::Chinese);
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
    }

    #[test]
    fn test_value_enum_parses_codes() {
        assert_eq!(Language::from_str("en", false).unwrap(), Language::English);
        assert!(Language::from_str("fr", false).is_err());
    }
}
