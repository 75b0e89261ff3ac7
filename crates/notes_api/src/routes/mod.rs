pub mod landing;
pub mod notes;
pub mod packages;
pub mod search;
pub mod stats;
pub mod tasks;

use crate::error::ApiError;
use notes_core::dates::parse_date;
use serde::{Deserialize, Deserializer};

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query-string values are ignored when blank.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Parses an optional date field; blank and `null` both mean "no date".
pub(crate) fn parse_due(value: Option<&str>) -> Result<Option<i64>, ApiError> {
    match value.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => Ok(Some(parse_date(text)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{nullable, present};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "nullable")]
        due_date: Option<Option<String>>,
    }

    #[test]
    fn nullable_separates_missing_from_null() {
        let missing: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        let set: Body = serde_json::from_str(r#"{"due_date": "2026-01-02"}"#).unwrap();
        assert_eq!(missing.due_date, None);
        assert_eq!(null.due_date, Some(None));
        assert_eq!(set.due_date, Some(Some("2026-01-02".to_string())));
    }

    #[test]
    fn blank_query_values_are_dropped() {
        assert_eq!(present(Some("  ".into())), None);
        assert_eq!(present(Some(" high ".into())), Some("high".into()));
    }
}
