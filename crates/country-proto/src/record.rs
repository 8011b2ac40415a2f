//! CountryRecord — one country as returned by the API.
//!
//! The controller never looks inside a record; it only counts them. The
//! accessors below exist for renderers that want more than a JSON dump.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields requested from the API unless overridden.
pub const DEFAULT_FIELDS: &[&str] = &["name", "capital", "population", "flags", "languages"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryRecord(Value);

impl CountryRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `name.common`, falling back to `name.official`.
    pub fn common_name(&self) -> Option<&str> {
        let name = self.0.get("name")?;
        name.get("common")
            .or_else(|| name.get("official"))
            .and_then(Value::as_str)
    }

    pub fn official_name(&self) -> Option<&str> {
        self.0.get("name")?.get("official")?.as_str()
    }

    /// A country may list several capitals, or none.
    pub fn capitals(&self) -> Vec<&str> {
        self.0
            .get("capital")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn population(&self) -> Option<u64> {
        self.0.get("population")?.as_u64()
    }

    /// SVG flag when available, PNG otherwise.
    pub fn flag_url(&self) -> Option<&str> {
        let flags = self.0.get("flags")?;
        flags
            .get("svg")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| flags.get("png").and_then(Value::as_str))
    }

    /// `languages` is an object keyed by ISO code; only the names are kept,
    /// in key order.
    pub fn languages(&self) -> Vec<&str> {
        self.0
            .get("languages")
            .and_then(Value::as_object)
            .map(|m| m.values().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Value> for CountryRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn france() -> CountryRecord {
        CountryRecord::new(json!({
            "name": {"common": "France", "official": "French Republic"},
            "capital": ["Paris"],
            "population": 67391582,
            "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg"},
            "languages": {"fra": "French"}
        }))
    }

    #[test]
    fn reads_common_fields() {
        let fr = france();
        assert_eq!(fr.common_name(), Some("France"));
        assert_eq!(fr.official_name(), Some("French Republic"));
        assert_eq!(fr.capitals(), vec!["Paris"]);
        assert_eq!(fr.population(), Some(67391582));
        assert_eq!(fr.languages(), vec!["French"]);
    }

    #[test]
    fn flag_prefers_svg() {
        assert_eq!(france().flag_url(), Some("https://flagcdn.com/fr.svg"));

        let png_only = CountryRecord::new(json!({"flags": {"png": "a.png"}}));
        assert_eq!(png_only.flag_url(), Some("a.png"));
    }

    #[test]
    fn missing_fields_are_empty() {
        let bare = CountryRecord::new(json!({}));
        assert_eq!(bare.common_name(), None);
        assert!(bare.capitals().is_empty());
        assert!(bare.languages().is_empty());
        assert_eq!(bare.population(), None);
    }
}
