//! Renderers turn country records into region content.

use serde::Serialize;

use crate::record::CountryRecord;

/// Produces the content written into the detail and list regions.
///
/// Both methods default to a pretty-printed JSON dump, so an implementation
/// may override just one of them.
pub trait Renderer: Send + Sync {
    fn render_detail(&self, record: &CountryRecord) -> String {
        dump(record)
    }

    fn render_list(&self, records: &[CountryRecord]) -> String {
        dump(records)
    }
}

/// The fallback renderer: a structural dump of whatever the API returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct DumpRenderer;

impl Renderer for DumpRenderer {}

/// Pretty-print with two-space indentation.
pub fn dump<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dump_renderer_pretty_prints() {
        let record = CountryRecord::new(json!({"name": {"common": "Peru"}}));
        let out = DumpRenderer.render_detail(&record);
        assert_eq!(out, "{\n  \"name\": {\n    \"common\": \"Peru\"\n  }\n}");
    }

    #[test]
    fn list_dump_is_an_array() {
        let records = vec![
            CountryRecord::new(json!({"a": 1})),
            CountryRecord::new(json!({"b": 2})),
        ];
        let out = DumpRenderer.render_list(&records);
        assert!(out.starts_with('['));
        assert!(out.contains("\"a\": 1"));
        assert!(out.contains("\"b\": 2"));
    }

    #[test]
    fn partial_override_keeps_default_list() {
        struct NamesOnly;
        impl Renderer for NamesOnly {
            fn render_detail(&self, record: &CountryRecord) -> String {
                record.common_name().unwrap_or("?").to_string()
            }
        }

        let record = CountryRecord::new(json!({"name": {"common": "Chad"}}));
        assert_eq!(NamesOnly.render_detail(&record), "Chad");
        assert_eq!(NamesOnly.render_list(&[record.clone()]), dump(&[record]));
    }
}
