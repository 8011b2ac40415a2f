//! Country card and name-list renderers for the terminal panes.

use country_proto::{CountryRecord, Renderer};

#[derive(Debug, Default, Clone, Copy)]
pub struct CardRenderer;

impl Renderer for CardRenderer {
    fn render_detail(&self, record: &CountryRecord) -> String {
        let name = record.common_name().unwrap_or("Unknown");
        let mut lines = vec![name.to_string()];
        if let Some(official) = record.official_name().filter(|o| *o != name) {
            lines.push(official.to_string());
        }
        lines.push(String::new());

        let capitals = record.capitals();
        lines.push(format!(
            "{}: {}",
            plural("Capital", capitals.len()),
            or_dash(&capitals.join(", "))
        ));
        lines.push(format!(
            "Population: {}",
            record
                .population()
                .map(group_thousands)
                .unwrap_or_else(|| "—".to_string())
        ));
        let languages = record.languages();
        lines.push(format!(
            "{}: {}",
            plural("Language", languages.len()),
            or_dash(&languages.join(", "))
        ));
        lines.push(format!("Flag: {}", record.flag_url().unwrap_or("—")));
        lines.join("\n")
    }

    fn render_list(&self, records: &[CountryRecord]) -> String {
        records
            .iter()
            .map(|r| format!("• {}", r.common_name().unwrap_or("Unknown")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn plural(word: &str, count: usize) -> String {
    if count > 1 {
        format!("{}s", word)
    } else {
        word.to_string()
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "—"
    } else {
        s
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_shows_key_facts() {
        let record = CountryRecord::new(json!({
            "name": {"common": "South Africa", "official": "Republic of South Africa"},
            "capital": ["Pretoria", "Bloemfontein", "Cape Town"],
            "population": 59308690,
            "flags": {"png": "https://flagcdn.com/w320/za.png", "svg": "https://flagcdn.com/za.svg"},
            "languages": {"afr": "Afrikaans", "eng": "English"}
        }));
        let card = CardRenderer.render_detail(&record);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[0], "South Africa");
        assert_eq!(lines[1], "Republic of South Africa");
        assert!(card.contains("Capitals: Pretoria, Bloemfontein, Cape Town"));
        assert!(card.contains("Population: 59,308,690"));
        assert!(card.contains("Languages: Afrikaans, English"));
        assert!(card.contains("Flag: https://flagcdn.com/za.svg"));
    }

    #[test]
    fn singular_labels_and_missing_values() {
        let record = CountryRecord::new(json!({
            "name": {"common": "Nowhere", "official": "Nowhere"},
            "capital": ["Nil"],
        }));
        let card = CardRenderer.render_detail(&record);
        assert!(card.contains("Capital: Nil"));
        assert!(card.contains("Population: —"));
        assert!(card.contains("Language: —"));
        assert!(!card.contains("Nowhere\nNowhere"));
    }

    #[test]
    fn list_shows_one_name_per_line() {
        let records = vec![
            CountryRecord::new(json!({"name": {"common": "Niger"}})),
            CountryRecord::new(json!({"name": {"common": "Nigeria"}})),
        ];
        assert_eq!(CardRenderer.render_list(&records), "• Niger\n• Nigeria");
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
