use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the backend's system-settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSetting {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Look up a non-empty setting value by key.
pub fn find_setting<'a>(settings: &'a [SystemSetting], key: &str) -> Option<&'a str> {
    settings
        .iter()
        .find(|s| s.key == key)
        .and_then(|s| s.value.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting(key: &str, value: Option<&str>) -> SystemSetting {
        SystemSetting {
            key: key.to_string(),
            value: value.map(str::to_string),
            description: None,
            updated_at: None,
        }
    }

    #[test]
    fn finds_trimmed_value() {
        let settings = vec![
            setting("site_name", Some("Registry")),
            setting("blockchain_contract_address", Some(" 0xabc ")),
        ];
        assert_eq!(
            find_setting(&settings, "blockchain_contract_address"),
            Some("0xabc")
        );
    }

    #[test]
    fn empty_or_absent_values_are_missing() {
        let settings = vec![setting("blockchain_contract_address", Some("")), setting("x", None)];
        assert_eq!(find_setting(&settings, "blockchain_contract_address"), None);
        assert_eq!(find_setting(&settings, "x"), None);
        assert_eq!(find_setting(&settings, "nope"), None);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let parsed: Vec<SystemSetting> =
            serde_json::from_str(r#"[{"key":"a","value":"1"},{"key":"b"}]"#).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].value, None);
    }
}
