//! Credential extraction from caller-supplied configuration objects.
//!
//! Pure field selection with no environment access: the recognized legacy
//! suffixes are copied out of a flat object when present under
//! `watson_<name>_<suffix>`. The result keeps its legacy keys; callers pass
//! it through the field normalizer for the canonical shape.

use crate::CredentialSet;
use crate::normalize::{LEGACY_SUFFIXES, legacy_base};

/// Extract the legacy-keyed credential fields for a service from `config`.
pub fn extract(name: &str, config: &CredentialSet) -> CredentialSet {
    let mut extracted = CredentialSet::new();
    if name.is_empty() {
        return extracted;
    }
    let base = legacy_base(name);
    for suffix in LEGACY_SUFFIXES {
        let key = format!("{base}_{suffix}");
        if let Some(value) = config.get(&key) {
            extracted.insert(key, value.clone());
        }
    }
    extracted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn config() -> CredentialSet {
        match json!({
            "watson_conversation_password": "<password>",
            "watson_conversation_url": "<url>",
            "watson_conversation_username": "<username>",
            "watson_conversation_api_key": "<api_key>",
            "watson_conversation_apikey": "<apikey>",
            "unrelated": "ignored"
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn recognized_suffixes_are_copied_with_their_legacy_keys() {
        let extracted = extract("conversation", &config());
        assert_eq!(extracted.len(), 5);
        assert_eq!(
            extracted.get("watson_conversation_username").and_then(Value::as_str),
            Some("<username>")
        );
        assert!(!extracted.contains_key("unrelated"));
    }

    #[test]
    fn other_service_names_extract_nothing() {
        assert!(extract("discovery", &config()).is_empty());
    }

    #[test]
    fn empty_inputs_extract_nothing() {
        assert!(extract("", &config()).is_empty());
        assert!(extract("conversation", &Map::new()).is_empty());
    }
}
