//! Legacy-to-canonical credential field mapping.
//!
//! Older bindings carried fields named `watson_<service>_<field>`; the
//! canonical schema callers consume is `{username, password, url, api_key,
//! iam_apikey}`. The normalizer accepts a mix of both shapes in one object:
//! canonical keys pass through untouched, legacy keys lose their prefix, and
//! the bare legacy `apikey` becomes `iam_apikey` so it can coexist with a
//! literal `api_key`.

use crate::CredentialSet;

/// Canonical credential fields returned to callers regardless of the source
/// naming convention.
pub const CANONICAL_FIELDS: [&str; 5] = ["username", "password", "url", "api_key", "iam_apikey"];

/// Legacy field suffixes recognized in local configuration objects.
pub const LEGACY_SUFFIXES: [&str; 5] = ["username", "password", "url", "api_key", "apikey"];

/// The legacy naming base for a service: `watson_<name>`.
pub fn legacy_base(name: &str) -> String {
    format!("watson_{name}")
}

/// Map a raw credential object onto the canonical schema.
///
/// Idempotent on already-canonical input. Keys that are neither canonical nor
/// prefixed with this service's legacy base are dropped.
pub fn normalize_credentials(name: &str, raw: &CredentialSet) -> CredentialSet {
    let prefix = format!("{}_", legacy_base(name));
    let mut normalized = CredentialSet::new();
    for (key, value) in raw {
        if CANONICAL_FIELDS.contains(&key.as_str()) {
            normalized.insert(key.clone(), value.clone());
        } else if let Some(suffix) = key.strip_prefix(&prefix) {
            let canonical = if suffix == "apikey" { "iam_apikey" } else { suffix };
            normalized.insert(canonical.to_string(), value.clone());
        }
    }
    normalized
}
