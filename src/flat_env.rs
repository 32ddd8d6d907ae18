//! Per-service environment variable lookup, used when no aggregated catalog
//! variable exists.
//!
//! Platforms without a catalog inject one JSON-valued variable per bound
//! instance, named after the instance with inconsistent casing and
//! delimiters. Lookup normalizes the *selector* side only; variable names are
//! matched as-is. See [`env_var_name`] for the retained case quirk.

use crate::selector::Selector;
use crate::{CredentialSet, EnvSnapshot, Resolver, catalog::VCAP_SERVICES_VAR, parse_credentials};

/// Normalize a service or instance label into environment variable form:
/// uppercase, with each space, hyphen, and ampersand replaced by an
/// underscore. `"Compose for Redis-ov"` becomes `"COMPOSE_FOR_REDIS_OV"`.
///
/// Only the selector is normalized; the environment's actual variable names
/// are compared literally. A lower- or mixed-case variable name therefore
/// never matches, no matter how the selector is cased. Long-standing
/// compatibility behavior; callers depend on it, so it stays.
pub fn env_var_name(label: &str) -> String {
    label
        .to_uppercase()
        .chars()
        .map(|c| match c {
            ' ' | '-' | '&' => '_',
            other => other,
        })
        .collect()
}

/// Second-priority tier: individual per-service variables.
///
/// Returns empty without scanning when the catalog variable is present; the
/// catalog and flat-env tiers are mutually exclusive, not cumulative.
pub struct FlatEnvResolver;

impl Resolver for FlatEnvResolver {
    fn resolve(&self, env: &EnvSnapshot, selector: &Selector) -> CredentialSet {
        if env.contains(VCAP_SERVICES_VAR) {
            return CredentialSet::new();
        }

        // Instance path: exact lookup on the normalized instance name. The
        // stored value is returned verbatim, not field-normalized. A
        // malformed value falls through to the name scan instead of ending
        // the lookup.
        if let Some(instance) = selector.instance_name() {
            if let Some(raw) = env.get(&env_var_name(instance)) {
                if let Some(credentials) = parse_credentials(raw) {
                    return credentials;
                }
            }
        }

        // Name scan: first variable whose raw name starts with the
        // normalized selector. Catalog-absent mode assumes one binding per
        // distinct name, so a syntactic match that fails to parse ends the
        // scan rather than trying later variables.
        let Some(name) = selector.name() else {
            return CredentialSet::new();
        };
        let prefix = env_var_name(name);
        for (key, value) in env.iter() {
            if key.starts_with(&prefix) {
                return parse_credentials(value).unwrap_or_default();
            }
        }
        CredentialSet::new()
    }
}
