//! Orchestrator-injected service blob lookup.
//!
//! Kube deployments bind one unversioned JSON blob per logical service, in a
//! variable named `service_` + the legacy service base, e.g.
//! `service_watson_conversation`. There is no fuzzy matching and no
//! plan/instance disambiguation on this path.

use crate::normalize::legacy_base;
use crate::{CredentialSet, EnvSnapshot, parse_credentials};

const SERVICE_VAR_PREFIX: &str = "service_";

/// The exact variable name consulted for a service.
pub fn kube_variable_name(name: &str) -> String {
    format!("{SERVICE_VAR_PREFIX}{}", legacy_base(&name.to_lowercase()))
}

/// Fetch the raw (pre-normalization) blob for a service, or empty when the
/// variable is absent or malformed.
pub fn resolve(env: &EnvSnapshot, name: &str) -> CredentialSet {
    if name.is_empty() {
        return CredentialSet::new();
    }
    env.get(&kube_variable_name(name))
        .and_then(parse_credentials)
        .unwrap_or_default()
}
