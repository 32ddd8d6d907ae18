//! Service credential resolution for cloud-deployed applications.
//!
//! Applications ask for credentials by a loose identifier (service name
//! prefix, optional plan, optional instance name) and receive the single
//! best-matching credential set, without knowing how the platform injected
//! it. Four sources are supported, tried in a fixed priority order: the
//! aggregated `VCAP_SERVICES` catalog, individually named per-service
//! variables, a Kube-style per-service blob, and a caller-supplied
//! configuration object. Legacy `watson_<service>_*` field names are mapped
//! onto the canonical credential schema along the way.
//!
//! Absence and malformed input are observationally identical: every lookup
//! returns a possibly-empty credential map and never an error. The boundary
//! contract is "best-effort credentials or nothing", not "fail the request".

use serde_json::Value;

pub mod catalog;
pub mod flat_env;
pub mod kube;
pub mod local;
pub mod normalize;
pub mod selector;
pub mod snapshot;

pub use catalog::{
    CatalogResolver, ServiceBinding, ServiceCatalog, VCAP_SERVICES_VAR, parse_catalog,
};
pub use flat_env::{FlatEnvResolver, env_var_name};
pub use kube::kube_variable_name;
pub use normalize::{CANONICAL_FIELDS, LEGACY_SUFFIXES, normalize_credentials};
pub use selector::Selector;
pub use snapshot::EnvSnapshot;

/// Credential fields keyed by name. Values are usually strings but richer
/// JSON values pass through opaquely. The empty map is the canonical "not
/// found" result everywhere in this crate.
pub type CredentialSet = serde_json::Map<String, Value>;

/// Parse a JSON object out of raw variable text.
///
/// Returns `None` for anything that is not a JSON object; resolvers treat
/// that the same as an absent variable.
pub fn parse_credentials(raw: &str) -> Option<CredentialSet> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// One tier of the environment-backed resolution chain.
///
/// Tiers are independent: each sees only the read-only snapshot and the
/// selector, and reports "nothing here" as an empty set.
pub trait Resolver {
    fn resolve(&self, env: &EnvSnapshot, selector: &Selector) -> CredentialSet;
}

/// Run the selector through the tiers in priority order, stopping at the
/// first non-empty result. An all-empty selector short-circuits without
/// consulting any tier.
pub fn resolve_from_env(env: &EnvSnapshot, selector: &Selector) -> CredentialSet {
    if selector.is_empty() {
        return CredentialSet::new();
    }
    let tiers: [&dyn Resolver; 2] = [&CatalogResolver, &FlatEnvResolver];
    for tier in tiers {
        let credentials = tier.resolve(env, selector);
        if !credentials.is_empty() {
            return credentials;
        }
    }
    CredentialSet::new()
}

/// Full resolution against the live process environment.
///
/// Empty-string arguments count as absent; with every field absent this
/// returns empty without reading a single variable.
pub fn get_credentials(
    name: Option<&str>,
    plan: Option<&str>,
    instance_name: Option<&str>,
) -> CredentialSet {
    let selector = Selector::new(name, plan, instance_name);
    if selector.is_empty() {
        return CredentialSet::new();
    }
    resolve_from_env(&EnvSnapshot::capture(), &selector)
}

/// Extract and normalize credentials from a caller-supplied configuration
/// object. No environment access on this path.
pub fn get_credentials_from_local_config(
    name: Option<&str>,
    config: Option<&CredentialSet>,
) -> CredentialSet {
    match (name, config) {
        (Some(name), Some(config)) if !name.is_empty() => {
            normalize_credentials(name, &local::extract(name, config))
        }
        _ => CredentialSet::new(),
    }
}

/// Kube-style lookup and normalization against an explicit snapshot.
pub fn resolve_kube_env(env: &EnvSnapshot, name: &str) -> CredentialSet {
    normalize_credentials(name, &kube::resolve(env, name))
}

/// Kube-style lookup against the live process environment: one blob per
/// logical service under `service_watson_<name>`.
pub fn get_credentials_from_kube_env(name: &str) -> CredentialSet {
    resolve_kube_env(&EnvSnapshot::capture(), name)
}

/// Starter-kit composite against an explicit snapshot.
///
/// A supplied configuration object decides the outcome by itself, even when
/// it extracts nothing; only with no object at all does the Kube variable get
/// consulted. This path never touches the aggregated catalog and accepts no
/// plan or instance selectors.
pub fn resolve_starter(
    env: &EnvSnapshot,
    name: Option<&str>,
    config: Option<&CredentialSet>,
) -> CredentialSet {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return CredentialSet::new();
    };
    match config {
        Some(config) => get_credentials_from_local_config(Some(name), Some(config)),
        None => resolve_kube_env(env, name),
    }
}

/// Starter-kit composite against the live process environment.
pub fn get_credentials_for_starter(
    name: Option<&str>,
    config: Option<&CredentialSet>,
) -> CredentialSet {
    match (name, config) {
        // The environment only matters on the Kube path; skip the capture
        // when the outcome cannot involve it.
        (None, _) => CredentialSet::new(),
        (Some(name), Some(config)) => {
            resolve_starter(&EnvSnapshot::default(), Some(name), Some(config))
        }
        (Some(name), None) => resolve_starter(&EnvSnapshot::capture(), Some(name), None),
    }
}
