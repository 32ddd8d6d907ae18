//! Aggregated service catalog parsing and lookup.
//!
//! Cloud Foundry style platforms inject one `VCAP_SERVICES` variable holding a
//! JSON object keyed by service type, each key carrying the ordered list of
//! bound instances. The catalog is parsed fresh on every lookup; bindings are
//! call-scoped and discarded when the lookup returns.

use crate::selector::Selector;
use crate::{CredentialSet, EnvSnapshot, Resolver};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

/// Variable that carries the aggregated catalog when the platform provides one.
pub const VCAP_SERVICES_VAR: &str = "VCAP_SERVICES";

/// One bound service instance inside a catalog entry.
///
/// Extra platform fields (`label`, `tags`, `syslog_drain_url`, ...) are
/// ignored; only the fields the resolution algorithm consults are kept.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceBinding {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub credentials: CredentialSet,
}

impl ServiceBinding {
    /// Whether this binding satisfies the plan/instance constraints of a
    /// selector. Unset selector fields match any binding value.
    fn satisfies(&self, selector: &Selector) -> bool {
        let plan_ok = match selector.plan() {
            Some(plan) => self.plan.as_deref() == Some(plan),
            None => true,
        };
        let name_ok = match selector.instance_name() {
            Some(instance) => self.name.as_deref() == Some(instance),
            None => true,
        };
        plan_ok && name_ok
    }
}

/// Parsed catalog: service-type keys in source order, each with its bindings
/// in source order. Positional "first key" and "last binding" semantics
/// depend on both orders being preserved.
#[derive(Clone, Debug, Default)]
pub struct ServiceCatalog {
    entries: Vec<(String, Vec<ServiceBinding>)>,
}

impl ServiceCatalog {
    /// Locate the credentials for a selector.
    ///
    /// The first key that starts with `selector.name()` (case-sensitive, raw
    /// text; catalog keys are lower-snake-case by platform convention) decides
    /// the outcome: there is no attempt to find a better key later in the
    /// catalog. With no plan and no instance name the last binding wins;
    /// bindings are appended in binding order, so the last one is the most
    /// recently bound. With constraints the bindings are scanned backward and
    /// the first satisfying binding wins; no satisfying binding means empty,
    /// with no fallback to the unfiltered last entry.
    pub fn find(&self, selector: &Selector) -> CredentialSet {
        let Some(wanted) = selector.name() else {
            return CredentialSet::new();
        };
        for (key, bindings) in &self.entries {
            if !key.starts_with(wanted) {
                continue;
            }
            let matched = if selector.plan().is_none() && selector.instance_name().is_none() {
                bindings.last()
            } else {
                bindings.iter().rev().find(|binding| binding.satisfies(selector))
            };
            return matched
                .map(|binding| binding.credentials.clone())
                .unwrap_or_default();
        }
        CredentialSet::new()
    }
}

/// Parse catalog JSON into its typed form.
///
/// The only fallible surface in the crate: callers that want to distinguish a
/// malformed catalog from an absent one can use this directly. The resolver
/// facade collapses failures into the canonical empty result.
pub fn parse_catalog(catalog_json: &str) -> Result<ServiceCatalog> {
    let value: Value =
        serde_json::from_str(catalog_json).context("catalog variable is not valid JSON")?;
    let Value::Object(services) = value else {
        bail!("catalog must be a JSON object keyed by service type");
    };
    let mut entries = Vec::with_capacity(services.len());
    for (key, bindings) in services {
        let bindings: Vec<ServiceBinding> = serde_json::from_value(bindings)
            .with_context(|| format!("bindings for service type '{key}' are malformed"))?;
        entries.push((key, bindings));
    }
    Ok(ServiceCatalog { entries })
}

/// Resolve a selector against raw catalog text, degrading to empty on any
/// parse failure.
pub fn lookup(catalog_json: &str, selector: &Selector) -> CredentialSet {
    match parse_catalog(catalog_json) {
        Ok(catalog) => catalog.find(selector),
        Err(_) => CredentialSet::new(),
    }
}

/// Highest-priority tier: consult the aggregated catalog variable.
pub struct CatalogResolver;

impl Resolver for CatalogResolver {
    fn resolve(&self, env: &EnvSnapshot, selector: &Selector) -> CredentialSet {
        match env.get(VCAP_SERVICES_VAR) {
            Some(raw) => lookup(raw, selector),
            None => CredentialSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> String {
        json!({
            "personality_insights": [
                {"plan": "not-a-plan"},
                {"credentials": {}, "plan": "beta"},
                {"credentials": {"username": "u3", "password": "p3"}, "plan": "standard"}
            ],
            "natural_language_classifier": [
                {"name": "NLC 1", "plan": "standard", "credentials": {"url": "one"}},
                {"name": "NLC 2", "plan": "standard", "credentials": {"url": "two"}}
            ]
        })
        .to_string()
    }

    #[test]
    fn last_binding_wins_without_constraints() {
        let creds = lookup(&fixture(), &Selector::service("personality_insights"));
        assert_eq!(creds.get("username").and_then(Value::as_str), Some("u3"));
    }

    #[test]
    fn key_prefix_match_is_case_sensitive_and_literal() {
        let creds = lookup(&fixture(), &Selector::service("personality"));
        assert_eq!(creds.get("username").and_then(Value::as_str), Some("u3"));
        assert!(lookup(&fixture(), &Selector::service("Personality")).is_empty());
        assert!(lookup(&fixture(), &Selector::service("foo")).is_empty());
    }

    #[test]
    fn plan_filter_scans_backward() {
        let standard = lookup(&fixture(), &Selector::service("personality").with_plan("standard"));
        assert_eq!(standard.get("password").and_then(Value::as_str), Some("p3"));
        // The beta binding exists but carries an empty credentials object;
        // selecting it yields empty, with no fallback to the last binding.
        assert!(lookup(&fixture(), &Selector::service("personality").with_plan("beta")).is_empty());
        assert!(lookup(&fixture(), &Selector::service("personality").with_plan("foo")).is_empty());
    }

    #[test]
    fn instance_name_filter_matches_exactly() {
        let first = lookup(
            &fixture(),
            &Selector::service("natural_language_classifier").with_instance("NLC 1"),
        );
        assert_eq!(first.get("url").and_then(Value::as_str), Some("one"));
        assert!(
            lookup(
                &fixture(),
                &Selector::service("natural_language_classifier").with_instance("NLC 3"),
            )
            .is_empty()
        );
    }

    #[test]
    fn plan_and_instance_must_both_match() {
        let both = lookup(
            &fixture(),
            &Selector::service("natural_language_classifier")
                .with_plan("standard")
                .with_instance("NLC 1"),
        );
        assert_eq!(both.get("url").and_then(Value::as_str), Some("one"));
        assert!(
            lookup(
                &fixture(),
                &Selector::service("natural_language_classifier")
                    .with_plan("foo")
                    .with_instance("NLC 1"),
            )
            .is_empty()
        );
    }

    #[test]
    fn backward_scan_prefers_the_last_matching_binding() {
        let latest = lookup(
            &fixture(),
            &Selector::service("natural_language_classifier").with_plan("standard"),
        );
        assert_eq!(latest.get("url").and_then(Value::as_str), Some("two"));
    }

    #[test]
    fn missing_credentials_field_reads_as_empty() {
        let creds = lookup(
            &fixture(),
            &Selector::service("personality").with_plan("not-a-plan"),
        );
        assert!(creds.is_empty());
    }

    #[test]
    fn first_matching_key_decides_even_when_empty() {
        let catalog = json!({
            "db_alpha": [],
            "db_beta": [{"credentials": {"url": "beta"}}]
        })
        .to_string();
        // "db_" matches db_alpha first; its empty binding list is final.
        assert!(lookup(&catalog, &Selector::service("db_")).is_empty());
    }

    #[test]
    fn malformed_catalog_degrades_to_empty() {
        assert!(lookup("Not JSON", &Selector::service("anything")).is_empty());
        assert!(lookup("[1, 2, 3]", &Selector::service("anything")).is_empty());
        assert!(lookup("{\"svc\": {\"not\": \"a list\"}}", &Selector::service("svc")).is_empty());
    }

    #[test]
    fn parse_catalog_reports_the_offending_key() {
        let err = parse_catalog("{\"svc\": 5}").expect_err("non-list bindings should fail");
        assert!(err.to_string().contains("svc"));
    }

    #[test]
    fn selector_without_name_never_matches_a_key() {
        let selector = Selector::new(None, Some("standard"), None);
        assert!(lookup(&fixture(), &selector).is_empty());
    }
}
