//! Read-only snapshot of the process environment.
//!
//! Every public lookup captures a fresh snapshot, so a variable set between
//! calls is visible to the next call. Resolvers take the snapshot explicitly,
//! which lets tests substitute a fake environment instead of mutating real
//! process state.

use std::collections::BTreeMap;
use std::env;

/// Immutable name/value view of the environment at capture time.
///
/// Iteration is sorted by variable name, so "first match" scans are
/// deterministic regardless of how the host process populated the
/// environment.
#[derive(Clone, Debug, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit name/value pairs (test fixtures).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Exact lookup against the raw variable name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether a variable with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Iterate all variables in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
