//! Lookup request passed through the resolver chain.

/// A loosely-specified service identifier: name prefix, optional plan,
/// optional instance name.
///
/// Empty strings count as absent, matching how callers historically passed
/// `''` for fields they did not care about. A selector with every field
/// absent is a no-op request; the resolver chain returns empty without
/// touching any source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    name: Option<String>,
    plan: Option<String>,
    instance_name: Option<String>,
}

impl Selector {
    /// Build a selector from optional raw fields, dropping empty strings.
    pub fn new(name: Option<&str>, plan: Option<&str>, instance_name: Option<&str>) -> Self {
        Self {
            name: non_empty(name),
            plan: non_empty(plan),
            instance_name: non_empty(instance_name),
        }
    }

    /// Selector matching any instance of a service whose key starts with `name`.
    pub fn service(name: &str) -> Self {
        Self::new(Some(name), None, None)
    }

    /// Restrict the selector to bindings on a specific plan.
    pub fn with_plan(mut self, plan: &str) -> Self {
        self.plan = non_empty(Some(plan));
        self
    }

    /// Restrict the selector to a specific instance name.
    pub fn with_instance(mut self, instance_name: &str) -> Self {
        self.instance_name = non_empty(Some(instance_name));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    pub fn instance_name(&self) -> Option<&str> {
        self.instance_name.as_deref()
    }

    /// True when no field is set; such a request must resolve to empty
    /// without reading any source.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.plan.is_none() && self.instance_name.is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
