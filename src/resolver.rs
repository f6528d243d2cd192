//! Pluggable display-name resolution.
//!
//! Some source tables carry no compound names. Rather than a hard dependency
//! on an external lookup service, name resolution is a trait with a no-op
//! default; resolution failure never blocks the pipeline.

use std::collections::HashMap;

/// Sentinel used when no display name can be resolved.
pub const NAME_UNAVAILABLE: &str = "name unavailable";

/// External collaborator capable of naming a structure.
pub trait NameResolver {
    /// Best-effort display name for a structural notation, `None` when the
    /// resolver has no answer.
    fn resolve(&self, notation: &str) -> Option<String>;
}

/// Default resolver: never knows a name.
#[derive(Debug, Default)]
pub struct NullResolver;

impl NameResolver for NullResolver {
    fn resolve(&self, _notation: &str) -> Option<String> {
        None
    }
}

/// Table-backed resolver, keyed by notation string. Useful for tests and for
/// datasets shipped with a side table of names.
#[derive(Debug, Default)]
pub struct TableResolver {
    names: HashMap<String, String>,
}

impl TableResolver {
    pub fn new(names: HashMap<String, String>) -> Self {
        TableResolver { names }
    }
}

impl NameResolver for TableResolver {
    fn resolve(&self, notation: &str) -> Option<String> {
        self.names.get(notation).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_resolver_resolves_nothing() {
        assert!(NullResolver.resolve("CCO").is_none());
    }

    #[test]
    fn table_resolver_hits_and_misses() {
        let mut names = HashMap::new();
        names.insert("CCO".to_string(), "ethanol".to_string());
        let resolver = TableResolver::new(names);
        assert_eq!(resolver.resolve("CCO").as_deref(), Some("ethanol"));
        assert!(resolver.resolve("CCC").is_none());
    }
}
