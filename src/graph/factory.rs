//! Kind registries for tag-driven construction
//!
//! Deserializers rebuilding a typed hierarchy only know the tag written
//! next to each record. A registry maps such a tag to a payload
//! constructor. Each graph owns one registry per entity kind, seeded with
//! the base tag which builds the default payload.

use std::collections::HashMap;
use std::fmt;

/// Tag of the base node kind
pub const NODE_KIND: &str = "Node";

/// Tag of the base edge kind
pub const EDGE_KIND: &str = "Edge";

/// Tag of the base group kind
pub const GROUP_KIND: &str = "Group";

/// Boxed payload constructor
pub type Constructor<T> = Box<dyn Fn() -> T>;

pub struct KindRegistry<T> {
    base: &'static str,
    constructors: HashMap<String, Constructor<T>>,
}

impl<T: Default + 'static> KindRegistry<T> {
    /// Create a registry whose `base` tag builds `T::default()`
    pub fn new(base: &'static str) -> Self {
        let mut registry = KindRegistry {
            base,
            constructors: HashMap::new(),
        };
        registry.register(base, T::default);
        registry
    }
}

impl<T> KindRegistry<T> {
    /// Register a constructor for `tag`, replacing any previous one
    pub fn register<F>(&mut self, tag: impl Into<String>, constructor: F) -> bool
    where
        F: Fn() -> T + 'static,
    {
        self.constructors
            .insert(tag.into(), Box::new(constructor))
            .is_some()
    }

    /// Forget `tag`. The base tag cannot be removed.
    pub fn unregister(&mut self, tag: &str) -> bool {
        if tag == self.base {
            return false;
        }
        self.constructors.remove(tag).is_some()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Build a payload for `tag`, `None` when the tag is unknown
    pub fn create(&self, tag: &str) -> Option<T> {
        self.constructors.get(tag).map(|constructor| constructor())
    }

    pub fn base_kind(&self) -> &'static str {
        self.base
    }

    /// Registered tags, in no particular order
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<T> fmt::Debug for KindRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.kinds().collect();
        kinds.sort_unstable();
        f.debug_struct("KindRegistry")
            .field("base", &self.base)
            .field("kinds", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_kind_is_registered() {
        let registry: KindRegistry<u32> = KindRegistry::new(NODE_KIND);
        assert!(registry.contains(NODE_KIND));
        assert_eq!(registry.create(NODE_KIND), Some(0));
        assert_eq!(registry.base_kind(), NODE_KIND);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry: KindRegistry<String> = KindRegistry::new(NODE_KIND);
        assert!(!registry.register("Port", || "port".to_string()));
        assert_eq!(registry.create("Port"), Some("port".to_string()));

        // Re-registering replaces the constructor
        assert!(registry.register("Port", || "port-v2".to_string()));
        assert_eq!(registry.create("Port"), Some("port-v2".to_string()));
    }

    #[test]
    fn test_unknown_kind() {
        let registry: KindRegistry<u32> = KindRegistry::new(EDGE_KIND);
        assert_eq!(registry.create("Nope"), None);
    }

    #[test]
    fn test_unregister_keeps_base() {
        let mut registry: KindRegistry<u32> = KindRegistry::new(GROUP_KIND);
        registry.register("Swimlane", || 7);

        assert!(!registry.unregister(GROUP_KIND));
        assert!(registry.unregister("Swimlane"));
        assert!(!registry.contains("Swimlane"));
        assert!(registry.contains(GROUP_KIND));
    }
}
