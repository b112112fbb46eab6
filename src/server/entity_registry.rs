//! Entity registry for managing resource descriptors and their routes

use crate::server::host::AppState;
use axum::Router;
use indexmap::IndexMap;

/// Trait that describes how to build routes for a resource collection
///
/// Each exposed entity (component, release, project, ...) implements this
/// trait to provide its routes. Paths are relative to the API prefix.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "component")
    fn entity_type(&self) -> &str;

    /// The plural form used in URLs (e.g., "components")
    fn plural(&self) -> &str;

    /// Build the routes of this collection
    fn build_routes(&self, state: AppState) -> Router;
}

/// Registry of every exposed resource collection, in registration order
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// Registering the same entity type twice replaces the first descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered routes
    pub fn build_routes(&self, state: &AppState) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(state.clone()));
        }

        router
    }

    /// Get all registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// Plural collection names, in registration order
    pub fn collections(&self) -> Vec<&str> {
        self.descriptors.values().map(|d| d.plural()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal mock EntityDescriptor for testing
    struct MockDescriptor {
        entity_type: String,
        plural: String,
    }

    impl MockDescriptor {
        fn new(entity_type: &str, plural: &str) -> Self {
            Self {
                entity_type: entity_type.to_string(),
                plural: plural.to_string(),
            }
        }
    }

    impl EntityDescriptor for MockDescriptor {
        fn entity_type(&self) -> &str {
            &self.entity_type
        }

        fn plural(&self) -> &str {
            &self.plural
        }

        fn build_routes(&self, _state: AppState) -> Router {
            Router::new()
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = EntityRegistry::new();
        assert!(registry.entity_types().is_empty());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("release", "releases")));
        registry.register(Box::new(MockDescriptor::new("component", "components")));
        assert_eq!(registry.entity_types(), vec!["release", "component"]);
        assert_eq!(registry.collections(), vec!["releases", "components"]);
    }

    #[test]
    fn test_register_same_type_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(MockDescriptor::new("vendor", "vendors")));
        registry.register(Box::new(MockDescriptor::new("vendor", "suppliers")));
        assert_eq!(registry.collections(), vec!["suppliers"]);
    }
}
