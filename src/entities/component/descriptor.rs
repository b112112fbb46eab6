//! Entity descriptor for Component

use super::handlers::{
    create_component, get_component, list_components, patch_component,
    search_components_by_external_ids,
};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Component collection
pub struct ComponentDescriptor;

impl EntityDescriptor for ComponentDescriptor {
    fn entity_type(&self) -> &str {
        "component"
    }

    fn plural(&self) -> &str {
        "components"
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/components", get(list_components).post(create_component))
            .route(
                "/components/searchByExternalIds",
                get(search_components_by_external_ids),
            )
            .route("/components/{id}", get(get_component).patch(patch_component))
            .with_state(state)
    }
}
