//! Entity descriptor for Project

use super::handlers::{get_project, list_projects, search_projects_by_external_ids};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Project collection
pub struct ProjectDescriptor;

impl EntityDescriptor for ProjectDescriptor {
    fn entity_type(&self) -> &str {
        "project"
    }

    fn plural(&self) -> &str {
        "projects"
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/projects", get(list_projects))
            .route(
                "/projects/searchByExternalIds",
                get(search_projects_by_external_ids),
            )
            .route("/projects/{id}", get(get_project))
            .with_state(state)
    }
}
