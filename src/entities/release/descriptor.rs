//! Entity descriptor for Release

use super::handlers::{
    create_release, delete_releases, get_release, list_release_attachments, list_releases,
    patch_release, search_releases_by_external_ids,
};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Release collection
pub struct ReleaseDescriptor;

impl EntityDescriptor for ReleaseDescriptor {
    fn entity_type(&self) -> &str {
        "release"
    }

    fn plural(&self) -> &str {
        "releases"
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/releases", get(list_releases).post(create_release))
            .route(
                "/releases/searchByExternalIds",
                get(search_releases_by_external_ids),
            )
            .route(
                "/releases/{id}",
                get(get_release)
                    .patch(patch_release)
                    .delete(delete_releases),
            )
            .route("/releases/{id}/attachments", get(list_release_attachments))
            .with_state(state)
    }
}
