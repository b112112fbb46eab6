//! Entity descriptor for License

use super::handlers::{create_license, get_license, list_licenses};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Descriptor for the License collection
pub struct LicenseDescriptor;

impl EntityDescriptor for LicenseDescriptor {
    fn entity_type(&self) -> &str {
        "license"
    }

    fn plural(&self) -> &str {
        "licenses"
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/licenses", get(list_licenses).post(create_license))
            .route("/licenses/{id}", get(get_license))
            .with_state(state)
    }
}
