//! Entity descriptor for User

use super::handlers::{get_user, list_users};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::host::AppState;
use axum::{Router, routing::get};

/// Descriptor for the User collection
pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn build_routes(&self, state: AppState) -> Router {
        Router::new()
            .route("/users", get(list_users))
            .route("/users/{id}", get(get_user))
            .with_state(state)
    }
}
