//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`:
//! root health probes, then the API index and every registered collection
//! under the configured prefix.

use super::super::host::ServerHost;
use crate::server::router::{build_api_routes, health_check};
use anyhow::Result;
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host containing all handler state
    /// * `custom_routes` - Additional routes merged at the root
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let state = &host.state;
        let collections = host.entity_registry.collections();
        let prefix = state.links.api_prefix();

        let api_routes = build_api_routes(&state.links, &collections)
            .merge(host.entity_registry.build_routes(state));

        let mut app = if prefix.is_empty() {
            // The API health route already answers /health at the root
            Router::new().route("/healthz", get(health_check)).merge(api_routes)
        } else {
            tracing::debug!("Mounting {} collections under {}", collections.len(), prefix);
            Self::health_routes().nest(prefix, api_routes)
        };

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/healthz", get(health_check))
    }
}
