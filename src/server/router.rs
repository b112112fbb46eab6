//! API-level routes that do not belong to a single collection

use crate::core::hal::HalResource;
use crate::core::link::{HalLink, LinkBuilder};
use axum::{Json, Router, routing::get};
use serde_json::{Map, Value, json};

/// Name reported by the health endpoints
pub const SERVICE_NAME: &str = "sw360-rest";

/// Link relation of a collection in the API index, e.g. `sw360:components`
pub fn collection_relation(plural: &str) -> String {
    format!("sw360:{}", plural)
}

/// The API index: a `self` link plus one link per collection
pub fn index_resource(links: &LinkBuilder, collections: &[&str]) -> HalResource<Map<String, Value>> {
    let mut index = HalResource::new(Map::new())
        .with_link(HalLink::self_link(links.absolute(links.api_prefix())));
    for plural in collections {
        index.add_link(HalLink::new(
            collection_relation(plural),
            links.collection_url(plural),
        ));
    }
    index
}

/// Build the index and health routes served under the API prefix
///
/// - GET / - links to every registered collection
/// - GET /health - liveness probe
pub fn build_api_routes(links: &LinkBuilder, collections: &[&str]) -> Router {
    let index = index_resource(links, collections);
    Router::new()
        .route("/", get(move || async move { Json(index) }))
        .route("/health", get(health_check))
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_links_every_collection() {
        let links = LinkBuilder::new("http://localhost:8080", "/api");
        let index = index_resource(&links, &["components", "releases"]);
        let json = serde_json::to_value(&index).unwrap();

        assert_eq!(json["_links"]["self"]["href"], "http://localhost:8080/api");
        assert_eq!(
            json["_links"]["sw360:components"]["href"],
            "http://localhost:8080/api/components"
        );
        assert_eq!(
            json["_links"]["sw360:releases"]["href"],
            "http://localhost:8080/api/releases"
        );
    }

    #[tokio::test]
    async fn test_health_check_body() {
        let Json(body) = health_check().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], SERVICE_NAME);
    }
}
