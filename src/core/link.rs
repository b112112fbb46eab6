//! Hypermedia links and URL construction

use serde::{Deserialize, Serialize};

/// Relation name of a resource's own link
pub const REL_SELF: &str = "self";
pub const REL_FIRST: &str = "first";
pub const REL_PREV: &str = "prev";
pub const REL_NEXT: &str = "next";
pub const REL_LAST: &str = "last";

/// A single HAL link: `{"href": "..."}` stored under its relation name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalLink {
    /// Relation of this link to the resource carrying it (not serialized;
    /// the relation is the key in `_links`)
    #[serde(skip)]
    pub rel: String,

    /// Target URI
    pub href: String,
}

impl HalLink {
    /// Create a link with an explicit relation
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// Create a `self` link
    pub fn self_link(href: impl Into<String>) -> Self {
        Self::new(REL_SELF, href)
    }

    /// The same target under a different relation
    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = rel.into();
        self
    }
}

/// Builds absolute URLs for API resources
///
/// Every resource URL has the shape `<base_url><api_prefix>/<resource>/<id>`.
/// The builder is pure string assembly; it performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
    api_prefix: String,
}

impl LinkBuilder {
    /// Create a builder from a base URL (e.g. `http://localhost:8080`) and an
    /// API prefix (e.g. `/api`). Trailing slashes are ignored.
    pub fn new(base_url: impl Into<String>, api_prefix: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_prefix = api_prefix.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_prefix,
        }
    }

    /// The base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API prefix without a trailing slash
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    /// URL of a collection, e.g. `http://host/api/components`
    pub fn collection_url(&self, resource: &str) -> String {
        format!("{}{}/{}", self.base_url, self.api_prefix, resource)
    }

    /// URL of a single resource, e.g. `http://host/api/components/123`
    pub fn resource_url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(resource), id)
    }

    /// `self` link to a single resource
    pub fn self_link(&self, resource: &str, id: &str) -> HalLink {
        HalLink::self_link(self.resource_url(resource, id))
    }

    /// Absolute URL for a request path and optional query string
    pub fn absolute(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new("http://localhost:8080", "/api")
    }
}

/// Extract the trailing id from a resource URI
///
/// Accepts plain ids as well, so `"http://host/api/vendors/v1"`, `"/vendors/v1"`
/// and `"v1"` all yield `"v1"`. Query strings and fragments are ignored.
pub fn id_from_uri(uri: &str) -> Option<&str> {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let id = path.trim_end_matches('/').rsplit('/').next()?;
    (!id.is_empty()).then_some(id)
}
