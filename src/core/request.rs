//! The originating request as seen by resource assembly
//!
//! Collection responses link back to the request that produced them and, when
//! paging, to neighbouring pages of the same request. [`RequestContext`] keeps
//! the absolute URL and the decoded query parameters needed for that.

use crate::core::error::{RequestError, RestResult};
use crate::core::link::LinkBuilder;
use axum::extract::Query;
use axum::http::Uri;
use axum::http::uri::InvalidUri;

/// Absolute URL and decoded query parameters of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    path_href: String,
    query: Option<String>,
    params: Vec<(String, String)>,
}

impl RequestContext {
    /// Build a context from a request path and raw query string
    pub fn new(links: &LinkBuilder, path: &str, query: Option<&str>) -> RestResult<Self> {
        let raw = match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}?{}", path, query),
            None => path.to_string(),
        };
        let uri: Uri = raw.parse().map_err(|e: InvalidUri| {
            RequestError::InvalidUri {
                uri: raw.clone(),
                message: e.to_string(),
            }
        })?;
        Self::from_uri(links, &uri)
    }

    /// Build a context from the request URI
    ///
    /// Query parameters are decoded by axum's `Query` extractor, keeping
    /// repeated keys in request order.
    pub fn from_uri(links: &LinkBuilder, uri: &Uri) -> RestResult<Self> {
        let Query(params) = Query::<Vec<(String, String)>>::try_from_uri(uri).map_err(|e| {
            RequestError::InvalidUri {
                uri: uri.to_string(),
                message: e.body_text(),
            }
        })?;
        Ok(Self {
            path_href: links.absolute(uri.path()),
            query: uri.query().filter(|q| !q.is_empty()).map(str::to_string),
            params,
        })
    }

    /// Absolute URL of the request, query included
    pub fn self_href(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path_href, query),
            None => self.path_href.clone(),
        }
    }

    /// Absolute URL of the request without its query string
    pub fn path_href(&self) -> &str {
        &self.path_href
    }

    /// All decoded query parameters in request order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// First value of a query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of a (possibly repeated) query parameter
    pub fn param_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the query string names this parameter at all
    pub fn has_param(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    /// URL of this request with the `replaced` parameters removed and the
    /// `appended` pairs added at the end
    pub fn href_with(&self, replaced: &[&str], appended: &[(&str, String)]) -> String {
        let pairs: Vec<String> = self
            .params
            .iter()
            .filter(|(k, _)| !replaced.contains(&k.as_str()))
            .map(|(k, v)| encode_pair(k, v))
            .chain(appended.iter().map(|(k, v)| encode_pair(k, v)))
            .collect();

        if pairs.is_empty() {
            self.path_href.clone()
        } else {
            format!("{}?{}", self.path_href, pairs.join("&"))
        }
    }
}

// Commas are legal in a query and keep `sort=name,desc` readable
fn encode_pair(key: &str, value: &str) -> String {
    format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(value).replace("%2C", ",")
    )
}
