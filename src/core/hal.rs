//! HAL resource envelopes
//!
//! A [`HalResource`] renders its content's fields at the top level, followed
//! by `_links` and `_embedded`:
//!
//! ```json
//! {
//!   "id": "r1",
//!   "name": "openssl",
//!   "_links": { "self": { "href": "http://localhost:8080/api/releases/r1" } },
//!   "_embedded": { "sw360:licenses": [ { "id": "MIT", "_links": { ... } } ] }
//! }
//! ```
//!
//! A [`CollectionResource`] wraps a list of resources under a single relation,
//! plus paging metadata when the list is one page of a larger result.

use crate::core::error::{ProjectionError, RestResult};
use crate::core::link::{HalLink, REL_SELF};
use crate::core::pagination::PageMetadata;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Links of a resource keyed by relation, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Links(IndexMap<String, HalLink>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link, replacing any previous link with the same relation
    pub fn add(&mut self, link: HalLink) {
        self.0.insert(link.rel.clone(), link);
    }

    pub fn get(&self, rel: &str) -> Option<&HalLink> {
        self.0.get(rel)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    /// Relations present, in insertion order
    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One nested resource, or several under the same relation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Embedded {
    One(Value),
    Many(Vec<Value>),
}

impl Embedded {
    pub fn len(&self) -> usize {
        match self {
            Embedded::One(_) => 1,
            Embedded::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All nested resources as a slice-like list
    pub fn as_vec(&self) -> Vec<&Value> {
        match self {
            Embedded::One(v) => vec![v],
            Embedded::Many(items) => items.iter().collect(),
        }
    }
}

/// A single resource: content, links, and nested resources
#[derive(Debug, Clone, Serialize)]
pub struct HalResource<T> {
    #[serde(flatten)]
    pub content: T,

    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,

    #[serde(rename = "_embedded", skip_serializing_if = "IndexMap::is_empty")]
    pub embedded: IndexMap<String, Embedded>,
}

impl<T: Serialize> HalResource<T> {
    pub fn new(content: T) -> Self {
        Self {
            content,
            links: Links::new(),
            embedded: IndexMap::new(),
        }
    }

    /// Add a link to this resource
    pub fn add_link(&mut self, link: HalLink) {
        self.links.add(link);
    }

    /// Builder form of [`add_link`](Self::add_link)
    pub fn with_link(mut self, link: HalLink) -> Self {
        self.add_link(link);
        self
    }

    /// Nest another resource under `relation`
    ///
    /// The first resource under a relation is stored as a single object; a
    /// second one turns the entry into an array.
    pub fn add_embedded_resource<U: Serialize>(
        &mut self,
        relation: &str,
        resource: &HalResource<U>,
    ) -> RestResult<()> {
        let value = serde_json::to_value(resource).map_err(|e| {
            ProjectionError::Serialization {
                entity_type: relation.to_string(),
                message: e.to_string(),
            }
        })?;

        match self.embedded.get_mut(relation) {
            None => {
                self.embedded
                    .insert(relation.to_string(), Embedded::One(value));
            }
            Some(existing) => {
                let previous = std::mem::replace(existing, Embedded::Many(Vec::new()));
                *existing = match previous {
                    Embedded::One(first) => Embedded::Many(vec![first, value]),
                    Embedded::Many(mut items) => {
                        items.push(value);
                        Embedded::Many(items)
                    }
                };
            }
        }
        Ok(())
    }

    /// Nested resources under `relation`
    pub fn embedded(&self, relation: &str) -> Option<&Embedded> {
        self.embedded.get(relation)
    }

    /// The `self` link, if any
    pub fn self_link(&self) -> Option<&HalLink> {
        self.links.get(REL_SELF)
    }
}

/// A list of resources under one relation, with optional paging metadata
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResource<T> {
    #[serde(rename = "_embedded")]
    pub embedded: IndexMap<String, Vec<HalResource<T>>>,

    #[serde(rename = "_links")]
    pub links: Links,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageMetadata>,
}

impl<T: Serialize> CollectionResource<T> {
    /// Wrap `resources` under `relation` with a `self` link
    pub fn new(relation: &str, resources: Vec<HalResource<T>>, self_href: String) -> Self {
        let mut embedded = IndexMap::new();
        embedded.insert(relation.to_string(), resources);
        let mut links = Links::new();
        links.add(HalLink::self_link(self_href));
        Self {
            embedded,
            links,
            page: None,
        }
    }

    /// Resources under `relation`, empty if the relation is absent
    pub fn resources(&self, relation: &str) -> &[HalResource<T>] {
        self.embedded
            .get(relation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of resources across relations
    pub fn len(&self) -> usize {
        self.embedded.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
