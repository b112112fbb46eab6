//! Embedding, projection and links for components

use super::model::Component;
use crate::core::entity::Entity;
use crate::core::helper::{FieldAliases, RestHelper};
use crate::core::link::LinkBuilder;
use crate::core::paging::PagingAwareRestHelper;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Relation of embedded components
pub const COMPONENTS_RELATION: &str = "sw360:components";

/// Helper for [`Component`] resources
#[derive(Debug, Clone)]
pub struct ComponentHelper {
    links: LinkBuilder,
}

impl ComponentHelper {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }

    /// Copy every field set on `patch` onto `target`
    pub fn merge_update(&self, mut target: Component, patch: &Component) -> Component {
        target.merge_from(patch);
        target
    }
}

fn component_aliases() -> &'static FieldAliases {
    static ALIASES: OnceLock<FieldAliases> = OnceLock::new();
    ALIASES.get_or_init(|| HashMap::from([("vendors", "vendorNames")]))
}

impl RestHelper<Component> for ComponentHelper {
    fn link_builder(&self) -> &LinkBuilder {
        &self.links
    }

    fn embedded_resource_key(&self) -> &'static str {
        COMPONENTS_RELATION
    }

    fn embedded_fields(&self) -> &'static [&'static str] {
        &["id", "name", "componentType"]
    }

    fn field_aliases(&self) -> Option<&'static FieldAliases> {
        Some(component_aliases())
    }
}

impl PagingAwareRestHelper<Component> for ComponentHelper {}
