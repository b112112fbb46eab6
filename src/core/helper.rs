//! Per-type embedding, projection and link construction
//!
//! Every exposed entity type has a helper implementing [`RestHelper`]. The
//! helper knows:
//! - which fields survive in the reduced "embedded" view of a record
//! - which public field names are aliases of backend field names
//! - how to build the record's `self` link
//!
//! From those three facts the trait derives projection, embedding and
//! non-paged collection assembly.

use crate::core::entity::Entity;
use crate::core::error::RestResult;
use crate::core::hal::{CollectionResource, HalResource};
use crate::core::link::{HalLink, LinkBuilder};
use crate::core::request::RequestContext;
use serde::Serialize;
use std::collections::HashMap;

/// Static table of public field name → backend field name
pub type FieldAliases = HashMap<&'static str, &'static str>;

/// Embedding, projection and links for one entity type
pub trait RestHelper<T: Entity>: Send + Sync {
    /// Builder for absolute resource URLs
    fn link_builder(&self) -> &LinkBuilder;

    /// Relation under which records of this type are embedded,
    /// e.g. `"sw360:components"`
    fn embedded_resource_key(&self) -> &'static str;

    /// Backend fields kept in the default embedded view
    fn embedded_fields(&self) -> &'static [&'static str];

    /// Public aliases for backend field names
    fn field_aliases(&self) -> Option<&'static FieldAliases> {
        None
    }

    /// Resolve a public field name to its backend name
    fn backend_field_name<'a>(&self, name: &'a str) -> &'a str {
        self.field_aliases()
            .and_then(|aliases| aliases.get(name).copied())
            .unwrap_or(name)
    }

    /// Reduced copy of `entity` holding only [`embedded_fields`](Self::embedded_fields)
    ///
    /// The `type` field is always cleared. The input is never modified.
    fn to_embedded(&self, entity: &T) -> T {
        let mut embedded = T::default();
        for field in self.embedded_fields() {
            embedded.copy_field_from(entity, field);
        }
        embedded.clear_field("type");
        embedded
    }

    /// Default embedded view extended with the requested fields
    ///
    /// Requested names go through the alias table first. Names that are not
    /// fields of `T` are dropped. With no requested fields the result equals
    /// [`to_embedded`](Self::to_embedded).
    fn to_embedded_with_fields(&self, entity: &T, fields: &[String]) -> RestResult<T> {
        let mut embedded = self.to_embedded(entity);
        for requested in fields {
            let backend = self.backend_field_name(requested);
            if !embedded.copy_field_from(entity, backend) {
                tracing::trace!(
                    "Dropping unknown field '{}' from {} projection",
                    requested,
                    T::resource_name_singular()
                );
            }
        }
        Ok(embedded)
    }

    /// Project every entity with the same field list
    fn to_embedded_all(&self, entities: &[T], fields: &[String]) -> RestResult<Vec<T>> {
        entities
            .iter()
            .map(|entity| self.to_embedded_with_fields(entity, fields))
            .collect()
    }

    /// Identifier used in the `self` link
    fn link_id<'a>(&self, entity: &'a T) -> &'a str {
        entity.id().unwrap_or_default()
    }

    /// `self` link of `entity`
    fn self_link(&self, entity: &T) -> HalLink {
        self.self_link_for_id(self.link_id(entity))
    }

    /// `self` link for a bare identifier
    fn self_link_for_id(&self, id: &str) -> HalLink {
        self.link_builder().self_link(T::resource_name(), id)
    }

    /// Embed the default view of `entity` under this type's relation
    fn add_embedded<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        entity: &T,
    ) -> RestResult<()> {
        self.add_embedded_as(container, entity, self.embedded_resource_key())
    }

    /// Embed the default view of `entity` under an explicit relation
    fn add_embedded_as<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        entity: &T,
        relation: &str,
    ) -> RestResult<()> {
        let mut resource = HalResource::new(self.to_embedded(entity));
        // Stubs without an identifier have no resource to point at
        if !self.link_id(entity).is_empty() {
            resource.add_link(self.self_link(entity));
        }
        container.add_embedded_resource(relation, &resource)
    }

    /// Embed every entity under this type's relation
    fn add_embedded_all<'a, U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        entities: impl IntoIterator<Item = &'a T>,
    ) -> RestResult<()> {
        for entity in entities {
            self.add_embedded(container, entity)?;
        }
        Ok(())
    }

    /// Projected resource with its `self` link
    fn to_resource(&self, entity: &T, fields: &[String]) -> RestResult<HalResource<T>> {
        let content = self.to_embedded_with_fields(entity, fields)?;
        Ok(HalResource::new(content).with_link(self.self_link(entity)))
    }

    /// Full (unprojected) resource with its `self` link
    fn to_full_resource(&self, entity: T) -> HalResource<T> {
        let link = self.self_link(&entity);
        HalResource::new(entity).with_link(link)
    }

    /// Non-paged collection of projected resources
    fn build_response(
        &self,
        entities: &[T],
        fields: &[String],
        request: &RequestContext,
    ) -> RestResult<CollectionResource<T>> {
        let resources = entities
            .iter()
            .map(|entity| self.to_resource(entity, fields))
            .collect::<RestResult<Vec<_>>>()?;
        Ok(CollectionResource::new(
            self.embedded_resource_key(),
            resources,
            request.self_href(),
        ))
    }
}
