//! Embedding and links for licenses

use super::model::License;
use crate::core::error::{ProjectionError, RestResult};
use crate::core::hal::HalResource;
use crate::core::helper::RestHelper;
use crate::core::link::LinkBuilder;
use crate::core::paging::PagingAwareRestHelper;
use crate::core::service::EntityService;
use serde::Serialize;
use std::collections::BTreeSet;

/// Relation of embedded licenses
pub const LICENSES_RELATION: &str = "sw360:licenses";

/// Helper for [`License`] resources
///
/// Licenses have no field projection: asking for extra fields fails with
/// [`ProjectionError::NotImplemented`].
#[derive(Debug, Clone)]
pub struct LicenseHelper {
    links: LinkBuilder,
}

impl LicenseHelper {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }

    /// Embedded view of a license known only by id
    pub fn embedded_stub(&self, id: &str) -> License {
        License {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    /// Look up one license and embed it, or an id-only stub if the lookup fails
    pub async fn add_embedded_by_id<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        id: &str,
        service: &dyn EntityService<License>,
    ) -> RestResult<()> {
        let license = match service.get(id).await {
            Ok(license) => license,
            Err(e) => {
                tracing::warn!("Cannot load license '{}' for embedding: {}", id, e);
                self.embedded_stub(id)
            }
        };
        self.add_embedded(container, &license)
    }

    /// Embed every license id, degrading failed lookups to stubs
    pub async fn add_embedded_by_ids<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        ids: &BTreeSet<String>,
        service: &dyn EntityService<License>,
    ) -> RestResult<()> {
        for id in ids {
            self.add_embedded_by_id(container, id, service).await?;
        }
        Ok(())
    }
}

impl RestHelper<License> for LicenseHelper {
    fn link_builder(&self) -> &LinkBuilder {
        &self.links
    }

    fn embedded_resource_key(&self) -> &'static str {
        LICENSES_RELATION
    }

    fn embedded_fields(&self) -> &'static [&'static str] {
        &["id", "fullname"]
    }

    fn to_embedded_with_fields(&self, license: &License, fields: &[String]) -> RestResult<License> {
        if fields.is_empty() {
            return Ok(self.to_embedded(license));
        }
        Err(ProjectionError::NotImplemented {
            entity_type: "license".to_string(),
            operation: format!("fields={}", fields.join(",")),
        }
        .into())
    }
}

impl PagingAwareRestHelper<License> for LicenseHelper {
    fn sortable_fields(&self) -> &'static [&'static str] {
        &["id", "shortname", "fullname", "licenseType"]
    }
}
