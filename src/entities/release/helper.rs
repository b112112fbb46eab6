//! Embedding, projection and links for releases

use super::model::Release;
use crate::core::entity::Entity;
use crate::core::error::RestResult;
use crate::core::hal::HalResource;
use crate::core::helper::{FieldAliases, RestHelper};
use crate::core::link::LinkBuilder;
use crate::core::paging::PagingAwareRestHelper;
use crate::core::service::EntityService;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Relation of embedded releases
pub const RELEASES_RELATION: &str = "sw360:releases";

/// Helper for [`Release`] resources
#[derive(Debug, Clone)]
pub struct ReleaseHelper {
    links: LinkBuilder,
}

impl ReleaseHelper {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }

    /// Copy every field set on `patch` onto `target`
    pub fn merge_update(&self, mut target: Release, patch: &Release) -> Release {
        target.merge_from(patch);
        target
    }

    /// Look up each release id and embed it; a failed lookup aborts
    pub async fn add_embedded_by_ids<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        ids: &BTreeSet<String>,
        service: &dyn EntityService<Release>,
    ) -> RestResult<()> {
        for id in ids {
            let release = service.get(id).await?;
            self.add_embedded(container, &release)?;
        }
        Ok(())
    }
}

fn release_aliases() -> &'static FieldAliases {
    static ALIASES: OnceLock<FieldAliases> = OnceLock::new();
    ALIASES.get_or_init(|| HashMap::from([("cpeId", "cpeid")]))
}

impl RestHelper<Release> for ReleaseHelper {
    fn link_builder(&self) -> &LinkBuilder {
        &self.links
    }

    fn embedded_resource_key(&self) -> &'static str {
        RELEASES_RELATION
    }

    fn embedded_fields(&self) -> &'static [&'static str] {
        &["id", "name", "version"]
    }

    fn field_aliases(&self) -> Option<&'static FieldAliases> {
        Some(release_aliases())
    }
}

impl PagingAwareRestHelper<Release> for ReleaseHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryEntityService;

    fn helper() -> ReleaseHelper {
        ReleaseHelper::new(LinkBuilder::new("http://h", "/api"))
    }

    fn release(id: &str, version: &str) -> Release {
        Release {
            id: Some(id.to_string()),
            name: Some("OpenSSL".to_string()),
            version: Some(version.to_string()),
            cpeid: Some(format!("cpe:2.3:a:openssl:openssl:{}", version)),
            component_id: Some("c1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_cpe_alias() {
        let embedded = helper()
            .to_embedded_with_fields(&release("r1", "1.1.1"), &["cpeId".to_string()])
            .unwrap();
        assert_eq!(embedded.cpeid.as_deref(), Some("cpe:2.3:a:openssl:openssl:1.1.1"));
        assert!(embedded.component_id.is_none());
    }

    #[tokio::test]
    async fn test_embed_by_ids() {
        let service =
            InMemoryEntityService::with_entities(vec![release("r1", "1.0"), release("r2", "2.0")])
                .unwrap();
        let mut container = HalResource::new(serde_json::json!({"id": "c1"}));
        let ids = BTreeSet::from(["r1".to_string(), "r2".to_string()]);
        helper()
            .add_embedded_by_ids(&mut container, &ids, &service)
            .await
            .unwrap();
        assert_eq!(container.embedded(RELEASES_RELATION).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_embed_by_ids_propagates_missing_release() {
        let service = InMemoryEntityService::<Release>::new();
        let mut container = HalResource::new(serde_json::json!({}));
        let ids = BTreeSet::from(["nope".to_string()]);
        let err = helper()
            .add_embedded_by_ids(&mut container, &ids, &service)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
