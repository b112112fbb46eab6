//! Embedding and links for projects

use super::model::Project;
use crate::core::error::RestResult;
use crate::core::hal::HalResource;
use crate::core::helper::RestHelper;
use crate::core::link::LinkBuilder;
use crate::core::paging::PagingAwareRestHelper;
use crate::core::service::EntityService;
use serde::Serialize;
use std::collections::BTreeSet;

/// Relation of embedded projects
pub const PROJECTS_RELATION: &str = "sw360:projects";

/// Helper for [`Project`] resources
#[derive(Debug, Clone)]
pub struct ProjectHelper {
    links: LinkBuilder,
}

impl ProjectHelper {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }

    /// Look up each project id and embed it; a failed lookup aborts
    pub async fn add_embedded_by_ids<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        ids: &BTreeSet<String>,
        service: &dyn EntityService<Project>,
    ) -> RestResult<()> {
        for id in ids {
            let project = service.get(id).await?;
            self.add_embedded(container, &project)?;
        }
        Ok(())
    }
}

impl RestHelper<Project> for ProjectHelper {
    fn link_builder(&self) -> &LinkBuilder {
        &self.links
    }

    fn embedded_resource_key(&self) -> &'static str {
        PROJECTS_RELATION
    }

    fn embedded_fields(&self) -> &'static [&'static str] {
        &["id", "name", "projectType", "version"]
    }
}

impl PagingAwareRestHelper<Project> for ProjectHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::ProjectType;
    use crate::storage::InMemoryEntityService;

    fn project() -> Project {
        Project {
            id: Some("p1".to_string()),
            entity_type: Some("project".to_string()),
            name: Some("Emerald Web".to_string()),
            version: Some("1.0.2".to_string()),
            project_type: Some(ProjectType::Product),
            business_unit: Some("SW360".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_embedded_view() {
        let helper = ProjectHelper::new(LinkBuilder::default());
        let json = serde_json::to_value(helper.to_embedded(&project())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "p1",
                "name": "Emerald Web",
                "version": "1.0.2",
                "projectType": "PRODUCT"
            })
        );
    }

    #[tokio::test]
    async fn test_embed_by_ids() {
        let helper = ProjectHelper::new(LinkBuilder::new("http://h", "/api"));
        let service = InMemoryEntityService::with_entities(vec![project()]).unwrap();
        let mut container = HalResource::new(serde_json::json!({"id": "r1"}));
        helper
            .add_embedded_by_ids(&mut container, &BTreeSet::from(["p1".to_string()]), &service)
            .await
            .unwrap();
        let json = serde_json::to_value(&container).unwrap();
        assert_eq!(
            json["_embedded"][PROJECTS_RELATION]["_links"]["self"]["href"],
            "http://h/api/projects/p1"
        );
    }
}
