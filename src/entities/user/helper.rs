//! Embedding and links for users

use super::model::User;
use crate::core::error::RestResult;
use crate::core::hal::HalResource;
use crate::core::helper::RestHelper;
use crate::core::link::LinkBuilder;
use crate::core::paging::PagingAwareRestHelper;
use crate::core::service::EntityService;
use serde::Serialize;
use std::collections::BTreeSet;

/// Relation of embedded users
pub const USERS_RELATION: &str = "sw360:users";

/// Relation of the moderators embedded in components, releases and projects
pub const MODERATORS_RELATION: &str = "sw360:moderators";

/// Helper for [`User`] resources
///
/// Requested `fields` extend the id/email view; the full record is only
/// returned by the single-user endpoint.
#[derive(Debug, Clone)]
pub struct UserHelper {
    links: LinkBuilder,
}

impl UserHelper {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }

    /// Embedded view of a user known only by email
    pub fn embedded_stub(&self, email: &str) -> User {
        User {
            email: Some(email.to_string()),
            ..Default::default()
        }
    }

    /// Look up each email and embed the user under `relation`
    ///
    /// A user that cannot be found is embedded as an email-only stub.
    pub async fn add_embedded_by_emails<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        emails: &BTreeSet<String>,
        service: &dyn EntityService<User>,
        relation: &str,
    ) -> RestResult<()> {
        for email in emails {
            let user = match find_by_email(service, email).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    tracing::warn!("No user with email '{}', embedding stub", email);
                    self.embedded_stub(email)
                }
                Err(e) => {
                    tracing::warn!("Cannot look up user '{}': {}, embedding stub", email, e);
                    self.embedded_stub(email)
                }
            };
            self.add_embedded_as(container, &user, relation)?;
        }
        Ok(())
    }

    /// Embed moderators under `sw360:moderators`
    pub async fn add_embedded_moderators<U: Serialize>(
        &self,
        container: &mut HalResource<U>,
        emails: &BTreeSet<String>,
        service: &dyn EntityService<User>,
    ) -> RestResult<()> {
        self.add_embedded_by_emails(container, emails, service, MODERATORS_RELATION)
            .await
    }
}

async fn find_by_email(service: &dyn EntityService<User>, email: &str) -> RestResult<Option<User>> {
    let candidates = service.search("email", email).await?;
    Ok(candidates.into_iter().find(|user| {
        user.email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(email))
    }))
}

impl RestHelper<User> for UserHelper {
    fn link_builder(&self) -> &LinkBuilder {
        &self.links
    }

    fn embedded_resource_key(&self) -> &'static str {
        USERS_RELATION
    }

    fn embedded_fields(&self) -> &'static [&'static str] {
        &["id", "email"]
    }
}

impl PagingAwareRestHelper<User> for UserHelper {
    fn sortable_fields(&self) -> &'static [&'static str] {
        &["email", "fullname", "givenname", "lastname", "department"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryEntityService;

    fn helper() -> UserHelper {
        UserHelper::new(LinkBuilder::new("http://h", "/api"))
    }

    fn users() -> InMemoryEntityService<User> {
        InMemoryEntityService::with_entities(vec![User {
            id: Some("u1".to_string()),
            email: Some("admin@sw360.org".to_string()),
            fullname: Some("Admin".to_string()),
            department: Some("DEPT".to_string()),
            ..Default::default()
        }])
        .unwrap()
    }

    #[tokio::test]
    async fn test_embedded_user_keeps_id_and_email() {
        let service = users();
        let user = service.get("u1").await.unwrap();
        let embedded = helper().to_embedded(&user);
        assert_eq!(embedded.id.as_deref(), Some("u1"));
        assert_eq!(embedded.email.as_deref(), Some("admin@sw360.org"));
        assert!(embedded.fullname.is_none());
    }

    #[tokio::test]
    async fn test_projection_extends_default_view() {
        let user = users().get("u1").await.unwrap();
        let fields = vec!["department".to_string()];
        let embedded = helper().to_embedded_with_fields(&user, &fields).unwrap();
        assert_eq!(embedded.email.as_deref(), Some("admin@sw360.org"));
        assert_eq!(embedded.department.as_deref(), Some("DEPT"));
        assert!(embedded.fullname.is_none());
    }

    #[tokio::test]
    async fn test_moderators_found_and_stubbed() {
        let service = users();
        let mut container = HalResource::new(serde_json::json!({"id": "r1"}));
        let emails = BTreeSet::from([
            "admin@sw360.org".to_string(),
            "ghost@sw360.org".to_string(),
        ]);
        helper()
            .add_embedded_moderators(&mut container, &emails, &service)
            .await
            .unwrap();

        let json = serde_json::to_value(&container).unwrap();
        let moderators = json["_embedded"][MODERATORS_RELATION].as_array().unwrap();
        assert_eq!(moderators.len(), 2);
        assert_eq!(moderators[0]["id"], "u1");
        assert_eq!(moderators[0]["_links"]["self"]["href"], "http://h/api/users/u1");
        assert_eq!(moderators[1]["email"], "ghost@sw360.org");
        assert!(moderators[1].get("id").is_none());
        assert!(moderators[1].get("_links").is_none());
    }

    #[tokio::test]
    async fn test_unavailable_user_service_degrades_to_stub() {
        let service = users();
        service.set_available(false);
        let mut container = HalResource::new(serde_json::json!({}));
        let emails = BTreeSet::from(["admin@sw360.org".to_string()]);
        helper()
            .add_embedded_by_emails(&mut container, &emails, &service, USERS_RELATION)
            .await
            .unwrap();
        let embedded = container.embedded(USERS_RELATION).unwrap();
        assert_eq!(embedded.as_vec()[0]["email"], "admin@sw360.org");
    }
}
