//! Embedding and links for attachments

use super::model::Attachment;
use crate::core::entity::Entity;
use crate::core::helper::RestHelper;
use crate::core::link::LinkBuilder;

/// Relation of embedded attachments
pub const ATTACHMENTS_RELATION: &str = "sw360:attachments";

/// Audit fields stripped from embedded attachments
const AUDIT_FIELDS: &[&str] = &[
    "createdTeam",
    "createdComment",
    "createdOn",
    "createdBy",
    "checkedBy",
    "checkedOn",
    "checkedTeam",
    "checkedComment",
    "checkStatus",
];

/// Helper for [`Attachment`] resources
///
/// Attachments are addressed by their content id rather than their record id.
#[derive(Debug, Clone)]
pub struct AttachmentHelper {
    links: LinkBuilder,
}

impl AttachmentHelper {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }
}

impl RestHelper<Attachment> for AttachmentHelper {
    fn link_builder(&self) -> &LinkBuilder {
        &self.links
    }

    fn embedded_resource_key(&self) -> &'static str {
        ATTACHMENTS_RELATION
    }

    fn embedded_fields(&self) -> &'static [&'static str] {
        Attachment::field_names()
    }

    fn to_embedded(&self, attachment: &Attachment) -> Attachment {
        let mut embedded = attachment.clone();
        for field in AUDIT_FIELDS {
            embedded.clear_field(field);
        }
        embedded.clear_field("type");
        embedded
    }

    fn link_id<'a>(&self, attachment: &'a Attachment) -> &'a str {
        attachment.attachment_content_id.as_deref().unwrap_or_default()
    }
}
