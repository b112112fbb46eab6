//! Attachment metadata model
//!
//! Only the metadata is modelled; attachment content lives elsewhere and is
//! referenced by `attachmentContentId`.

crate::impl_backend_enum!(CheckStatus {
    NotChecked,
    Accepted,
    Rejected,
});

crate::impl_rest_entity!(Attachment, "attachment", "attachments", {
    attachment_content_id: String => "attachmentContentId",
    filename: String => "filename",
    sha1: String => "sha1",
    attachment_type: String => "attachmentType",
    created_by: String => "createdBy",
    created_team: String => "createdTeam",
    created_comment: String => "createdComment",
    created_on: String => "createdOn",
    checked_by: String => "checkedBy",
    checked_team: String => "checkedTeam",
    checked_comment: String => "checkedComment",
    checked_on: String => "checkedOn",
    check_status: CheckStatus => "checkStatus",
});
