//! Release model

use crate::entities::attachment::Attachment;
use crate::entities::vendor::Vendor;
use std::collections::{BTreeMap, BTreeSet};

crate::impl_rest_entity!(Release, "release", "releases", {
    name: String => "name",
    version: String => "version",
    component_id: String => "componentId",
    cpeid: String => "cpeid",
    release_date: String => "releaseDate",
    created_on: String => "createdOn",
    created_by: String => "createdBy",
    vendor_id: String => "vendorId",
    vendor: Vendor => "vendor",
    main_license_ids: BTreeSet<String> => "mainLicenseIds",
    moderators: BTreeSet<String> => "moderators",
    attachments: Vec<Attachment> => "attachments",
    external_ids: BTreeMap<String, String> => "externalIds",
});

impl Release {
    /// Whether one of this release's attachments has the given SHA-1
    pub fn has_attachment_sha1(&self, sha1: &str) -> bool {
        self.attachments.as_ref().is_some_and(|attachments| {
            attachments
                .iter()
                .any(|a| a.sha1.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(sha1)))
        })
    }
}
