//! Project model

use std::collections::{BTreeMap, BTreeSet};

crate::impl_backend_enum!(ProjectType {
    Customer,
    Internal,
    Product,
    Service,
    InnerSource,
});

crate::impl_rest_entity!(Project, "project", "projects", {
    name: String => "name",
    version: String => "version",
    description: String => "description",
    project_type: ProjectType => "projectType",
    created_on: String => "createdOn",
    created_by: String => "createdBy",
    business_unit: String => "businessUnit",
    release_ids: BTreeSet<String> => "releaseIds",
    project_responsible: String => "projectResponsible",
    moderators: BTreeSet<String> => "moderators",
    external_ids: BTreeMap<String, String> => "externalIds",
});
