//! Component model

use std::collections::{BTreeMap, BTreeSet};

crate::impl_backend_enum!(ComponentType {
    Internal,
    Oss,
    Cots,
    Freeware,
    InnerSource,
    Service,
});

crate::impl_rest_entity!(Component, "component", "components", {
    name: String => "name",
    description: String => "description",
    created_on: String => "createdOn",
    component_type: ComponentType => "componentType",
    created_by: String => "createdBy",
    vendor_names: BTreeSet<String> => "vendorNames",
    homepage: String => "homepage",
    mailinglist: String => "mailinglist",
    wiki: String => "wiki",
    blog: String => "blog",
    languages: BTreeSet<String> => "languages",
    operating_systems: BTreeSet<String> => "operatingSystems",
    release_ids: BTreeSet<String> => "releaseIds",
    moderators: BTreeSet<String> => "moderators",
    external_ids: BTreeMap<String, String> => "externalIds",
});
