//! License model

crate::impl_rest_entity!(License, "license", "licenses", {
    shortname: String => "shortname",
    fullname: String => "fullname",
    text: String => "text",
    checked: bool => "checked",
    license_type: String => "licenseType",
});
