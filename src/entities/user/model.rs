//! User model

crate::impl_rest_entity!(User, "user", "users", {
    email: String => "email",
    fullname: String => "fullname",
    givenname: String => "givenname",
    lastname: String => "lastname",
    department: String => "department",
    externalid: String => "externalid",
});
