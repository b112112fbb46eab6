pub mod descriptor;
pub mod handlers;
pub mod helper;
pub mod model;

pub use descriptor::LicenseDescriptor;
pub use helper::LicenseHelper;
pub use model::License;
