pub mod descriptor;
pub mod handlers;
pub mod helper;
pub mod model;

pub use descriptor::UserDescriptor;
pub use helper::UserHelper;
pub use model::User;
