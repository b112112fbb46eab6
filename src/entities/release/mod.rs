pub mod descriptor;
pub mod handlers;
pub mod helper;
pub mod model;

pub use descriptor::ReleaseDescriptor;
pub use helper::ReleaseHelper;
pub use model::Release;
