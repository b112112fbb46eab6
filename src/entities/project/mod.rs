pub mod descriptor;
pub mod handlers;
pub mod helper;
pub mod model;

pub use descriptor::ProjectDescriptor;
pub use helper::ProjectHelper;
pub use model::{Project, ProjectType};
