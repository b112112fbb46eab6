pub mod descriptor;
pub mod handlers;
pub mod helper;
pub mod model;

pub use descriptor::ComponentDescriptor;
pub use helper::ComponentHelper;
pub use model::{Component, ComponentType};
