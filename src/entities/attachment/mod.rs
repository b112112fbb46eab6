pub mod helper;
pub mod model;

pub use helper::AttachmentHelper;
pub use model::{Attachment, CheckStatus};
