//! SW360 resource types
//!
//! Each entity module holds the backend model, the REST helper that embeds
//! and links it, and (for exposed collections) its handlers and descriptor.
//! Attachments are only ever embedded in releases and have no routes.

pub mod macros;

pub mod attachment;
pub mod component;
pub mod license;
pub mod project;
pub mod release;
pub mod user;
pub mod vendor;

pub use attachment::{Attachment, AttachmentHelper};
pub use component::{Component, ComponentDescriptor, ComponentHelper};
pub use license::{License, LicenseDescriptor, LicenseHelper};
pub use project::{Project, ProjectDescriptor, ProjectHelper};
pub use release::{Release, ReleaseDescriptor, ReleaseHelper};
pub use user::{User, UserDescriptor, UserHelper};
pub use vendor::{Vendor, VendorDescriptor, VendorHelper};
