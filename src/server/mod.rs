//! Server module for building the HTTP resource server
//!
//! `ServerBuilder` wires the configuration, the backend services and the
//! registered collections into a host, and the REST exposure turns the host
//! into an axum `Router`.

pub mod builder;
pub mod controller;
pub mod entity_registry;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::{AppState, ServerHost, Services};
