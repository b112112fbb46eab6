//! # sw360-rest
//!
//! A HAL/HATEOAS REST resource server for the SW360 component catalogue.
//!
//! Backend records (components, releases, projects, users, vendors, licenses
//! and attachments) are turned into hyperlinked JSON resources:
//!
//! - **Embedding**: every type has a compact default view, optionally
//!   extended with `?fields=` projections, used when it appears inside
//!   another resource
//! - **Paging**: `?page=`, `?page_entries=` and `?sort=` slice and order any
//!   collection, with `first`/`prev`/`next`/`last` links
//! - **Backend boundary**: handlers talk to async [`EntityService`](crate::core::service::EntityService)
//!   implementations; an in-memory backend is included
//! - **Configuration-Based**: bind address, public base URL, API prefix and
//!   page sizes come from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sw360_rest::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let components = InMemoryEntityService::with_entities(vec![Component {
//!         name: Some("Apache Commons".to_string()),
//!         ..Default::default()
//!     }])?;
//!
//!     ServerBuilder::new()
//!         .with_config_file("sw360-rest.yaml")?
//!         .with_services(Services::in_memory().with_components(components))
//!         .with_default_resources()
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::Entity,
        error::{RestError, RestResult},
        field::FieldValue,
        hal::{CollectionResource, HalResource},
        helper::RestHelper,
        link::{HalLink, LinkBuilder},
        pagination::{Direction, Pageable, PaginationResult, SortOrder},
        paging::PagingAwareRestHelper,
        request::RequestContext,
        service::{EntityService, ExternalIdQuery},
    };

    // === Macros ===
    pub use crate::{impl_backend_enum, impl_rest_entity};

    // === Entities ===
    pub use crate::entities::{
        Attachment, Component, License, Project, Release, User, Vendor,
        attachment::CheckStatus, component::ComponentType, project::ProjectType,
    };

    // === Storage ===
    pub use crate::storage::InMemoryEntityService;

    // === Config ===
    pub use crate::config::{ApiSettings, PagingSettings, RestConfig, ServerSettings};

    // === Server ===
    pub use crate::server::{
        AppState, EntityDescriptor, EntityRegistry, RestExposure, ServerBuilder, ServerHost,
        Services,
    };

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
