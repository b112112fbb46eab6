//! Server host and shared handler state
//!
//! The host owns everything a request handler may need: the immutable
//! configuration, the link builder derived from it, and the backend services
//! of every entity type. Handlers receive a cheap clone of it as [`AppState`].

use crate::config::RestConfig;
use crate::core::error::RestResult;
use crate::core::link::LinkBuilder;
use crate::core::request::RequestContext;
use crate::core::service::EntityService;
use crate::entities::attachment::AttachmentHelper;
use crate::entities::component::{Component, ComponentHelper};
use crate::entities::license::{License, LicenseHelper};
use crate::entities::project::{Project, ProjectHelper};
use crate::entities::release::{Release, ReleaseHelper};
use crate::entities::user::{User, UserHelper};
use crate::entities::vendor::{Vendor, VendorHelper};
use crate::server::controller::ListParams;
use crate::server::entity_registry::EntityRegistry;
use crate::storage::InMemoryEntityService;
use axum::http::Uri;
use std::sync::Arc;

/// Backend services, one per entity type
#[derive(Clone)]
pub struct Services {
    pub components: Arc<dyn EntityService<Component>>,
    pub releases: Arc<dyn EntityService<Release>>,
    pub projects: Arc<dyn EntityService<Project>>,
    pub users: Arc<dyn EntityService<User>>,
    pub vendors: Arc<dyn EntityService<Vendor>>,
    pub licenses: Arc<dyn EntityService<License>>,
}

impl Services {
    /// Empty in-memory services for every entity type
    pub fn in_memory() -> Self {
        Self {
            components: Arc::new(InMemoryEntityService::<Component>::new()),
            releases: Arc::new(InMemoryEntityService::<Release>::new()),
            projects: Arc::new(InMemoryEntityService::<Project>::new()),
            users: Arc::new(InMemoryEntityService::<User>::new()),
            vendors: Arc::new(InMemoryEntityService::<Vendor>::new()),
            licenses: Arc::new(InMemoryEntityService::<License>::new()),
        }
    }

    pub fn with_components(mut self, service: impl EntityService<Component> + 'static) -> Self {
        self.components = Arc::new(service);
        self
    }

    pub fn with_releases(mut self, service: impl EntityService<Release> + 'static) -> Self {
        self.releases = Arc::new(service);
        self
    }

    pub fn with_projects(mut self, service: impl EntityService<Project> + 'static) -> Self {
        self.projects = Arc::new(service);
        self
    }

    pub fn with_users(mut self, service: impl EntityService<User> + 'static) -> Self {
        self.users = Arc::new(service);
        self
    }

    pub fn with_vendors(mut self, service: impl EntityService<Vendor> + 'static) -> Self {
        self.vendors = Arc::new(service);
        self
    }

    pub fn with_licenses(mut self, service: impl EntityService<License> + 'static) -> Self {
        self.licenses = Arc::new(service);
        self
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RestConfig>,
    pub links: LinkBuilder,
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(config: RestConfig, services: Services) -> Self {
        let links = config.link_builder();
        Self {
            config: Arc::new(config),
            links,
            services: Arc::new(services),
        }
    }

    /// Request context for the original (un-nested) request URI
    pub fn request(&self, uri: &Uri) -> RestResult<RequestContext> {
        RequestContext::from_uri(&self.links, uri)
    }

    /// Paging and projection parameters of a collection request
    pub fn list_params(&self, request: &RequestContext) -> RestResult<ListParams> {
        ListParams::from_request(request, &self.config.paging)
    }

    pub fn component_helper(&self) -> ComponentHelper {
        ComponentHelper::new(self.links.clone())
    }

    pub fn release_helper(&self) -> ReleaseHelper {
        ReleaseHelper::new(self.links.clone())
    }

    pub fn project_helper(&self) -> ProjectHelper {
        ProjectHelper::new(self.links.clone())
    }

    pub fn user_helper(&self) -> UserHelper {
        UserHelper::new(self.links.clone())
    }

    pub fn vendor_helper(&self) -> VendorHelper {
        VendorHelper::new(self.links.clone())
    }

    pub fn license_helper(&self) -> LicenseHelper {
        LicenseHelper::new(self.links.clone())
    }

    pub fn attachment_helper(&self) -> AttachmentHelper {
        AttachmentHelper::new(self.links.clone())
    }
}

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(RestConfig::default(), Services::in_memory(), registry);
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Handler state shared by every route
    pub state: AppState,

    /// Registered resource collections
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    pub fn new(config: RestConfig, services: Services, entity_registry: EntityRegistry) -> Self {
        Self {
            state: AppState::new(config, services),
            entity_registry,
        }
    }

    /// Configuration the host was built from
    pub fn config(&self) -> &RestConfig {
        &self.state.config
    }

    /// Collection names registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }
}
