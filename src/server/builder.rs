//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::{EntityDescriptor, EntityRegistry};
use super::exposure::RestExposure;
use super::host::{ServerHost, Services};
use crate::config::RestConfig;
use crate::entities::{
    ComponentDescriptor, LicenseDescriptor, ProjectDescriptor, ReleaseDescriptor, UserDescriptor,
    VendorDescriptor,
};
use anyhow::Result;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the resource server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config_file("sw360-rest.yaml")?
///     .with_services(Services::in_memory())
///     .with_default_resources()
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: RestConfig,
    services: Option<Services>,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: RestConfig::default(),
            services: None,
            entity_registry: EntityRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Use `config` instead of the defaults
    pub fn with_config(mut self, config: RestConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a YAML file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = RestConfig::from_yaml_file(path)?;
        Ok(self.with_config(config))
    }

    /// Set the backend services (in-memory services are used otherwise)
    pub fn with_services(mut self, services: Services) -> Self {
        self.services = Some(services);
        self
    }

    /// Register a resource collection
    pub fn register(mut self, descriptor: impl EntityDescriptor + 'static) -> Self {
        self.entity_registry.register(Box::new(descriptor));
        self
    }

    /// Register every collection of the SW360 API
    pub fn with_default_resources(self) -> Self {
        self.register(ComponentDescriptor)
            .register(ReleaseDescriptor)
            .register(ProjectDescriptor)
            .register(UserDescriptor)
            .register(VendorDescriptor)
            .register(LicenseDescriptor)
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are merged at the root, outside the API prefix. Their
    /// handlers may use `OriginalUri` to build links as the collections do.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    ///
    /// Fails when the configuration does not validate.
    pub fn build_host(mut self) -> Result<ServerHost> {
        self.config.validate()?;

        let services = self.services.take().unwrap_or_else(|| {
            tracing::debug!("No services configured, using in-memory backend");
            Services::in_memory()
        });

        Ok(ServerHost::new(self.config, services, self.entity_registry))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application on the configured address with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.services.is_none());
        assert!(builder.custom_routes.is_empty());
        assert!(builder.entity_registry.entity_types().is_empty());
    }

    #[test]
    fn test_with_default_resources_registers_all_collections() {
        let host = ServerBuilder::new()
            .with_default_resources()
            .build_host()
            .expect("build_host should succeed");
        assert_eq!(
            host.entity_registry.collections(),
            vec!["components", "releases", "projects", "users", "vendors", "licenses"]
        );
    }

    #[test]
    fn test_build_host_rejects_invalid_config() {
        let mut config = RestConfig::default();
        config.paging.default_page_size = 0;
        let result = ServerBuilder::new().with_config(config).build_host();
        assert!(result.is_err());
    }

    #[test]
    fn test_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sw360-rest.yaml");
        std::fs::write(&path, "server:\n  port: 9090\n").unwrap();

        let host = ServerBuilder::new()
            .with_config_file(&path)
            .unwrap()
            .build_host()
            .unwrap();
        assert_eq!(host.config().server.port, 9090);
    }

    #[test]
    fn test_with_missing_config_file_fails() {
        assert!(ServerBuilder::new().with_config_file("/nonexistent/sw360.yaml").is_err());
    }

    #[test]
    fn test_build_with_custom_routes() {
        use axum::routing::get;

        let custom = Router::new().route("/custom", get(|| async { "ok" }));
        let router = ServerBuilder::new()
            .with_custom_routes(custom)
            .with_default_resources()
            .build();
        assert!(router.is_ok());
    }

    #[test]
    fn test_build_with_empty_prefix() {
        let config = RestConfig::from_yaml_str("api:\n  prefix: \"\"\n").unwrap();
        let router = ServerBuilder::new()
            .with_config(config)
            .with_default_resources()
            .build();
        assert!(router.is_ok());
    }
}
