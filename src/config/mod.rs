//! Configuration loading and management

use crate::core::error::{ConfigError, RestResult};
use crate::core::link::LinkBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Listening address of the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Public URL layout used in every generated link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme, host and port clients reach the API on (e.g. "http://localhost:8080")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix of every API route (e.g. "/api")
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Page size limits for paged collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingSettings {
    /// Page size used when `page_entries` is absent or below 1
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Upper bound applied to `page_entries`
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

/// Complete configuration of the resource server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RestConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub paging: PagingSettings,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_max_page_size() -> usize {
    2000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
        }
    }
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl ServerSettings {
    /// `host:port` to bind to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl RestConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RestResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display }.into());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(display),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> RestResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.prefix.is_empty() && !self.api.prefix.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "api.prefix".to_string(),
                value: self.api.prefix.clone(),
                message: "must be empty or start with '/'".to_string(),
            });
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: self.api.base_url.clone(),
                message: "must be an http or https URL".to_string(),
            });
        }
        if self.paging.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "paging.default_page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.paging.default_page_size > self.paging.max_page_size {
            return Err(ConfigError::InvalidValue {
                field: "paging.default_page_size".to_string(),
                value: self.paging.default_page_size.to_string(),
                message: format!(
                    "must not exceed paging.max_page_size ({})",
                    self.paging.max_page_size
                ),
            });
        }
        Ok(())
    }

    /// Link builder for the configured URL layout
    pub fn link_builder(&self) -> LinkBuilder {
        LinkBuilder::new(&self.api.base_url, &self.api.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RestConfig::default();

        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.paging.default_page_size, 20);
        assert_eq!(config.paging.max_page_size, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = RestConfig::from_yaml_str("paging:\n  default_page_size: 5\n").unwrap();

        assert_eq!(config.paging.default_page_size, 5);
        assert_eq!(config.paging.max_page_size, 2000);
        assert_eq!(config.api.prefix, "/api");
    }

    #[test]
    fn test_yaml_serialization() {
        let config = RestConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = RestConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_prefix() {
        let err = RestConfig::from_yaml_str("api:\n  prefix: api\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_default_larger_than_max() {
        let config = RestConfig {
            paging: PagingSettings {
                default_page_size: 50,
                max_page_size: 10,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_link_builder_uses_api_settings() {
        let config = RestConfig::from_yaml_str(
            "api:\n  base_url: https://sw360.example.org/\n  prefix: /resource/api\n",
        )
        .unwrap();
        assert_eq!(
            config.link_builder().resource_url("vendors", "v1"),
            "https://sw360.example.org/resource/api/vendors/v1"
        );
    }
}
