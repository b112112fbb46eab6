//! Typed error handling for the resource server
//!
//! Every failure a handler can surface is one of the categories below. Each
//! category knows its HTTP status and a stable machine-readable code, so
//! `RestError` converts straight into an axum response.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups that found nothing, or ids already taken
//! - [`ProjectionError`]: embedding/projection operations a type does not support
//! - [`ValidationError`]: malformed query parameters or request bodies
//! - [`BackendError`]: failures reported by the backend service boundary
//! - [`ConfigError`]: configuration parsing and validation
//! - [`RequestError`]: malformed paths and URIs
//!
//! # Example
//!
//! ```rust,ignore
//! use sw360_rest::prelude::*;
//!
//! async fn load(service: &dyn EntityService<Component>, id: &str) -> RestResult<Component> {
//!     service.get(id).await
//! }
//!
//! match load(&service, "c-1").await {
//!     Ok(component) => println!("Found: {:?}", component.name),
//!     Err(RestError::Entity(EntityError::NotFound { id, .. })) => println!("{} is gone", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type of the resource server
#[derive(Debug, Error)]
pub enum RestError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RestError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Entity(e) => e.status_code(),
            RestError::Projection(e) => e.status_code(),
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::Backend(e) => e.status_code(),
            RestError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::Request(_) => StatusCode::BAD_REQUEST,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RestError::Entity(e) => e.error_code(),
            RestError::Projection(e) => e.error_code(),
            RestError::Validation(e) => e.error_code(),
            RestError::Backend(e) => e.error_code(),
            RestError::Config(_) => "CONFIG_ERROR",
            RestError::Request(e) => e.error_code(),
            RestError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RestError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            RestError::Validation(ValidationError::UnknownSortField {
                entity_type,
                field,
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "field": field
            })),
            _ => None,
        }
    }

    /// Shorthand for a not-found entity error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        RestError::Entity(EntityError::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        })
    }

    /// True when the error means "the backend has no such record"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RestError::Entity(EntityError::NotFound { .. })
                | RestError::Backend(BackendError::NotFound { .. })
        )
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: String },

    #[error("{entity_type} with id '{id}' is still used by {used_by}")]
    InUse {
        entity_type: String,
        id: String,
        used_by: String,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } | EntityError::InUse { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::InUse { .. } => "ENTITY_IN_USE",
        }
    }
}

// =============================================================================
// Projection Errors
// =============================================================================

/// Errors raised while reducing an entity to an embedded projection
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The entity type has no implementation for this projection
    #[error("Projection '{operation}' is not implemented for {entity_type}")]
    NotImplemented {
        entity_type: String,
        operation: String,
    },

    /// The projected value could not be rendered as JSON
    #[error("Failed to render {entity_type}: {message}")]
    Serialization { entity_type: String, message: String },
}

impl ProjectionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProjectionError::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            ProjectionError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ProjectionError::NotImplemented { .. } => "PROJECTION_NOT_IMPLEMENTED",
            ProjectionError::Serialization { .. } => "PROJECTION_SERIALIZATION_ERROR",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value '{value}' for query parameter '{parameter}'")]
    InvalidParameter { parameter: String, value: String },

    #[error("Cannot sort {entity_type} by unknown field '{field}'")]
    UnknownSortField { entity_type: String, field: String },

    #[error("Invalid sort direction '{direction}'")]
    InvalidSortDirection { direction: String },

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ValidationError::UnknownSortField { .. } => "UNKNOWN_SORT_FIELD",
            ValidationError::InvalidSortDirection { .. } => "INVALID_SORT_DIRECTION",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::MissingField { .. } => "MISSING_FIELD",
        }
    }
}

// =============================================================================
// Backend Errors
// =============================================================================

/// Failures reported by the backend service boundary
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend service '{service}' is unavailable")]
    Unavailable { service: String },

    #[error("Backend has no {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },

    #[error("Backend {operation} failed: {message}")]
    OperationFailed { operation: String, message: String },
}

impl BackendError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BackendError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            BackendError::NotFound { .. } => StatusCode::NOT_FOUND,
            BackendError::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BackendError::Unavailable { .. } => "BACKEND_UNAVAILABLE",
            BackendError::NotFound { .. } => "BACKEND_NOT_FOUND",
            BackendError::OperationFailed { .. } => "BACKEND_OPERATION_FAILED",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {message}", describe_file(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

fn describe_file(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid URI '{uri}': {message}")]
    InvalidUri { uri: String, message: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidUri { .. } => "INVALID_URI",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for RestError {
    fn from(err: std::io::Error) -> Self {
        RestError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for RestError {
    fn from(err: serde_yaml::Error) -> Self {
        RestError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for RestError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<RestError>() {
            Ok(rest_err) => rest_err,
            Err(other) => RestError::Internal(other.to_string()),
        }
    }
}

/// A specialized Result type for resource server operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found_display_and_status() {
        let err = RestError::not_found("component", "c-17");
        assert!(err.to_string().contains("component"));
        assert!(err.to_string().contains("c-17"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_entity_in_use_is_conflict() {
        let err: RestError = EntityError::InUse {
            entity_type: "release".to_string(),
            id: "r-1".to_string(),
            used_by: "project p-1".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "ENTITY_IN_USE");
        assert!(err.to_string().contains("project p-1"));
    }

    #[test]
    fn test_projection_not_implemented_is_501() {
        let err: RestError = ProjectionError::NotImplemented {
            entity_type: "license".to_string(),
            operation: "fields".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(err.error_code(), "PROJECTION_NOT_IMPLEMENTED");
    }

    #[test]
    fn test_backend_unavailable_is_503() {
        let err: RestError = BackendError::Unavailable {
            service: "components".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_backend_not_found_counts_as_not_found() {
        let err: RestError = BackendError::NotFound {
            entity_type: "license".to_string(),
            id: "MIT".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_sort_field_details() {
        let err: RestError = ValidationError::UnknownSortField {
            entity_type: "component".to_string(),
            field: "bogus".to_string(),
        }
        .into();
        let response = err.to_response();
        assert_eq!(response.code, "UNKNOWN_SORT_FIELD");
        assert_eq!(response.details.unwrap()["field"], "bogus");
    }

    #[test]
    fn test_config_parse_error_mentions_file() {
        let err = ConfigError::ParseError {
            file: Some("server.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert!(err.to_string().contains("server.yaml"));
        let err = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse config: bad indent");
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_typed_error() {
        let original = RestError::not_found("release", "r-1");
        let wrapped = anyhow::Error::new(original);
        let back: RestError = wrapped.into();
        assert!(back.is_not_found());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RestError = json_err.into();
        assert!(matches!(
            err,
            RestError::Validation(ValidationError::InvalidJson { .. })
        ));
    }
}
