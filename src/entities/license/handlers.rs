//! License HTTP handlers

use super::model::License;
use crate::core::error::{RestResult, ValidationError};
use crate::core::hal::{CollectionResource, HalResource};
use crate::core::helper::RestHelper;
use crate::server::controller::{created, paged_collection, parse_body};
use crate::server::host::AppState;
use axum::Json;
use axum::extract::{OriginalUri, Path, State};
use axum::response::Response;
use serde_json::Value;

pub async fn list_licenses(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<License>>> {
    let request = state.request(&uri)?;
    let params = state.list_params(&request)?;
    let licenses = state.services.licenses.list().await?;
    paged_collection(&state.license_helper(), licenses, &params, &request)
}

pub async fn get_license(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<Json<HalResource<License>>> {
    let license = state.services.licenses.get(&id).await?;
    Ok(Json(state.license_helper().to_full_resource(license)))
}

/// Create a license; its id is its short name
pub async fn create_license(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> RestResult<Response> {
    let mut license: License = parse_body(payload)?;
    let shortname = license
        .shortname
        .clone()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ValidationError::MissingField {
            field: "shortname".to_string(),
        })?;
    license.id = Some(shortname);
    license.entity_type = None;

    let license = state.services.licenses.create(license).await?;
    tracing::info!("Created license {}", license.id.as_deref().unwrap_or_default());
    Ok(created(state.license_helper().to_full_resource(license)))
}
