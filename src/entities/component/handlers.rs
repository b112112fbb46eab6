//! Component HTTP handlers

use super::model::Component;
use crate::core::error::{RestResult, ValidationError};
use crate::core::hal::{CollectionResource, HalResource};
use crate::core::helper::RestHelper;
use crate::core::service::EXTERNAL_IDS_FIELD;
use crate::server::controller::{created, external_id_query, paged_collection, parse_body};
use crate::server::host::AppState;
use axum::Json;
use axum::extract::{OriginalUri, Path, State};
use axum::response::Response;
use serde_json::Value;

/// Query parameter filtering components by name
const NAME_PARAM: &str = "name";

pub async fn list_components(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<Component>>> {
    let request = state.request(&uri)?;
    let params = state.list_params(&request)?;

    let components = match request.param(NAME_PARAM).filter(|n| !n.is_empty()) {
        Some(name) => state.services.components.search(NAME_PARAM, name).await?,
        None => state.services.components.list().await?,
    };
    paged_collection(&state.component_helper(), components, &params, &request)
}

pub async fn search_components_by_external_ids(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<Component>>> {
    let request = state.request(&uri)?;
    let query = external_id_query(&request);
    let components = state
        .services
        .components
        .search_by_external_ids(&query)
        .await?;
    let fields = [EXTERNAL_IDS_FIELD.to_string()];
    Ok(Json(
        state
            .component_helper()
            .build_response(&components, &fields, &request)?,
    ))
}

pub async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<Json<HalResource<Component>>> {
    let component = state.services.components.get(&id).await?;
    Ok(Json(component_resource(&state, component).await?))
}

pub async fn create_component(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> RestResult<Response> {
    let mut component: Component = parse_body(payload)?;
    if component.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        return Err(ValidationError::MissingField {
            field: NAME_PARAM.to_string(),
        }
        .into());
    }
    component.id = None;
    component.entity_type = None;

    let component = state.services.components.create(component).await?;
    tracing::info!("Created component {}", component.id.as_deref().unwrap_or_default());
    Ok(created(component_resource(&state, component).await?))
}

pub async fn patch_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> RestResult<Json<HalResource<Component>>> {
    let patch: Component = parse_body(payload)?;
    let existing = state.services.components.get(&id).await?;
    let merged = state.component_helper().merge_update(existing, &patch);
    let updated = state.services.components.update(merged).await?;
    Ok(Json(component_resource(&state, updated).await?))
}

/// Full component with releases, moderators and vendors embedded
async fn component_resource(
    state: &AppState,
    mut component: Component,
) -> RestResult<HalResource<Component>> {
    let release_ids = component.release_ids.take();
    let moderators = component.moderators.take();
    let vendor_names = component.vendor_names.take();

    let mut resource = state.component_helper().to_full_resource(component);
    if let Some(ids) = release_ids {
        state
            .release_helper()
            .add_embedded_by_ids(&mut resource, &ids, state.services.releases.as_ref())
            .await?;
    }
    if let Some(emails) = moderators {
        state
            .user_helper()
            .add_embedded_moderators(&mut resource, &emails, state.services.users.as_ref())
            .await?;
    }
    if let Some(names) = vendor_names {
        state
            .vendor_helper()
            .add_embedded_by_full_names(&mut resource, &names)?;
    }
    Ok(resource)
}
