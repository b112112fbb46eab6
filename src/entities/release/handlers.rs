//! Release HTTP handlers

use super::model::Release;
use crate::core::error::{EntityError, RequestError, RestError, RestResult, ValidationError};
use crate::core::hal::{CollectionResource, HalResource};
use crate::core::helper::RestHelper;
use crate::core::link::{HalLink, id_from_uri};
use crate::core::service::EXTERNAL_IDS_FIELD;
use crate::entities::attachment::Attachment;
use crate::server::controller::{
    MultiStatus, created, external_id_query, multi_status, paged_collection, parse_body,
};
use crate::server::host::AppState;
use axum::Json;
use axum::extract::{OriginalUri, Path, State};
use axum::http::{StatusCode, Uri};
use axum::http::uri::InvalidUri;
use axum::response::Response;
use serde_json::Value;
use std::collections::BTreeSet;

/// Query parameter selecting releases by attachment checksum
const SHA1_PARAM: &str = "sha1";

/// Relation of the link from a release to its component
pub const COMPONENT_RELATION: &str = "component";

pub async fn list_releases(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<Release>>> {
    let request = state.request(&uri)?;
    let params = state.list_params(&request)?;

    let releases = match request.param(SHA1_PARAM).filter(|s| !s.is_empty()) {
        Some(sha1) => releases_by_sha1(&state, sha1).await?,
        None => state.services.releases.list().await?,
    };
    paged_collection(&state.release_helper(), releases, &params, &request)
}

/// Releases owning an attachment with the given checksum
async fn releases_by_sha1(state: &AppState, sha1: &str) -> RestResult<Vec<Release>> {
    let matching: Vec<Release> = state
        .services
        .releases
        .list()
        .await?
        .into_iter()
        .filter(|release| release.has_attachment_sha1(sha1))
        .collect();

    if matching.is_empty() {
        return Err(RestError::not_found("attachment", sha1));
    }
    Ok(matching)
}

pub async fn search_releases_by_external_ids(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<Release>>> {
    let request = state.request(&uri)?;
    let query = external_id_query(&request);
    let releases = state
        .services
        .releases
        .search_by_external_ids(&query)
        .await?;
    let fields = [EXTERNAL_IDS_FIELD.to_string()];
    Ok(Json(
        state
            .release_helper()
            .build_response(&releases, &fields, &request)?,
    ))
}

pub async fn get_release(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<Json<HalResource<Release>>> {
    let release = state.services.releases.get(&id).await?;
    Ok(Json(release_resource(&state, release).await?))
}

/// Create a release
///
/// `componentId`, `vendorId` and `mainLicenseIds` may be given as resource
/// URIs; only their trailing id is stored.
pub async fn create_release(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> RestResult<Response> {
    let mut release: Release = parse_body(payload)?;
    if release.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        return Err(ValidationError::MissingField {
            field: "name".to_string(),
        }
        .into());
    }
    release.id = None;
    release.entity_type = None;

    if let Some(component) = release.component_id.take() {
        release.component_id = Some(reduce_uri(&component)?);
    }
    if let Some(vendor) = release.vendor_id.take() {
        release.vendor_id = Some(reduce_uri(&vendor)?);
    }
    if let Some(licenses) = release.main_license_ids.take() {
        let ids = licenses
            .iter()
            .map(|uri| reduce_uri(uri))
            .collect::<RestResult<BTreeSet<_>>>()?;
        release.main_license_ids = Some(ids);
    }

    let release = state.services.releases.create(release).await?;
    tracing::info!("Created release {}", release.id.as_deref().unwrap_or_default());
    Ok(created(release_resource(&state, release).await?))
}

pub async fn patch_release(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> RestResult<Json<HalResource<Release>>> {
    let patch: Release = parse_body(payload)?;
    let existing = state.services.releases.get(&id).await?;
    let merged = state.release_helper().merge_update(existing, &patch);
    let updated = state.services.releases.update(merged).await?;
    Ok(Json(release_resource(&state, updated).await?))
}

/// Delete releases by a comma-separated id list, e.g. `/releases/r1,r2`
///
/// Answers `207 Multi-Status` with one entry per id: 200 when deleted, 409
/// while a project still lists the release, otherwise the failure's status.
pub async fn delete_releases(
    State(state): State<AppState>,
    Path(ids): Path<String>,
) -> Response {
    let mut results = Vec::new();
    for id in ids.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        let status = match delete_release(&state, id).await {
            Ok(()) => {
                tracing::info!("Deleted release {}", id);
                StatusCode::OK
            }
            Err(e) => {
                tracing::warn!("Cannot delete release {}: {}", id, e);
                e.status_code()
            }
        };
        results.push(MultiStatus::new(id, status));
    }
    multi_status(results)
}

async fn delete_release(state: &AppState, id: &str) -> RestResult<()> {
    let release = state.services.releases.get(id).await?;

    let projects = state.services.projects.list().await?;
    let using_project = projects.iter().find(|project| {
        project
            .release_ids
            .as_ref()
            .is_some_and(|ids| ids.contains(id))
    });
    if let Some(project) = using_project {
        return Err(EntityError::InUse {
            entity_type: "release".to_string(),
            id: id.to_string(),
            used_by: format!("project {}", project.id.as_deref().unwrap_or_default()),
        }
        .into());
    }

    state.services.releases.delete(id).await?;

    if let Some(component_id) = release.component_id.as_deref() {
        if let Err(e) = detach_from_component(state, component_id, id).await {
            tracing::warn!(
                "Release {} deleted but component {} still lists it: {}",
                id,
                component_id,
                e
            );
        }
    }
    Ok(())
}

/// Drop a deleted release from its component's release list
async fn detach_from_component(
    state: &AppState,
    component_id: &str,
    release_id: &str,
) -> RestResult<()> {
    let mut component = state.services.components.get(component_id).await?;
    if let Some(ids) = component.release_ids.as_mut() {
        ids.remove(release_id);
    }
    state.services.components.update(component).await?;
    Ok(())
}

pub async fn list_release_attachments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<Attachment>>> {
    let request = state.request(&uri)?;
    let release = state.services.releases.get(&id).await?;
    let attachments = release.attachments.unwrap_or_default();
    Ok(Json(
        state
            .attachment_helper()
            .build_response(&attachments, &[], &request)?,
    ))
}

/// Reduce a resource URI (or a plain id) to its id
fn reduce_uri(value: &str) -> RestResult<String> {
    let invalid = |message: String| RequestError::InvalidUri {
        uri: value.to_string(),
        message,
    };
    let value = value.trim();
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("contains whitespace".to_string()).into());
    }

    let path = if value.contains("://") {
        let uri: Uri = value.parse().map_err(|e: InvalidUri| invalid(e.to_string()))?;
        uri.path().to_string()
    } else {
        value.to_string()
    };
    id_from_uri(&path)
        .map(str::to_string)
        .ok_or_else(|| invalid("no id in URI".to_string()).into())
}

/// Full release: component link plus embedded moderators, attachments,
/// vendor and licenses
async fn release_resource(state: &AppState, mut release: Release) -> RestResult<HalResource<Release>> {
    let component_id = release.component_id.take();
    let moderators = release.moderators.take();
    let attachments = release.attachments.take();
    let vendor = release.vendor.take();
    let license_ids = release.main_license_ids.take();

    let mut resource = state.release_helper().to_full_resource(release);
    if let Some(component_id) = component_id {
        resource.add_link(HalLink::new(
            COMPONENT_RELATION,
            state.links.resource_url("components", &component_id),
        ));
    }
    if let Some(emails) = moderators {
        state
            .user_helper()
            .add_embedded_moderators(&mut resource, &emails, state.services.users.as_ref())
            .await?;
    }
    if let Some(attachments) = attachments {
        state
            .attachment_helper()
            .add_embedded_all(&mut resource, &attachments)?;
    }
    if let Some(vendor) = vendor {
        state.vendor_helper().add_embedded(&mut resource, &vendor)?;
    }
    if let Some(ids) = license_ids {
        state
            .license_helper()
            .add_embedded_by_ids(&mut resource, &ids, state.services.licenses.as_ref())
            .await?;
    }
    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_uri() {
        assert_eq!(
            reduce_uri("http://localhost:8080/api/components/c1").unwrap(),
            "c1"
        );
        assert_eq!(reduce_uri("/api/licenses/MIT").unwrap(), "MIT");
        assert_eq!(reduce_uri("v1").unwrap(), "v1");
        assert_eq!(reduce_uri("GPL-2.0+").unwrap(), "GPL-2.0+");
    }

    #[test]
    fn test_reduce_invalid_uri() {
        let err = reduce_uri("http://host/api/vendors/ v1").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_URI");
    }
}
