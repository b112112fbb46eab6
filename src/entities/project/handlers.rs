//! Project HTTP handlers

use super::model::Project;
use crate::core::error::RestResult;
use crate::core::hal::{CollectionResource, HalResource};
use crate::core::helper::RestHelper;
use crate::core::service::EXTERNAL_IDS_FIELD;
use crate::server::controller::{external_id_query, paged_collection};
use crate::server::host::AppState;
use axum::Json;
use axum::extract::{OriginalUri, Path, State};

pub async fn list_projects(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<Project>>> {
    let request = state.request(&uri)?;
    let params = state.list_params(&request)?;
    let projects = state.services.projects.list().await?;
    paged_collection(&state.project_helper(), projects, &params, &request)
}

pub async fn search_projects_by_external_ids(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<Project>>> {
    let request = state.request(&uri)?;
    let query = external_id_query(&request);
    let projects = state
        .services
        .projects
        .search_by_external_ids(&query)
        .await?;
    let fields = [EXTERNAL_IDS_FIELD.to_string()];
    Ok(Json(
        state
            .project_helper()
            .build_response(&projects, &fields, &request)?,
    ))
}

/// Full project with its releases and moderators embedded
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<Json<HalResource<Project>>> {
    let mut project = state.services.projects.get(&id).await?;
    let release_ids = project.release_ids.take();
    let moderators = project.moderators.take();

    let mut resource = state.project_helper().to_full_resource(project);
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
    Ok(Json(resource))
}
