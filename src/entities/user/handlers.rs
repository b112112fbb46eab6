//! User HTTP handlers

use super::model::User;
use crate::core::error::RestResult;
use crate::core::hal::{CollectionResource, HalResource};
use crate::core::helper::RestHelper;
use crate::server::controller::paged_collection;
use crate::server::host::AppState;
use axum::Json;
use axum::extract::{OriginalUri, Path, State};

pub async fn list_users(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> RestResult<Json<CollectionResource<User>>> {
    let request = state.request(&uri)?;
    let params = state.list_params(&request)?;
    let users = state.services.users.list().await?;
    paged_collection(&state.user_helper(), users, &params, &request)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> RestResult<Json<HalResource<User>>> {
    let user = state.services.users.get(&id).await?;
    Ok(Json(state.user_helper().to_full_resource(user)))
}
