//! Single-item lookups and the item's attached media.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;
use vireo_model::{ItemView, NodeId, QueryResult, UserId};

use crate::{
    api_types::ApiResponse,
    handlers::params::ViewParams,
    infra::{app_state::AppState, errors::AppResult},
};

/// Fetch one item as seen by the user.
///
/// People whose metadata is stale are refreshed before the response is
/// built, so this call can be slow for them.
///
/// # Response
///
/// - `200 OK` with the projected item
/// - `403 Forbidden` if the item is outside the user's libraries
/// - `404 Not Found` for an unknown user or item
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<ViewParams>,
) -> AppResult<Json<ApiResponse<ItemView>>> {
    let options = params.into_options()?;
    let item = state
        .library()
        .get_item(UserId::from(user_id), NodeId::from(item_id), &options)
        .await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn get_root_folder_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ViewParams>,
) -> AppResult<Json<ApiResponse<ItemView>>> {
    let options = params.into_options()?;
    let root = state
        .library()
        .get_root_folder(UserId::from(user_id), &options)
        .await?;
    Ok(Json(ApiResponse::success(root)))
}

/// Intros to play before the item, in play order.
pub async fn get_intros_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<ViewParams>,
) -> AppResult<Json<ApiResponse<QueryResult<ItemView>>>> {
    let options = params.into_options()?;
    let intros = state
        .library()
        .get_intros(UserId::from(user_id), NodeId::from(item_id), &options)
        .await?;
    Ok(Json(ApiResponse::success(intros)))
}

pub async fn get_local_trailers_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<ViewParams>,
) -> AppResult<Json<ApiResponse<Vec<ItemView>>>> {
    let options = params.into_options()?;
    let trailers = state
        .library()
        .get_local_trailers(
            UserId::from(user_id),
            NodeId::from(item_id),
            &options,
        )
        .await?;
    Ok(Json(ApiResponse::success(trailers)))
}

pub async fn get_special_features_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<ViewParams>,
) -> AppResult<Json<ApiResponse<Vec<ItemView>>>> {
    let options = params.into_options()?;
    let features = state
        .library()
        .get_special_features(
            UserId::from(user_id),
            NodeId::from(item_id),
            &options,
        )
        .await?;
    Ok(Json(ApiResponse::success(features)))
}
