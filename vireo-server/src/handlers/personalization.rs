//! Favorite and like/dislike updates.
//!
//! Every handler answers with the user's full record for the item after the
//! change.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;
use vireo_model::{NodeId, PersonalizationRecordView, UserId};

use crate::{
    api_types::ApiResponse,
    handlers::params::RatingParams,
    infra::{app_state::AppState, errors::AppResult},
};

type RecordResponse = AppResult<Json<ApiResponse<PersonalizationRecordView>>>;

pub async fn mark_favorite_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
) -> RecordResponse {
    let record = state
        .library()
        .mark_favorite(UserId::from(user_id), NodeId::from(item_id))
        .await?;
    Ok(Json(ApiResponse::success(record)))
}

pub async fn unmark_favorite_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
) -> RecordResponse {
    let record = state
        .library()
        .unmark_favorite(UserId::from(user_id), NodeId::from(item_id))
        .await?;
    Ok(Json(ApiResponse::success(record)))
}

/// `POST .../rating?likes=true|false`
pub async fn set_rating_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<RatingParams>,
) -> RecordResponse {
    let record = state
        .library()
        .set_rating(UserId::from(user_id), NodeId::from(item_id), params.likes)
        .await?;
    Ok(Json(ApiResponse::success(record)))
}

pub async fn delete_rating_handler(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(Uuid, Uuid)>,
) -> RecordResponse {
    let record = state
        .library()
        .delete_rating(UserId::from(user_id), NodeId::from(item_id))
        .await?;
    Ok(Json(ApiResponse::success(record)))
}
