use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;
use vireo_model::{ItemView, UserId};

use crate::{
    api_types::ApiResponse,
    handlers::params::{LatestParams, ViewParams},
    infra::{app_state::AppState, errors::AppResult},
};

/// Recently added items for the user, newest first.
///
/// Tracks from one album (and episodes from one series) collapse into a
/// single entry unless `group_items=false`. Without `limit` the configured
/// default applies.
pub async fn get_latest_media_handler(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(latest): Query<LatestParams>,
    Query(view): Query<ViewParams>,
) -> AppResult<Json<ApiResponse<Vec<ItemView>>>> {
    let query = latest.into_query(state.config().latest.default_limit)?;
    let options = view.into_options()?;

    let items = state
        .library()
        .get_latest_media(UserId::from(user_id), &query, &options)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}
