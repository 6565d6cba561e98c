use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers::{items, latest, personalization},
    infra::app_state::AppState,
};

/// Create all v1 API routes
///
/// No route carries middleware yet, so the state is unused here.
pub fn create_v1_router(_state: AppState) -> Router<AppState> {
    Router::new()
        .merge(create_item_routes())
        .merge(create_personalization_routes())
}

fn create_item_routes() -> Router<AppState> {
    Router::new()
        // Static segments win over `{item_id}`
        .route(
            "/users/{user_id}/items/root",
            get(items::get_root_folder_handler),
        )
        .route(
            "/users/{user_id}/items/latest",
            get(latest::get_latest_media_handler),
        )
        .route("/users/{user_id}/items/{item_id}", get(items::get_item_handler))
        .route(
            "/users/{user_id}/items/{item_id}/intros",
            get(items::get_intros_handler),
        )
        .route(
            "/users/{user_id}/items/{item_id}/local-trailers",
            get(items::get_local_trailers_handler),
        )
        .route(
            "/users/{user_id}/items/{item_id}/special-features",
            get(items::get_special_features_handler),
        )
}

fn create_personalization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/favorite-items/{item_id}",
            post(personalization::mark_favorite_handler)
                .delete(personalization::unmark_favorite_handler),
        )
        .route(
            "/users/{user_id}/items/{item_id}/rating",
            post(personalization::set_rating_handler)
                .delete(personalization::delete_rating_handler),
        )
}
