mod support;

use axum::http::StatusCode;
use serde_json::Value;
use support::build_test_app;

#[tokio::test]
async fn favorite_round_trip() {
    let app = build_test_app();
    let path = app.user_path(
        &app.alice,
        &format!("favorite-items/{}", app.heat.id),
    );

    let marked = app.server.post(&path).await;
    marked.assert_status_ok();
    let body: Value = marked.json();
    assert_eq!(body["data"]["item_id"], app.heat.id.to_string());
    assert_eq!(body["data"]["is_favorite"], true);

    let item = app
        .server
        .get(&app.item_path(&app.alice, &app.heat, ""))
        .await;
    assert_eq!(item.json::<Value>()["data"]["user_data"]["is_favorite"], true);

    let unmarked = app.server.delete(&path).await;
    unmarked.assert_status_ok();
    assert_eq!(unmarked.json::<Value>()["data"]["is_favorite"], false);
}

#[tokio::test]
async fn rating_set_and_cleared() {
    let app = build_test_app();
    let path = app.item_path(&app.alice, &app.heat, "rating");

    let disliked = app
        .server
        .post(&path)
        .add_query_param("likes", "false")
        .await;
    disliked.assert_status_ok();
    assert_eq!(disliked.json::<Value>()["data"]["likes"], false);

    let cleared = app.server.delete(&path).await;
    cleared.assert_status_ok();
    assert!(cleared.json::<Value>()["data"]["likes"].is_null());
}

#[tokio::test]
async fn rating_requires_likes() {
    let app = build_test_app();

    let response = app
        .server
        .post(&app.item_path(&app.alice, &app.heat, "rating"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hidden_item_cannot_be_favorited() {
    let app = build_test_app();

    let response = app
        .server
        .post(&app.user_path(
            &app.mallory,
            &format!("favorite-items/{}", app.heat.id),
        ))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let stored = app
        .library
        .personalization
        .contains(app.mallory.id, app.heat.id)
        .await;
    assert!(!stored);
}
