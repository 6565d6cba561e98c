mod support;

use axum::http::StatusCode;
use serde_json::Value;
use support::{build_test_app, build_test_app_with_limit};

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data is a list")
        .iter()
        .map(|item| item["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn latest_lists_newest_first() {
    let app = build_test_app();

    let response = app
        .server
        .get(&app.user_path(&app.alice, "items/latest"))
        .await;
    response.assert_status_ok();
    assert_eq!(names(&response.json()), vec!["Ronin", "Heat"]);
}

#[tokio::test]
async fn configured_default_limit_applies() {
    let app = build_test_app_with_limit(1);

    let response = app
        .server
        .get(&app.user_path(&app.alice, "items/latest"))
        .await;
    response.assert_status_ok();
    assert_eq!(names(&response.json()), vec!["Ronin"]);

    let explicit = app
        .server
        .get(&app.user_path(&app.alice, "items/latest"))
        .add_query_param("limit", "5")
        .await;
    assert_eq!(names(&explicit.json()), vec!["Ronin", "Heat"]);
}

#[tokio::test]
async fn ungranted_user_sees_nothing() {
    let app = build_test_app();

    let response = app
        .server
        .get(&app.user_path(&app.mallory, "items/latest"))
        .await;
    response.assert_status_ok();
    assert!(names(&response.json()).is_empty());
}

#[tokio::test]
async fn zero_limit_and_unknown_kind_are_bad_requests() {
    let app = build_test_app();
    let path = app.user_path(&app.alice, "items/latest");

    let zero = app.server.get(&path).add_query_param("limit", "0").await;
    zero.assert_status(StatusCode::BAD_REQUEST);

    let kind = app
        .server
        .get(&path)
        .add_query_param("include_item_types", "Podcast")
        .await;
    kind.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hidden_parent_scope_is_forbidden() {
    let app = build_test_app();

    let response = app
        .server
        .get(&app.user_path(&app.mallory, "items/latest"))
        .add_query_param("parent_id", app.movies.id.to_string())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}
