mod support;

use std::fmt::Debug;
use std::sync::Arc;

use support::fixture;
use vireo_core::domain::RefreshPolicyConfig;
use vireo_core::ports::VisibilityPolicy;
use vireo_core::{AppUnitOfWorkBuilder, MediaError, UserLibraryService};
use vireo_model::{
    LatestItemsQuery, MediaNode, NodeId, User, UserId, ViewOptions,
};

struct DenyAll;

impl VisibilityPolicy for DenyAll {
    fn is_visible(&self, _user: &User, _node: &MediaNode) -> bool {
        false
    }
}

fn assert_unauthorized<T: Debug>(result: Result<T, MediaError>) {
    match result {
        Err(MediaError::Unauthorized(message)) => {
            assert!(message.contains("is not permitted to access item"));
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn root_folder_is_visible_without_any_grant() {
    let fx = fixture().await;
    let carol = User::new(UserId::new(), "carol");
    fx.library.users.insert(carol.clone()).await;
    let options = ViewOptions::default();

    let root = fx
        .service
        .get_root_folder(carol.id, &options)
        .await
        .expect("root folder is always visible");
    assert_eq!(root.id, fx.root.id);
    assert!(root.is_folder);

    let via_nil = fx
        .service
        .get_item(carol.id, NodeId::nil(), &options)
        .await
        .expect("nil id resolves to the root folder");
    assert_eq!(via_nil.id, fx.root.id);
}

#[tokio::test]
async fn invisible_item_is_rejected_without_side_effects() {
    let fx = fixture().await;
    let (bob, heat) = (fx.bob.id, fx.heat.id);
    let options = ViewOptions::default();

    assert_unauthorized(fx.service.get_item(bob, heat, &options).await);
    assert_unauthorized(fx.service.get_intros(bob, heat, &options).await);
    assert_unauthorized(fx.service.mark_favorite(bob, heat).await);
    assert_unauthorized(fx.service.unmark_favorite(bob, heat).await);
    assert_unauthorized(fx.service.set_rating(bob, heat, true).await);
    assert_unauthorized(fx.service.delete_rating(bob, heat).await);
    assert_unauthorized(
        fx.service.get_local_trailers(bob, heat, &options).await,
    );
    assert_unauthorized(
        fx.service.get_special_features(bob, heat, &options).await,
    );

    assert_eq!(fx.library.personalization.record_count().await, 0);
    assert!(fx.library.refresher.calls().await.is_empty());
}

#[tokio::test]
async fn denial_message_names_user_and_item() {
    let fx = fixture().await;
    let err = fx
        .service
        .get_item(fx.bob.id, fx.heat.id, &ViewOptions::default())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unauthorized: bob is not permitted to access item Heat."
    );
}

#[tokio::test]
async fn denied_lookup_never_refreshes() {
    let fx = fixture().await;
    let ports = fx.library.unit_of_work().expect("ports");
    let locked_down = AppUnitOfWorkBuilder::new()
        .with_users(ports.users.clone())
        .with_catalog(ports.catalog.clone())
        .with_refresher(ports.refresher.clone())
        .with_personalization(ports.personalization.clone())
        .with_projector(ports.projector.clone())
        .with_visibility(Arc::new(DenyAll))
        .build()
        .expect("ports");
    let service =
        UserLibraryService::new(locked_down, RefreshPolicyConfig::default());

    assert_unauthorized(
        service
            .get_item(fx.alice.id, fx.stale_person.id, &ViewOptions::default())
            .await,
    );
    assert!(fx.library.refresher.calls().await.is_empty());
}

#[tokio::test]
async fn unknown_user_and_item_are_not_found() {
    let fx = fixture().await;
    let options = ViewOptions::default();

    let err = fx
        .service
        .get_item(UserId::new(), fx.heat.id, &options)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = fx
        .service
        .get_item(fx.alice.id, NodeId::new(), &options)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = fx
        .service
        .mark_favorite(fx.alice.id, NodeId::new())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn latest_scope_is_resolved_and_authorized() {
    let fx = fixture().await;
    let options = ViewOptions::default();

    let unknown = LatestItemsQuery::default().in_scope(NodeId::new());
    let err = fx
        .service
        .get_latest_media(fx.alice.id, &unknown, &options)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let hidden = LatestItemsQuery::default().in_scope(fx.kids.id);
    assert_unauthorized(
        fx.service
            .get_latest_media(fx.alice.id, &hidden, &options)
            .await,
    );
}

#[tokio::test]
async fn users_must_be_registered() {
    let fx = support::Fixture::new();
    let err = fx
        .service
        .get_root_folder(fx.alice.id, &ViewOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MediaError::NotFound(_)));
}
