mod support;

use support::fixture;
use vireo_core::ports::PersonalizationStorage;
use vireo_model::{PersonalizationRecord, SaveReason};

#[tokio::test]
async fn favorite_is_idempotent_and_reversible() {
    let fx = fixture().await;
    let (alice, heat) = (fx.alice.id, fx.heat.id);

    fx.service.set_rating(alice, heat, false).await.expect("rate");
    let once = fx.service.mark_favorite(alice, heat).await.expect("mark");
    let twice = fx.service.mark_favorite(alice, heat).await.expect("mark");
    assert_eq!(once, twice);
    assert!(twice.is_favorite);
    assert_eq!(twice.item_id, heat);

    let cleared = fx.service.unmark_favorite(alice, heat).await.expect("unmark");
    assert!(!cleared.is_favorite);
    assert_eq!(cleared.likes, Some(false));

    assert_eq!(
        fx.library.personalization.last_reason(alice, heat).await,
        Some(SaveReason::UpdateUserRating)
    );
}

#[tokio::test]
async fn deleting_a_rating_matches_never_rated() {
    let fx = fixture().await;
    let (alice, heat) = (fx.alice.id, fx.heat.id);

    let liked = fx.service.set_rating(alice, heat, true).await.expect("like");
    assert_eq!(liked.likes, Some(true));

    let deleted = fx.service.delete_rating(alice, heat).await.expect("delete");
    assert_eq!(deleted.likes, None);

    let stored = fx
        .library
        .personalization
        .get(alice, heat)
        .await
        .expect("stored record");
    assert_eq!(stored, PersonalizationRecord::default());
}

#[tokio::test]
async fn rating_updates_keep_played_state() {
    let fx = fixture().await;
    let (alice, heat) = (fx.alice.id, fx.heat.id);
    let played = PersonalizationRecord {
        played: true,
        play_count: 3,
        ..PersonalizationRecord::default()
    };
    fx.library
        .personalization
        .save(alice, heat, &played, SaveReason::PlaybackProgress)
        .await
        .expect("seed");

    let view = fx.service.mark_favorite(alice, heat).await.expect("mark");
    assert!(view.played);
    assert_eq!(view.play_count, 3);
}

#[tokio::test]
async fn records_are_per_user() {
    let fx = fixture().await;
    let album = fx.album.id;

    fx.service
        .mark_favorite(fx.alice.id, album)
        .await
        .expect("mark");
    fx.library
        .grants
        .grant(fx.bob.id, vireo_core::infra::memory::LibraryGrant::all());

    let bobs = fx
        .library
        .personalization
        .get(fx.bob.id, album)
        .await
        .expect("read");
    assert!(!bobs.is_favorite);

    let view = fx.service.set_rating(fx.bob.id, album, true).await.expect("rate");
    assert!(!view.is_favorite);
    assert_eq!(view.likes, Some(true));
}
