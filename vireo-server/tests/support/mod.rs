//! Test server over a small snapshot-backed library.
#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use vireo_core::UserLibraryService;
use vireo_core::domain::RefreshPolicyConfig;
use vireo_core::infra::memory::{LibraryGrant, MemoryLibrary};
use vireo_core::infra::snapshot::{IntroLink, LibrarySnapshot, UserGrant};
use vireo_model::{ExtraType, MediaNode, NodeKind, User, UserId};
use vireo_server::{
    AppState, create_app,
    infra::config::{
        Config, ConfigMetadata, LatestConfig, LibraryConfig, RefreshConfig,
        ServerConfig,
    },
};

pub struct TestApp {
    pub server: TestServer,
    pub library: MemoryLibrary,
    /// Granted the Movies library
    pub alice: User,
    /// Granted nothing
    pub mallory: User,
    pub root: MediaNode,
    pub movies: MediaNode,
    pub heat: MediaNode,
    pub heat_trailer: MediaNode,
    pub heat_featurette: MediaNode,
    pub studio_ident: MediaNode,
    pub person: MediaNode,
}

impl TestApp {
    pub fn user_path(&self, user: &User, rest: &str) -> String {
        format!("/api/v1/users/{}/{rest}", user.id)
    }

    pub fn item_path(&self, user: &User, item: &MediaNode, rest: &str) -> String {
        let base = format!("/api/v1/users/{}/items/{}", user.id, item.id);
        if rest.is_empty() { base } else { format!("{base}/{rest}") }
    }
}

pub fn test_config(default_limit: usize) -> Config {
    Config {
        server: ServerConfig::default(),
        library: LibraryConfig::default(),
        refresh: RefreshConfig::default(),
        latest: LatestConfig { default_limit },
        metadata: ConfigMetadata::default(),
    }
}

pub fn build_test_app() -> TestApp {
    build_test_app_with_limit(20)
}

pub fn build_test_app_with_limit(default_limit: usize) -> TestApp {
    let now = Utc::now();
    let root = MediaNode::new("Root", NodeKind::RootFolder);
    let movies = MediaNode::new("Movies", NodeKind::CollectionFolder)
        .with_parent(root.id);
    let heat = MediaNode::new("Heat", NodeKind::Movie)
        .with_parent(movies.id)
        .with_overview("A crew of thieves.")
        .with_primary_image(true)
        .with_created_at(now - Duration::days(2));
    let ronin = MediaNode::new("Ronin", NodeKind::Movie)
        .with_parent(movies.id)
        .with_created_at(now - Duration::days(1));
    let heat_trailer = MediaNode::new("Heat trailer", NodeKind::Trailer)
        .with_parent(heat.id)
        .with_extra_type(ExtraType::Trailer);
    let heat_featurette = MediaNode::new("Making of Heat", NodeKind::Video)
        .with_parent(heat.id)
        .with_extra_type(ExtraType::Featurette);
    let studio_ident = MediaNode::new("Studio ident", NodeKind::Video);
    let person = MediaNode::new("Jane Doe", NodeKind::Person)
        .with_last_refreshed_at(now - Duration::days(10));

    let alice = User::new(UserId::new(), "alice");
    let mallory = User::new(UserId::new(), "mallory");

    let snapshot = LibrarySnapshot {
        users: vec![alice.clone(), mallory.clone()],
        nodes: vec![
            root.clone(),
            movies.clone(),
            heat.clone(),
            ronin,
            heat_trailer.clone(),
            heat_featurette.clone(),
            studio_ident.clone(),
            person.clone(),
        ],
        intros: vec![IntroLink {
            item_id: heat.id,
            intro_ids: vec![studio_ident.id],
        }],
        grants: vec![UserGrant {
            user_id: alice.id,
            grant: LibraryGrant::libraries([movies.id]),
        }],
        personalization: Vec::new(),
    };

    let library = snapshot.into_library().expect("snapshot loads");
    let service = UserLibraryService::new(
        library.unit_of_work().expect("all ports wired"),
        RefreshPolicyConfig::default(),
    );
    let state = AppState::new(service, test_config(default_limit));
    let server = TestServer::new(create_app(state)).expect("test server");

    TestApp {
        server,
        library,
        alice,
        mallory,
        root,
        movies,
        heat,
        heat_trailer,
        heat_featurette,
        studio_ident,
        person,
    }
}
