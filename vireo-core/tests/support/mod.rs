//! Shared fixture for core integration tests: a small library with two
//! users, three libraries and a handful of media.
#![allow(dead_code)]

use chrono::{Duration, Utc};
use vireo_core::domain::RefreshPolicyConfig;
use vireo_core::infra::memory::{LibraryGrant, MemoryLibrary};
use vireo_core::UserLibraryService;
use vireo_model::{
    ExtraType, MediaNode, NodeKind, User, UserId, UserPreferences,
};

pub struct Fixture {
    pub library: MemoryLibrary,
    pub service: UserLibraryService,
    /// Granted Movies and Music
    pub alice: User,
    /// Granted Kids only, hides played items in latest rows
    pub bob: User,
    pub root: MediaNode,
    pub movies: MediaNode,
    pub music: MediaNode,
    pub kids: MediaNode,
    pub heat: MediaNode,
    pub heat_trailer: MediaNode,
    pub heat_featurette: MediaNode,
    pub heat_theme: MediaNode,
    pub studio_ident: MediaNode,
    pub album: MediaNode,
    pub tracks: Vec<MediaNode>,
    pub clips_folder: MediaNode,
    pub lone_clip: MediaNode,
    pub cartoon: MediaNode,
    pub stale_person: MediaNode,
}

impl Fixture {
    pub fn new() -> Self {
        let now = Utc::now();
        let root = MediaNode::new("Root", NodeKind::RootFolder);
        let library =
            MemoryLibrary::new(root.clone()).expect("library assembles");
        let catalog = &library.catalog;

        let movies = MediaNode::new("Movies", NodeKind::CollectionFolder)
            .with_parent(root.id);
        let music = MediaNode::new("Music", NodeKind::CollectionFolder)
            .with_parent(root.id);
        let kids = MediaNode::new("Kids", NodeKind::CollectionFolder)
            .with_parent(root.id);

        let heat = MediaNode::new("Heat", NodeKind::Movie)
            .with_parent(movies.id)
            .with_overview("A crew of thieves.")
            .with_primary_image(true)
            .with_created_at(now - Duration::days(3));
        let heat_trailer = MediaNode::new("Heat trailer", NodeKind::Trailer)
            .with_extra_type(ExtraType::Trailer);
        let heat_featurette =
            MediaNode::new("Making of Heat", NodeKind::Video)
                .with_extra_type(ExtraType::Featurette);
        let heat_theme = MediaNode::new("Heat theme", NodeKind::Audio)
            .with_extra_type(ExtraType::ThemeSong);
        let studio_ident = MediaNode::new("Studio ident", NodeKind::Video);

        let album = MediaNode::new("X", NodeKind::MusicAlbum)
            .with_parent(music.id)
            .with_created_at(now - Duration::days(2));
        let tracks: Vec<MediaNode> = (1..=5)
            .map(|number| {
                MediaNode::new(format!("Track {number}"), NodeKind::Audio)
                    .with_parent(album.id)
                    .with_created_at(now - Duration::hours(number))
            })
            .collect();

        let clips_folder =
            MediaNode::new("Y", NodeKind::Folder).with_parent(movies.id);
        let lone_clip = MediaNode::new("Backyard", NodeKind::Video)
            .with_parent(clips_folder.id)
            .with_created_at(now - Duration::days(1));

        let cartoon = MediaNode::new("Cartoon", NodeKind::Movie)
            .with_parent(kids.id)
            .with_created_at(now - Duration::days(4));

        let stale_person = MediaNode::new("Jane Doe", NodeKind::Person)
            .with_last_refreshed_at(now - Duration::days(10));

        for node in [
            &movies,
            &music,
            &kids,
            &heat,
            &album,
            &clips_folder,
            &lone_clip,
            &cartoon,
            &stale_person,
        ] {
            catalog.insert(node.clone());
        }
        for track in &tracks {
            catalog.insert(track.clone());
        }
        for extra in [&heat_trailer, &heat_featurette, &heat_theme] {
            catalog
                .add_extra(heat.id, extra.clone())
                .expect("extra attaches");
        }
        catalog.add_intro(heat.id, studio_ident.clone());

        // Re-read extras so the fixture carries the stored parent link.
        let heat_trailer = catalog.node(heat_trailer.id).expect("stored");
        let heat_featurette =
            catalog.node(heat_featurette.id).expect("stored");
        let heat_theme = catalog.node(heat_theme.id).expect("stored");

        let alice = User::new(UserId::new(), "alice");
        let bob = User::new(UserId::new(), "bob").with_preferences(
            UserPreferences {
                hide_played_in_latest: true,
            },
        );

        library
            .grants
            .grant(alice.id, LibraryGrant::libraries([movies.id, music.id]));
        library
            .grants
            .grant(bob.id, LibraryGrant::libraries([kids.id]));

        let service = UserLibraryService::new(
            library.unit_of_work().expect("all ports wired"),
            RefreshPolicyConfig::default(),
        );

        Self {
            library,
            service,
            alice,
            bob,
            root,
            movies,
            music,
            kids,
            heat,
            heat_trailer,
            heat_featurette,
            heat_theme,
            studio_ident,
            album,
            tracks,
            clips_folder,
            lone_clip,
            cartoon,
            stale_person,
        }
    }

    /// Registers the fixture users; kept separate so tests can exercise the
    /// unknown-user path.
    pub async fn with_users(self) -> Self {
        self.library.users.insert(self.alice.clone()).await;
        self.library.users.insert(self.bob.clone()).await;
        self
    }
}

pub async fn fixture() -> Fixture {
    Fixture::new().with_users().await
}
