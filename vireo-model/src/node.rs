//! Catalog nodes and their kind tags.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::ModelError;
use crate::ids::NodeId;

/// Kind tag for a catalog node.
///
/// Behaviour that differs per kind is expressed through the capability
/// methods below rather than per-kind types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    RootFolder,
    CollectionFolder,
    Folder,
    Person,
    Movie,
    Series,
    Season,
    Episode,
    MusicArtist,
    MusicAlbum,
    Audio,
    MusicVideo,
    BoxSet,
    Trailer,
    Video,
}

impl NodeKind {
    pub const ALL: [NodeKind; 15] = [
        NodeKind::RootFolder,
        NodeKind::CollectionFolder,
        NodeKind::Folder,
        NodeKind::Person,
        NodeKind::Movie,
        NodeKind::Series,
        NodeKind::Season,
        NodeKind::Episode,
        NodeKind::MusicArtist,
        NodeKind::MusicAlbum,
        NodeKind::Audio,
        NodeKind::MusicVideo,
        NodeKind::BoxSet,
        NodeKind::Trailer,
        NodeKind::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::RootFolder => "RootFolder",
            NodeKind::CollectionFolder => "CollectionFolder",
            NodeKind::Folder => "Folder",
            NodeKind::Person => "Person",
            NodeKind::Movie => "Movie",
            NodeKind::Series => "Series",
            NodeKind::Season => "Season",
            NodeKind::Episode => "Episode",
            NodeKind::MusicArtist => "MusicArtist",
            NodeKind::MusicAlbum => "MusicAlbum",
            NodeKind::Audio => "Audio",
            NodeKind::MusicVideo => "MusicVideo",
            NodeKind::BoxSet => "BoxSet",
            NodeKind::Trailer => "Trailer",
            NodeKind::Video => "Video",
        }
    }

    pub fn is_root_folder(&self) -> bool {
        matches!(self, NodeKind::RootFolder)
    }

    pub fn is_music_album(&self) -> bool {
        matches!(self, NodeKind::MusicAlbum)
    }

    /// Container kinds that hold other nodes rather than playable media.
    pub fn is_folder(&self) -> bool {
        matches!(
            self,
            NodeKind::RootFolder
                | NodeKind::CollectionFolder
                | NodeKind::Folder
                | NodeKind::Series
                | NodeKind::Season
                | NodeKind::MusicArtist
                | NodeKind::MusicAlbum
                | NodeKind::BoxSet
        )
    }

    /// Kinds that can own trailers stored alongside them.
    pub fn supports_local_trailers(&self) -> bool {
        matches!(
            self,
            NodeKind::Movie
                | NodeKind::Series
                | NodeKind::Season
                | NodeKind::Episode
                | NodeKind::MusicVideo
                | NodeKind::BoxSet
        )
    }

    /// Kinds whose metadata is repaired synchronously when looked up.
    pub fn refreshes_on_demand(&self) -> bool {
        matches!(self, NodeKind::Person)
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownNodeKind(raw.to_string()))
    }
}

/// Category of an extra attached to another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtraType {
    Trailer,
    BehindTheScenes,
    DeletedScene,
    Featurette,
    Interview,
    Scene,
    Short,
    Clip,
    Sample,
    ThemeSong,
    ThemeVideo,
    Unknown,
}

impl ExtraType {
    /// Extras listed under "special features". Trailers and theme media
    /// have their own surfaces.
    pub fn is_special_feature(&self) -> bool {
        !matches!(
            self,
            ExtraType::Trailer | ExtraType::ThemeSong | ExtraType::ThemeVideo
        )
    }
}

impl Display for ExtraType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExtraType::Trailer => write!(f, "Trailer"),
            ExtraType::BehindTheScenes => write!(f, "Behind the Scenes"),
            ExtraType::DeletedScene => write!(f, "Deleted Scene"),
            ExtraType::Featurette => write!(f, "Featurette"),
            ExtraType::Interview => write!(f, "Interview"),
            ExtraType::Scene => write!(f, "Scene"),
            ExtraType::Short => write!(f, "Short"),
            ExtraType::Clip => write!(f, "Clip"),
            ExtraType::Sample => write!(f, "Sample"),
            ExtraType::ThemeSong => write!(f, "Theme Song"),
            ExtraType::ThemeVideo => write!(f, "Theme Video"),
            ExtraType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A node in the media catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_primary_image: bool,
    pub last_refreshed_at: DateTime<Utc>,
    /// When the node entered the catalog; "latest" rows sort on this.
    pub created_at: DateTime<Utc>,
    /// Lookup-only link to the containing node. The catalog owns the
    /// relation; nothing here keeps the parent alive.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_id: Option<NodeId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_type: Option<ExtraType>,
}

impl MediaNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        let now = Utc::now();
        Self {
            id: NodeId::new(),
            name: name.into(),
            kind,
            overview: None,
            has_primary_image: false,
            last_refreshed_at: now,
            created_at: now,
            parent_id: None,
            extra_type: None,
        }
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    pub fn with_parent(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    pub fn with_primary_image(mut self, has_primary_image: bool) -> Self {
        self.has_primary_image = has_primary_image;
        self
    }

    pub fn with_last_refreshed_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_refreshed_at = at;
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn with_extra_type(mut self, extra_type: ExtraType) -> Self {
        self.extra_type = Some(extra_type);
        self
    }

    /// Overview text is present and not just whitespace.
    pub fn has_overview(&self) -> bool {
        self.overview
            .as_deref()
            .is_some_and(|overview| !overview.trim().is_empty())
    }

    pub fn is_extra(&self) -> bool {
        self.extra_type.is_some()
    }
}
