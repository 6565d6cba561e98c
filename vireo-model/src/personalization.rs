//! Per-user, per-node state: favorite flag, like/dislike rating and played
//! state.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};

use crate::ids::NodeId;

/// Stored personalization state for one (user, node) pair.
///
/// Records are created lazily; the `Default` value is what a user who never
/// touched the node sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PersonalizationRecord {
    pub is_favorite: bool,
    /// `None` = not rated, `Some(true)` = liked, `Some(false)` = disliked.
    pub likes: Option<bool>,
    pub played: bool,
    pub play_count: u32,
    pub last_played_at: Option<DateTime<Utc>>,
}

impl PersonalizationRecord {
    pub fn to_view(&self, item_id: NodeId) -> PersonalizationRecordView {
        PersonalizationRecordView {
            item_id,
            is_favorite: self.is_favorite,
            likes: self.likes,
            played: self.played,
            play_count: self.play_count,
            last_played_at: self.last_played_at,
        }
    }
}

/// Outward-facing copy of a [`PersonalizationRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonalizationRecordView {
    pub item_id: NodeId,
    pub is_favorite: bool,
    pub likes: Option<bool>,
    pub played: bool,
    pub play_count: u32,
    pub last_played_at: Option<DateTime<Utc>>,
}

/// Why a personalization record is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaveReason {
    /// Favorite flag or like/dislike rating changed
    UpdateUserRating,
    PlaybackProgress,
    TogglePlayed,
    Import,
}

impl SaveReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveReason::UpdateUserRating => "UpdateUserRating",
            SaveReason::PlaybackProgress => "PlaybackProgress",
            SaveReason::TogglePlayed => "TogglePlayed",
            SaveReason::Import => "Import",
        }
    }
}

impl Display for SaveReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
