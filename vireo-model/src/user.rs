//! User identity as seen by the library layer.
//!
//! Accounts are owned by the user directory; this crate only carries the
//! fields the retrieval and personalization code reads.

use crate::ids::UserId;

/// Read-only view of a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    /// Stable account identifier
    pub id: UserId,
    /// Name shown in UI and in access-denied messages
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: UserPreferences,
}

impl User {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            preferences: UserPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = preferences;
        self
    }
}

/// Per-user switches that change how library views are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UserPreferences {
    /// Hide already played items from "latest" rows unless the caller asks
    /// for a specific played state.
    pub hide_played_in_latest: bool,
}
