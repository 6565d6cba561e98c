//! Projected representations handed to transports.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::ModelError;
use crate::ids::NodeId;
use crate::node::{ExtraType, NodeKind};
use crate::personalization::PersonalizationRecordView;

/// Optional fields a caller can ask the projector to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemField {
    Overview,
    ParentId,
    DateCreated,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Overview => "Overview",
            ItemField::ParentId => "ParentId",
            ItemField::DateCreated => "DateCreated",
        }
    }
}

impl Display for ItemField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemField {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(ItemField::Overview),
            "parentid" => Ok(ItemField::ParentId),
            "datecreated" => Ok(ItemField::DateCreated),
            _ => Err(ModelError::UnknownItemField(raw.to_string())),
        }
    }
}

/// Knobs for building an [`ItemView`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewOptions {
    pub fields: BTreeSet<ItemField>,
    pub enable_images: bool,
    pub enable_user_data: bool,
    pub image_type_limit: Option<u32>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            fields: [ItemField::Overview, ItemField::ParentId]
                .into_iter()
                .collect(),
            enable_images: true,
            enable_user_data: true,
            image_type_limit: None,
        }
    }
}

impl ViewOptions {
    pub fn contains_field(&self, field: ItemField) -> bool {
        self.fields.contains(&field)
    }

    /// Images are reported unless disabled outright or limited to zero.
    pub fn images_enabled(&self) -> bool {
        self.enable_images && self.image_type_limit != Some(0)
    }
}

/// Projected item returned by every lookup operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemView {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub is_folder: bool,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub overview: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub parent_id: Option<NodeId>,
    /// Node the item was reached through (extras and trailers only).
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub ancestor_id: Option<NodeId>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub extra_type: Option<ExtraType>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub date_created: Option<DateTime<Utc>>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub has_primary_image: Option<bool>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub child_count: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub user_data: Option<PersonalizationRecordView>,
}

/// List payload with the total number of records.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    pub total_record_count: usize,
}

impl<T> QueryResult<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total_record_count = items.len();
        Self {
            items,
            total_record_count,
        }
    }
}
