//! Query-string parameters shared by the item handlers.

use serde::Deserialize;
use uuid::Uuid;
use vireo_model::{
    ItemField, LatestItemsQuery, ModelError, NodeId, NodeKind, ViewOptions,
};

use crate::infra::errors::AppError;

/// Projection knobs accepted by every endpoint returning items.
///
/// `fields` replaces the default field set when present; an empty value
/// requests no optional fields.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ViewParams {
    pub fields: Option<String>,
    pub enable_images: Option<bool>,
    pub enable_user_data: Option<bool>,
    pub image_type_limit: Option<u32>,
}

impl ViewParams {
    pub fn into_options(self) -> Result<ViewOptions, AppError> {
        let defaults = ViewOptions::default();
        let fields = match self.fields {
            Some(raw) => parse_list::<ItemField>(&raw)?.into_iter().collect(),
            None => defaults.fields,
        };

        Ok(ViewOptions {
            fields,
            enable_images: self.enable_images.unwrap_or(defaults.enable_images),
            enable_user_data: self
                .enable_user_data
                .unwrap_or(defaults.enable_user_data),
            image_type_limit: self.image_type_limit,
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LatestParams {
    pub parent_id: Option<Uuid>,
    pub include_item_types: Option<String>,
    pub is_played: Option<bool>,
    pub is_folder: Option<bool>,
    pub limit: Option<usize>,
    pub group_items: Option<bool>,
}

impl LatestParams {
    /// `default_limit` applies when the request names no limit.
    pub fn into_query(
        self,
        default_limit: usize,
    ) -> Result<LatestItemsQuery, AppError> {
        let include_kinds = match self.include_item_types {
            Some(raw) => parse_list::<NodeKind>(&raw)?,
            None => Vec::new(),
        };

        Ok(LatestItemsQuery {
            parent_id: self.parent_id.map(NodeId::from),
            include_kinds: include_kinds.into_iter().collect(),
            is_played: self.is_played,
            is_folder: self.is_folder,
            limit: self.limit.unwrap_or(default_limit),
            group_items: self.group_items.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingParams {
    pub likes: bool,
}

fn parse_list<T>(raw: &str) -> Result<Vec<T>, AppError>
where
    T: std::str::FromStr<Err = ModelError>,
{
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<T>().map_err(AppError::from))
        .collect()
}
