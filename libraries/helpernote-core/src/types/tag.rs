//! Tags: coloured labels attached to customers and postings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::UserId;

pub type TagId = i64;

/// Colour given to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#3b82f6";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub user_id: UserId,
    pub tag_name: String,
    pub tag_color: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub deleted_at: Option<NaiveDateTime>,
}

/// Data for creating a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateTag {
    #[validate(custom(
        function = "crate::validation::not_blank",
        message = "태그 이름을 입력해주세요"
    ))]
    pub tag_name: String,
    #[validate(regex(
        path = *crate::validation::HEX_COLOR,
        message = "색상은 #RRGGBB 형식이어야 합니다"
    ))]
    pub tag_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateTag {
    /// A tag with the default colour and no description.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            tag_color: DEFAULT_TAG_COLOR.to_string(),
            description: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.tag_color = color.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /api/customers/{id}/tags`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachTags {
    pub tag_ids: Vec<TagId>,
}
