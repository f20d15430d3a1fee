//! Category DTOs for API requests and responses.

use crate::models::{Category, NewCategory};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or replacing a category.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Category name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Music")]
    pub category_name: String,
    pub category_note: Option<String>,
}

impl CategoryRequest {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            category_name: self.category_name,
            category_note: self.category_note,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category_id: i64,
    pub category_name: String,
    pub category_note: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.category_id,
            category_name: category.category_name,
            category_note: category.category_note,
        }
    }
}
