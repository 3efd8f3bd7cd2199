use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: i64,
    pub name: String,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}

/// How many units of a product the current article stocks allow to sell.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductAvailability {
    pub id: i64,
    pub name: String,
    pub availability: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleStock {
    pub id: i64,
    pub name: String,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequirementDetail {
    pub quantity: i64,
    pub article: ArticleStock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub id: i64,
    pub name: String,
    pub requirements: Vec<RequirementDetail>,
}
