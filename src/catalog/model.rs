use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node in the category forest. `parent_id = None` marks a root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub description: String,
}

/// A catalog item. Belongs to exactly one category; ids are numeric in URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
}
