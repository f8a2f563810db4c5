// Hierarchical catalog: read-only after construction, shared across requests
pub mod load;
pub mod model;
pub mod seed;
pub mod store;

pub use model::{Category, Product};
pub use store::{CatalogBuilder, CatalogStore};

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown category: {0}")]
    UnknownCategory(Uuid),

    #[error("catalog is empty")]
    Empty,

    #[error("duplicate category slug '{0}'")]
    DuplicateSlug(String),

    #[error("duplicate category id {0}")]
    DuplicateId(Uuid),

    #[error("category '{slug}' references missing parent {parent}")]
    MissingParent { slug: String, parent: Uuid },

    #[error("category parent cycle involving '{0}'")]
    ParentCycle(String),

    #[error("product {id} references missing category {category_id}")]
    OrphanProduct { id: u64, category_id: Uuid },

    #[error("product {0} has a negative price")]
    NegativePrice(u64),

    #[error("product row has invalid id {0}")]
    InvalidProductId(i64),

    #[error("catalog load failed: {0}")]
    Load(#[from] sqlx::Error),
}
