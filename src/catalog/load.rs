// Bulk catalog load from a backing Postgres store.
use sqlx::{PgPool, Row};

use crate::catalog::model::{Category, Product};
use crate::catalog::store::{CatalogBuilder, CatalogStore};
use crate::catalog::CatalogError;

/// Read the full category forest and product list at startup. The result is
/// validated by the builder exactly like the static seed; a catalog that
/// fails its invariants aborts startup rather than serving bad navigation.
pub async fn from_postgres(pool: &PgPool) -> Result<CatalogStore, CatalogError> {
    let mut builder = CatalogBuilder::new();

    let rows = sqlx::query("SELECT id, slug, name, parent_id, description FROM categories")
        .fetch_all(pool)
        .await?;
    for row in rows {
        builder = builder.category(Category {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            parent_id: row.try_get("parent_id")?,
            description: row.try_get("description")?,
        });
    }

    let rows = sqlx::query("SELECT id, category_id, name, description, price, image FROM products")
        .fetch_all(pool)
        .await?;
    for row in rows {
        let raw_id: i64 = row.try_get("id")?;
        let id = u64::try_from(raw_id).map_err(|_| CatalogError::InvalidProductId(raw_id))?;
        builder = builder.product(Product {
            id,
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            image: row.try_get("image")?,
        });
    }

    let store = builder.build()?;
    tracing::info!(
        categories = store.category_count(),
        products = store.product_count(),
        "catalog loaded from database"
    );
    Ok(store)
}
