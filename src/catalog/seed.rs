// Built-in sample catalog, used when no backing database is configured.
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::model::{Category, Product};
use crate::catalog::store::{CatalogBuilder, CatalogStore};
use crate::catalog::CatalogError;

/// A depth-1 forest: three root categories with their items.
pub fn sample() -> Result<CatalogStore, CatalogError> {
    let mens = Uuid::new_v4();
    let womens = Uuid::new_v4();
    let accessories = Uuid::new_v4();

    let mut builder = CatalogBuilder::new()
        .category(root(mens, "mens", "Men's Clothing", "Explore our collection of men's fashion"))
        .category(root(womens, "womens", "Women's Clothing", "Discover our women's fashion line"))
        .category(root(
            accessories,
            "accessories",
            "Accessories",
            "Complete your look with our accessories",
        ));

    let items = [
        (mens, 123, "Classic T-Shirt", 2999),
        (mens, 124, "Denim Jeans", 8999),
        (mens, 125, "Leather Jacket", 29999),
        (womens, 231, "Summer Dress", 5999),
        (womens, 232, "Blouse", 4999),
        (womens, 233, "High Heels", 9999),
        (accessories, 331, "Leather Belt", 3999),
        (accessories, 332, "Sunglasses", 7999),
        (accessories, 333, "Watch", 19999),
    ];

    for (category_id, id, name, cents) in items {
        builder = builder.product(Product {
            id,
            category_id,
            name: name.to_string(),
            description: "...".to_string(),
            price: Decimal::new(cents, 2),
            image: format!("/images/products/{}.jpg", id),
        });
    }

    builder.build()
}

fn root(id: Uuid, slug: &str, name: &str, description: &str) -> Category {
    Category {
        id,
        slug: slug.to_string(),
        name: name.to_string(),
        parent_id: None,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_is_valid_and_populated() {
        let store = sample().expect("seed catalog passes validation");
        assert_eq!(store.category_count(), 3);
        assert_eq!(store.product_count(), 9);

        let mens = store.category_by_slug("mens").expect("mens exists");
        assert!(store.product(mens.id, 123).is_some());
        assert!(store.child_categories(mens.id).expect("known id").is_empty());
    }
}
