use std::collections::{HashMap, HashSet};

use rand::Rng;
use uuid::Uuid;

use crate::catalog::model::{Category, Product};
use crate::catalog::CatalogError;

/// Indexed, read-only view of the category forest and its products.
///
/// Built once before serving begins and shared via `Arc` with no locking;
/// every lookup the request path needs is O(1) against indexes built here.
pub struct CatalogStore {
    categories: HashMap<Uuid, Category>,
    by_slug: HashMap<String, Uuid>,
    children: HashMap<Uuid, Vec<Uuid>>,
    products: HashMap<Uuid, Vec<Product>>,
    roots: Vec<Uuid>,
    ordered: Vec<Uuid>,
}

impl CatalogStore {
    /// Root categories in stable slug order, for top-level navigation.
    pub fn root_categories(&self) -> Vec<&Category> {
        self.roots.iter().filter_map(|id| self.categories.get(id)).collect()
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.by_slug.get(slug).and_then(|id| self.categories.get(id))
    }

    /// Direct children of a category, in slug order. Unknown ids are an
    /// error, distinct from a known category with no children.
    pub fn child_categories(&self, category_id: Uuid) -> Result<Vec<&Category>, CatalogError> {
        if !self.categories.contains_key(&category_id) {
            return Err(CatalogError::UnknownCategory(category_id));
        }
        Ok(self
            .children
            .get(&category_id)
            .map(|ids| ids.iter().filter_map(|id| self.categories.get(id)).collect())
            .unwrap_or_default())
    }

    pub fn products_by_category(&self, category_id: Uuid) -> Result<&[Product], CatalogError> {
        if !self.categories.contains_key(&category_id) {
            return Err(CatalogError::UnknownCategory(category_id));
        }
        Ok(self.products.get(&category_id).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Uniform pick over all categories, roots and children alike.
    pub fn random_category(&self) -> Result<&Category, CatalogError> {
        if self.ordered.is_empty() {
            return Err(CatalogError::Empty);
        }
        let idx = rand::thread_rng().gen_range(0..self.ordered.len());
        self.ordered
            .get(idx)
            .and_then(|id| self.categories.get(id))
            .ok_or(CatalogError::Empty)
    }

    /// Joint lookup: the product must exist *under the given category*. A
    /// product id that is valid elsewhere in the catalog is still a miss.
    pub fn product(&self, category_id: Uuid, product_id: u64) -> Option<&Product> {
        self.products
            .get(&category_id)
            .and_then(|list| list.iter().find(|p| p.id == product_id))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Collects definitions and validates the catalog invariants on `build`:
/// unique ids and slugs, parents that exist, an acyclic parent relation,
/// products referencing real categories, non-negative prices.
#[derive(Default)]
pub struct CatalogBuilder {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub fn build(self) -> Result<CatalogStore, CatalogError> {
        let mut categories = HashMap::with_capacity(self.categories.len());
        let mut by_slug = HashMap::with_capacity(self.categories.len());

        for category in self.categories {
            if by_slug.contains_key(&category.slug) {
                return Err(CatalogError::DuplicateSlug(category.slug));
            }
            if categories.contains_key(&category.id) {
                return Err(CatalogError::DuplicateId(category.id));
            }
            by_slug.insert(category.slug.clone(), category.id);
            categories.insert(category.id, category);
        }

        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for category in categories.values() {
            if let Some(parent) = category.parent_id {
                if !categories.contains_key(&parent) {
                    return Err(CatalogError::MissingParent {
                        slug: category.slug.clone(),
                        parent,
                    });
                }
                children.entry(parent).or_default().push(category.id);
            }
        }

        // Walk each parent chain; revisiting a node means a cycle
        for category in categories.values() {
            let mut seen = HashSet::new();
            let mut cursor = category.parent_id;
            seen.insert(category.id);
            while let Some(parent) = cursor {
                if !seen.insert(parent) {
                    return Err(CatalogError::ParentCycle(category.slug.clone()));
                }
                cursor = categories.get(&parent).and_then(|c| c.parent_id);
            }
        }

        let mut products: HashMap<Uuid, Vec<Product>> = HashMap::new();
        for product in self.products {
            if !categories.contains_key(&product.category_id) {
                return Err(CatalogError::OrphanProduct {
                    id: product.id,
                    category_id: product.category_id,
                });
            }
            if product.price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            products.entry(product.category_id).or_default().push(product);
        }

        let slug_of = |id: &Uuid| categories.get(id).map(|c| c.slug.clone()).unwrap_or_default();

        let mut roots: Vec<Uuid> = categories
            .values()
            .filter(|c| c.parent_id.is_none())
            .map(|c| c.id)
            .collect();
        roots.sort_by_key(slug_of);

        for ids in children.values_mut() {
            ids.sort_by_key(slug_of);
        }

        let mut ordered: Vec<Uuid> = categories.keys().copied().collect();
        ordered.sort_by_key(slug_of);

        Ok(CatalogStore { categories, by_slug, children, products, roots, ordered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn category(slug: &str, parent_id: Option<Uuid>) -> Category {
        Category {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            name: slug.to_uppercase(),
            parent_id,
            description: format!("all about {}", slug),
        }
    }

    fn product(id: u64, category_id: Uuid) -> Product {
        Product {
            id,
            category_id,
            name: format!("product {}", id),
            description: "...".to_string(),
            price: Decimal::new(2999, 2),
            image: format!("/images/products/{}.jpg", id),
        }
    }

    #[test]
    fn slug_lookup_and_children_are_referentially_consistent() {
        let root = category("mens", None);
        let child = category("mens-shoes", Some(root.id));
        let store = CatalogBuilder::new()
            .category(root.clone())
            .category(child)
            .product(product(1, root.id))
            .build()
            .expect("valid catalog");

        let found = store.category_by_slug("mens").expect("slug resolves");
        // Anything found by slug must survive the follow-up lookups
        let children = store.child_categories(found.id).expect("known id");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].slug, "mens-shoes");
        let products = store.products_by_category(found.id).expect("known id");
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn unknown_category_id_is_an_error_not_an_empty_list() {
        let store = CatalogBuilder::new().category(category("mens", None)).build().unwrap();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.child_categories(missing),
            Err(CatalogError::UnknownCategory(id)) if id == missing
        ));
        assert!(matches!(
            store.products_by_category(missing),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn cross_category_product_id_never_resolves() {
        let mens = category("mens", None);
        let womens = category("womens", None);
        let store = CatalogBuilder::new()
            .category(mens.clone())
            .category(womens.clone())
            .product(product(123, mens.id))
            .build()
            .unwrap();

        assert!(store.product(mens.id, 123).is_some());
        // 123 exists, but under mens; requesting it under womens is a miss
        assert!(store.product(womens.id, 123).is_none());
    }

    #[test]
    fn random_category_fails_on_empty_catalog() {
        let store = CatalogBuilder::new().build().unwrap();
        assert!(matches!(store.random_category(), Err(CatalogError::Empty)));
    }

    #[test]
    fn random_category_returns_a_known_category() {
        let store = CatalogBuilder::new()
            .category(category("a", None))
            .category(category("b", None))
            .build()
            .unwrap();
        for _ in 0..10 {
            let picked = store.random_category().expect("non-empty");
            assert!(store.category_by_slug(&picked.slug).is_some());
        }
    }

    #[test]
    fn root_order_is_stable_by_slug() {
        let store = CatalogBuilder::new()
            .category(category("zeta", None))
            .category(category("alpha", None))
            .category(category("mid", None))
            .build()
            .unwrap();
        let slugs: Vec<_> = store.root_categories().iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn duplicate_slug_rejected() {
        let result = CatalogBuilder::new()
            .category(category("mens", None))
            .category(category("mens", None))
            .build();
        assert!(matches!(result, Err(CatalogError::DuplicateSlug(_))));
    }

    #[test]
    fn parent_cycle_rejected() {
        let mut a = category("a", None);
        let mut b = category("b", None);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let result = CatalogBuilder::new().category(a).category(b).build();
        assert!(matches!(result, Err(CatalogError::ParentCycle(_))));
    }

    #[test]
    fn orphan_product_rejected() {
        let result = CatalogBuilder::new()
            .category(category("mens", None))
            .product(product(9, Uuid::new_v4()))
            .build();
        assert!(matches!(result, Err(CatalogError::OrphanProduct { .. })));
    }

    #[test]
    fn negative_price_rejected() {
        let cat = category("mens", None);
        let mut item = product(9, cat.id);
        item.price = Decimal::new(-100, 2);
        let result = CatalogBuilder::new().category(cat).product(item).build();
        assert!(matches!(result, Err(CatalogError::NegativePrice(9))));
    }
}
