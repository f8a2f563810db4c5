// The products area: random redirect, category view, item view.
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;

use crate::catalog::CatalogStore;
use crate::error::AppError;
use crate::pipeline::{RequestContext, Response};
use crate::render::{CategoryView, DisplayMode, ItemView, PageChrome, Renderer, View};
use crate::routes::router::TerminalHandler;

/// GET /products - redirect to a random category's page.
pub struct ProductsIndex {
    catalog: Arc<CatalogStore>,
}

impl ProductsIndex {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl TerminalHandler for ProductsIndex {
    fn name(&self) -> &'static str {
        "products-index"
    }

    async fn call(&self, _cx: &mut RequestContext) -> Result<Response, AppError> {
        let category = self.catalog.random_category()?;
        Ok(Response::redirect(format!("/products/{}", category.slug)))
    }
}

/// GET /products/:category - a category with its subcategories and products.
pub struct CategoryPage {
    catalog: Arc<CatalogStore>,
    renderer: Arc<dyn Renderer>,
}

impl CategoryPage {
    pub fn new(catalog: Arc<CatalogStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self { catalog, renderer }
    }
}

#[async_trait]
impl TerminalHandler for CategoryPage {
    fn name(&self) -> &'static str {
        "products-category"
    }

    async fn call(&self, cx: &mut RequestContext) -> Result<Response, AppError> {
        let slug = cx
            .param("category")
            .ok_or_else(|| AppError::internal("missing route param 'category'"))?
            .to_string();
        let display = DisplayMode::from_query(cx.query("display"))?;

        let category = self
            .catalog
            .category_by_slug(&slug)
            .ok_or_else(|| AppError::CategoryNotFound(slug.clone()))?
            .clone();

        let subcategories: Vec<_> =
            self.catalog.child_categories(category.id)?.into_iter().cloned().collect();
        let products = self.catalog.products_by_category(category.id)?.to_vec();

        let view = View::Category(CategoryView {
            title: format!("Exploring {}", category.name),
            display,
            has_products: !products.is_empty(),
            has_subcategories: !subcategories.is_empty(),
            category,
            subcategories,
            products,
        });
        let chrome = PageChrome::from_locals(&cx.locals);
        Ok(Response::html(StatusCode::OK, self.renderer.render(&view, &chrome)))
    }
}

/// GET /products/:category/:id - a single item, looked up jointly by
/// category and numeric id. Also remembers the item in the session.
pub struct ItemPage {
    catalog: Arc<CatalogStore>,
    renderer: Arc<dyn Renderer>,
}

impl ItemPage {
    pub fn new(catalog: Arc<CatalogStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self { catalog, renderer }
    }
}

#[async_trait]
impl TerminalHandler for ItemPage {
    fn name(&self) -> &'static str {
        "products-item"
    }

    async fn call(&self, cx: &mut RequestContext) -> Result<Response, AppError> {
        let slug = cx
            .param("category")
            .ok_or_else(|| AppError::internal("missing route param 'category'"))?
            .to_string();
        let raw_id = cx
            .param("id")
            .ok_or_else(|| AppError::internal("missing route param 'id'"))?
            .to_string();
        let id: u64 = raw_id.parse().map_err(|_| {
            AppError::invalid_parameter(format!("Invalid item id '{}': must be numeric", raw_id))
        })?;

        let category = self
            .catalog
            .category_by_slug(&slug)
            .ok_or_else(|| AppError::CategoryNotFound(slug.clone()))?
            .clone();
        let product = self
            .catalog
            .product(category.id, id)
            .ok_or_else(|| AppError::ProductNotFound { category: slug.clone(), id })?
            .clone();

        let sort = cx.query("sort").map(str::to_string);
        let filter = cx.query("filter").map(str::to_string);

        cx.session_mut()
            .insert("last_viewed", json!(format!("{}/{}", slug, id)))
            .await?;

        let view = View::Item(ItemView {
            title: format!("Exploring {}", category.name),
            category,
            product,
            sort,
            filter,
        });
        let chrome = PageChrome::from_locals(&cx.locals);
        Ok(Response::html(StatusCode::OK, self.renderer.render(&view, &chrome)))
    }
}
