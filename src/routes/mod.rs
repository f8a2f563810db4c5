// Router/dispatcher plus the terminal handlers for each page area.
pub mod pages;
pub mod products;
pub mod router;
pub mod testcode;

pub use router::{Router, TerminalHandler};

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::render::Renderer;

/// The full route table. Simple static pages first, then the products area,
/// then the status-echo test route.
pub fn build_router(catalog: Arc<CatalogStore>, renderer: Arc<dyn Renderer>) -> Router {
    Router::new()
        .get("/", Arc::new(pages::HomePage::new(renderer.clone())))
        .get("/about", Arc::new(pages::AboutPage::new(renderer.clone())))
        .get("/products", Arc::new(products::ProductsIndex::new(catalog.clone())))
        .get(
            "/products/:category",
            Arc::new(products::CategoryPage::new(catalog.clone(), renderer.clone())),
        )
        .get(
            "/products/:category/:id",
            Arc::new(products::ItemPage::new(catalog, renderer)),
        )
        .get("/testcode/:code", Arc::new(testcode::TestCode))
}
