use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde_json::{json, Value};

use crate::catalog::CatalogStore;
use crate::pipeline::{Handler, Outcome, RequestContext};

/// Attaches display values every page shares: the current year and the root
/// categories for top-level navigation.
pub struct GlobalsMiddleware {
    catalog: Arc<CatalogStore>,
}

impl GlobalsMiddleware {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Handler for GlobalsMiddleware {
    fn name(&self) -> &'static str {
        "globals"
    }

    async fn handle(&self, cx: &mut RequestContext) -> Outcome {
        cx.set_local("current_year", json!(Utc::now().year()));
        let nav: Vec<Value> = self
            .catalog
            .root_categories()
            .iter()
            .map(|c| json!({ "slug": c.slug, "name": c.name }))
            .collect();
        cx.set_local("nav_categories", Value::Array(nav));
        Outcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;
    use axum::http::Method;

    #[tokio::test]
    async fn attaches_navigation_in_slug_order() {
        let catalog = Arc::new(seed::sample().expect("seed"));
        let middleware = GlobalsMiddleware::new(catalog);
        let mut cx = RequestContext::new(Method::GET, "/");

        assert!(matches!(middleware.handle(&mut cx).await, Outcome::Continue));
        let nav = cx.locals.get("nav_categories").expect("nav attached");
        let slugs: Vec<_> = nav
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|v| v.get("slug").and_then(Value::as_str))
            .collect();
        assert_eq!(slugs, vec!["accessories", "mens", "womens"]);
        assert!(cx.locals.contains_key("current_year"));
    }

    #[tokio::test]
    async fn attached_locals_round_trip_into_page_chrome() {
        let catalog = Arc::new(seed::sample().expect("seed"));
        let middleware = GlobalsMiddleware::new(catalog);
        let mut cx = RequestContext::new(Method::GET, "/");
        assert!(matches!(middleware.handle(&mut cx).await, Outcome::Continue));

        let chrome = crate::render::PageChrome::from_locals(&cx.locals);
        assert_eq!(chrome.nav.len(), 3);
        assert_eq!(chrome.year, Some(Utc::now().year()));
    }
}
