use std::collections::HashMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::catalog::{Category, Product};
use crate::error::AppError;

/// Every rendering case the core can produce.
#[derive(Debug, Clone, Serialize)]
pub enum View {
    Home(HomeView),
    About(AboutView),
    Category(CategoryView),
    Item(ItemView),
    NotFound(NotFoundView),
    Error(ErrorView),
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AboutView {
    pub title: String,
}

/// Context for the products-category page. The category serializes as
/// `categoryData`, the name the page template binds to.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub title: String,
    pub display: DisplayMode,
    #[serde(rename = "categoryData")]
    pub category: Category,
    pub subcategories: Vec<Category>,
    pub products: Vec<Product>,
    pub has_products: bool,
    pub has_subcategories: bool,
}

/// Context for the products-item page. The page template addresses the
/// product as both `item` and `product`, so serialization emits it under
/// both names.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub title: String,
    pub category: Category,
    pub product: Product,
    pub sort: Option<String>,
    pub filter: Option<String>,
}

impl Serialize for ItemView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ItemView", 6)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("item", &self.product)?;
        state.serialize_field("product", &self.product)?;
        state.serialize_field("sort", &self.sort)?;
        state.serialize_field("filter", &self.filter)?;
        state.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundView {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
    pub status_code: u16,
    pub cause: Option<String>,
}

/// Shared page furniture rendered around every view: the top-level
/// navigation links and the footer year. Built from the request locals the
/// globals middleware fills in; an empty locals map yields empty chrome.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageChrome {
    pub year: Option<i32>,
    pub nav: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub slug: String,
    pub name: String,
}

impl PageChrome {
    pub fn from_locals(locals: &HashMap<String, Value>) -> Self {
        let year = locals
            .get("current_year")
            .and_then(Value::as_i64)
            .map(|y| y as i32);
        let nav = locals
            .get("nav_categories")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        let slug = entry.get("slug").and_then(Value::as_str)?;
                        let name = entry.get("name").and_then(Value::as_str)?;
                        Some(NavLink { slug: slug.to_string(), name: name.to_string() })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { year, nav }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Grid,
    Details,
}

impl DisplayMode {
    /// Parse the `display` query parameter; absent means grid.
    pub fn from_query(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            None | Some("grid") => Ok(DisplayMode::Grid),
            Some("details") => Ok(DisplayMode::Details),
            Some(other) => Err(AppError::invalid_parameter(format!(
                "Invalid display mode '{}': must be either \"grid\" or \"details\"",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Grid => "grid",
            DisplayMode::Details => "details",
        }
    }
}
