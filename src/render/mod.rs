// Rendering contract: one context struct per view, so the rendering
// collaborator's expected fields are statically enumerable.
pub mod classify;
pub mod html;
pub mod views;

pub use classify::{classify, ClassifyingErrorHandler};
pub use html::{HtmlRenderer, Renderer};
pub use views::{
    AboutView, CategoryView, DisplayMode, ErrorView, HomeView, ItemView, NavLink, NotFoundView,
    PageChrome, View,
};
