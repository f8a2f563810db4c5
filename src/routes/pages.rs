// Static marketing pages: no data fetching, just a rendered context.
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::error::AppError;
use crate::pipeline::{RequestContext, Response};
use crate::render::{AboutView, HomeView, PageChrome, Renderer, View};
use crate::routes::router::TerminalHandler;

pub struct HomePage {
    renderer: Arc<dyn Renderer>,
}

impl HomePage {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl TerminalHandler for HomePage {
    fn name(&self) -> &'static str {
        "home"
    }

    async fn call(&self, cx: &mut RequestContext) -> Result<Response, AppError> {
        let view = View::Home(HomeView {
            title: "Home".to_string(),
            content: "Welcome to our website! Explore our products and services.".to_string(),
        });
        let chrome = PageChrome::from_locals(&cx.locals);
        Ok(Response::html(StatusCode::OK, self.renderer.render(&view, &chrome)))
    }
}

pub struct AboutPage {
    renderer: Arc<dyn Renderer>,
}

impl AboutPage {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl TerminalHandler for AboutPage {
    fn name(&self) -> &'static str {
        "about"
    }

    async fn call(&self, cx: &mut RequestContext) -> Result<Response, AppError> {
        let view = View::About(AboutView { title: "About".to_string() });
        let chrome = PageChrome::from_locals(&cx.locals);
        Ok(Response::html(StatusCode::OK, self.renderer.render(&view, &chrome)))
    }
}
