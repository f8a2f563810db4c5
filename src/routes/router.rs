use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;

use crate::error::AppError;
use crate::pipeline::{Handler, Outcome, RequestContext, Response};

/// A handler that produces the final response for a matched route.
#[async_trait]
pub trait TerminalHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn call(&self, cx: &mut RequestContext) -> Result<Response, AppError>;
}

enum Segment {
    Literal(String),
    Param(String),
}

struct Route {
    method: Method,
    segments: Vec<Segment>,
    terminal: Arc<dyn TerminalHandler>,
}

/// Method+path dispatcher, registered as the last ordinary handler in the
/// pipeline. Patterns use `:name` segments; an unmatched request falls
/// through with `Continue` so the pipeline's catch-all 404 fires.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(self, pattern: &str, terminal: Arc<dyn TerminalHandler>) -> Self {
        self.route(Method::GET, pattern, terminal)
    }

    pub fn route(mut self, method: Method, pattern: &str, terminal: Arc<dyn TerminalHandler>) -> Self {
        let segments = split(pattern)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        self.routes.push(Route { method, segments, terminal });
        self
    }

    fn match_route(&self, method: &Method, path: &str) -> Option<(&Route, HashMap<String, String>)> {
        let parts: Vec<&str> = split(path).collect();
        'routes: for route in &self.routes {
            if route.method != *method || route.segments.len() != parts.len() {
                continue;
            }
            let mut params = HashMap::new();
            for (segment, part) in route.segments.iter().zip(&parts) {
                match segment {
                    Segment::Literal(lit) if lit.as_str() == *part => {}
                    Segment::Literal(_) => continue 'routes,
                    Segment::Param(name) => {
                        params.insert(name.clone(), (*part).to_string());
                    }
                }
            }
            return Some((route, params));
        }
        None
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[async_trait]
impl Handler for Router {
    fn name(&self) -> &'static str {
        "router"
    }

    async fn handle(&self, cx: &mut RequestContext) -> Outcome {
        let Some((route, params)) = self.match_route(&cx.method, &cx.path) else {
            return Outcome::Continue;
        };
        tracing::debug!(
            method = %cx.method,
            path = %cx.path,
            terminal = route.terminal.name(),
            "route matched"
        );
        cx.params = params;
        match route.terminal.call(cx).await {
            Ok(response) => Outcome::Respond(response),
            Err(err) => Outcome::Fail(err),
        }
    }
}
