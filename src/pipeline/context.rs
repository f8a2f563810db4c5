use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::error::AppError;
use crate::session::{SessionError, SessionRecord, SessionStore};

/// Response under construction by the pipeline. Converted to the host
/// framework's response type only at the server boundary.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

#[derive(Debug)]
pub enum Body {
    Html(String),
    Redirect(String),
    Empty,
}

impl Response {
    pub fn html(status: StatusCode, body: String) -> Self {
        Self { status, headers: Vec::new(), body: Body::Html(body) }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self { status: StatusCode::FOUND, headers: Vec::new(), body: Body::Redirect(location.into()) }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, headers: Vec::new(), body: Body::Empty }
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Per-request scratch space threaded through the pipeline: route and query
/// parameters, response locals, the session view, and timing state. Owned by
/// exactly one `Pipeline::run` and discarded afterwards.
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub params: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
    pub locals: HashMap<String, Value>,
    pub started_at: Option<Instant>,
    pub failure: Option<AppError>,
    session: SessionView,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            params: HashMap::new(),
            cookies: HashMap::new(),
            locals: HashMap::new(),
            started_at: None,
            failure: None,
            session: SessionView::detached(),
        }
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn set_local(&mut self, key: impl Into<String>, value: Value) {
        self.locals.insert(key.into(), value);
    }

    pub fn session(&self) -> &SessionView {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionView {
        &mut self.session
    }
}

/// The request's transient view of its session. Detached until the session
/// middleware attaches the store; the backing record is created lazily on
/// the first write and committed (or discarded) when the response completes.
pub struct SessionView {
    store: Option<Arc<SessionStore>>,
    record: Option<SessionRecord>,
    fresh: bool,
    dirty: bool,
}

impl SessionView {
    pub(crate) fn detached() -> Self {
        Self { store: None, record: None, fresh: false, dirty: false }
    }

    pub fn attach(&mut self, store: Arc<SessionStore>, record: Option<SessionRecord>) {
        self.store = Some(store);
        self.record = record;
    }

    pub fn is_attached(&self) -> bool {
        self.store.is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.id.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.as_ref().and_then(|r| r.get(key))
    }

    /// First write creates and persists the backing record.
    pub async fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<(), AppError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| AppError::internal("session store not attached to request"))?;
        if self.record.is_none() {
            self.record = Some(store.create().await?);
            self.fresh = true;
        }
        if let Some(record) = self.record.as_mut() {
            record.insert(key, value);
        }
        self.dirty = true;
        Ok(())
    }

    /// Persist pending mutations. Returns the token to hand back to the
    /// client when the record was created during this request.
    pub(crate) async fn commit(&mut self) -> Result<Option<String>, SessionError> {
        let (Some(store), Some(record)) = (self.store.as_ref(), self.record.as_mut()) else {
            return Ok(None);
        };
        if self.dirty {
            record.touch(store.ttl());
            store.save(record).await?;
            self.dirty = false;
        }
        Ok(if self.fresh { Some(record.id.clone()) } else { None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryBackend;
    use serde_json::json;

    #[tokio::test]
    async fn insert_without_attached_store_fails() {
        let mut cx = RequestContext::new(Method::GET, "/");
        let err = cx.session_mut().insert("k", json!(1)).await.expect_err("detached");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn first_write_creates_record_and_commit_reports_token() {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryBackend::new()), 30));
        let mut cx = RequestContext::new(Method::GET, "/");
        cx.session_mut().attach(store.clone(), None);
        assert!(cx.session().id().is_none());

        cx.session_mut().insert("last_viewed", json!("123")).await.expect("write");
        let token = cx.session_mut().commit().await.expect("commit").expect("fresh token");

        let record = store.load(&token).await.expect("load").expect("present");
        assert_eq!(record.get("last_viewed"), Some(&json!("123")));
    }

    #[tokio::test]
    async fn commit_on_existing_record_sets_no_cookie() {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryBackend::new()), 30));
        let existing = store.create().await.expect("create");

        let mut cx = RequestContext::new(Method::GET, "/");
        cx.session_mut().attach(store.clone(), Some(existing.clone()));
        cx.session_mut().insert("k", json!(2)).await.expect("write");
        assert_eq!(cx.session().id(), Some(existing.id.as_str()));
        assert!(cx.session_mut().commit().await.expect("commit").is_none());
    }

    #[tokio::test]
    async fn read_only_request_commits_nothing() {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryBackend::new()), 30));
        let mut cx = RequestContext::new(Method::GET, "/");
        cx.session_mut().attach(store, None);
        assert!(cx.session_mut().commit().await.expect("commit").is_none());
        assert!(cx.session().id().is_none());
    }
}
