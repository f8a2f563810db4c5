use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SessionConfig;
use crate::pipeline::{Handler, Outcome, RequestContext, Response};
use crate::session::{cookie, SessionStore};

/// Attaches the visitor's session to the request and commits it when the
/// response completes. The backing record is only created once a handler
/// writes to session state; a brand-new record hands its signed token back
/// via Set-Cookie.
pub struct SessionMiddleware {
    store: Arc<SessionStore>,
    secret: String,
    cookie_name: String,
}

impl SessionMiddleware {
    pub fn new(store: Arc<SessionStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            secret: config.secret.clone(),
            cookie_name: config.cookie_name.clone(),
        }
    }
}

#[async_trait]
impl Handler for SessionMiddleware {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn handle(&self, cx: &mut RequestContext) -> Outcome {
        // A missing, tampered, or expired cookie all mean "no session yet"
        let token = cx
            .cookie(&self.cookie_name)
            .and_then(|value| cookie::decode(&self.secret, value));

        let record = match token {
            Some(token) => match self.store.load(&token).await {
                Ok(record) => record,
                Err(err) => return Outcome::Fail(err.into()),
            },
            None => None,
        };

        cx.session_mut().attach(self.store.clone(), record);
        Outcome::Continue
    }

    async fn finalize(&self, cx: &mut RequestContext, response: &mut Response) {
        match cx.session_mut().commit().await {
            Ok(Some(token)) => {
                let max_age = self.store.ttl().num_seconds().max(0);
                response.set_header(
                    "set-cookie",
                    format!(
                        "{}={}; Path=/; HttpOnly; Max-Age={}",
                        self.cookie_name,
                        cookie::encode(&self.secret, &token),
                        max_age
                    ),
                );
            }
            Ok(None) => {}
            // The response is already built; a failed commit must not
            // corrupt it. The mutation is discarded.
            Err(err) => tracing::error!("session commit failed: {}", err),
        }
    }
}
