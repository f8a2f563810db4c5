use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub session: SessionConfig,
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_days: i64,
    pub cookie_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Mode defaults first, then per-variable overrides
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.port = v.parse().unwrap_or(self.port);
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_DAYS") {
            self.session.ttl_days = v.parse().unwrap_or(self.session.ttl_days);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database_url = Some(v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            port: 3000,
            session: SessionConfig {
                secret: "default-secret-change-in-production".to_string(),
                ttl_days: 30,
                cookie_name: "sessionId".to_string(),
            },
            database_url: None,
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            port: 3000,
            session: SessionConfig {
                secret: "default-secret-change-in-production".to_string(),
                ttl_days: 30,
                cookie_name: "sessionId".to_string(),
            },
            database_url: None,
        }
    }
}
