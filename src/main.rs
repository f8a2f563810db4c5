use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use shopfront::catalog::{self, CatalogStore};
use shopfront::config::AppConfig;
use shopfront::render::{HtmlRenderer, Renderer};
use shopfront::server;
use shopfront::session::{MemoryBackend, PostgresBackend, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("starting shopfront in {:?} mode", config.environment);

    let (catalog, sessions) = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .context("failed to connect to database")?;

            let backend = PostgresBackend::new(pool.clone());
            backend.ensure_table().await.context("failed to prepare session table")?;

            let catalog = catalog::load::from_postgres(&pool)
                .await
                .context("failed to load catalog")?;
            let sessions = SessionStore::new(Arc::new(backend), config.session.ttl_days);
            (Arc::new(catalog), Arc::new(sessions))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; using the sample catalog and in-memory sessions"
            );
            let catalog: CatalogStore = catalog::seed::sample()?;
            let sessions =
                SessionStore::new(Arc::new(MemoryBackend::new()), config.session.ttl_days);
            (Arc::new(catalog), Arc::new(sessions))
        }
    };

    tracing::info!(
        categories = catalog.category_count(),
        products = catalog.product_count(),
        "catalog ready"
    );

    let renderer: Arc<dyn Renderer> = Arc::new(HtmlRenderer);
    let pipeline = Arc::new(server::build_pipeline(catalog, sessions, renderer, &config));
    let app = server::app(pipeline);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("shopfront listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
