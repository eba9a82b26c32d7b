use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::post_service::PostService;
use crate::application::tag_service::TagService;
use crate::data::post_repository::PostRepository;
use crate::data::repositories::memory::{MemorySeed, MemoryStore};
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::tag_repository::PostgresTagRepository;
use crate::data::tag_repository::TagRepository;
use crate::infrastructure::database::create_pool;
use crate::infrastructure::settings::{Settings, StoreBackend};
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::limits::apply_limits;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::http::routes;
use crate::presentation::{AppState, SiteConfig};

pub(crate) async fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let (posts, tags): (Arc<dyn PostRepository>, Arc<dyn TagRepository>) =
        match settings.store_backend {
            StoreBackend::Postgres => {
                let database_url = settings
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("DATABASE_URL is required"))?;
                let pool = create_pool(database_url, settings.database_max_connections).await?;
                let posts: Arc<dyn PostRepository> =
                    Arc::new(PostgresPostRepository::new(pool.clone()));
                let tags: Arc<dyn TagRepository> = Arc::new(PostgresTagRepository::new(pool));
                (posts, tags)
            }
            StoreBackend::Memory => {
                let store = match &settings.memory_seed_path {
                    Some(path) => MemorySeed::from_file(Path::new(path))?.into_store(),
                    None => MemoryStore::new(),
                };
                info!(seed = ?settings.memory_seed_path, "using in-memory store");
                let store = Arc::new(store);
                let posts: Arc<dyn PostRepository> = store.clone();
                let tags: Arc<dyn TagRepository> = store;
                (posts, tags)
            }
        };

    Ok(AppState::new(
        PostService::new(posts),
        TagService::new(tags),
        SiteConfig::from(settings),
    ))
}

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    routes::router()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
