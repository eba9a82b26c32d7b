use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::health::healthz;
use crate::presentation::http::handlers::sitemap::{robots, sitemap};

pub(crate) mod posts;
pub(crate) mod tags;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
        .nest("/api/posts", posts::router())
        .nest("/api/tags", tags::router())
}
