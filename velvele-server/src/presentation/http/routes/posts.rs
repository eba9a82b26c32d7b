use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{get_post, latest_posts, list_posts};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/latest", get(latest_posts))
        .route("/{slug}", get(get_post))
}
