use std::time::Duration;

use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::infrastructure::settings::Settings;

/// A timed-out request is answered with 408 and its handler future is
/// dropped, which also cancels any in-flight store query.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.http_request_timeout_secs,
        )))
        .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
}
