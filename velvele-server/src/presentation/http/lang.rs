use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};
use serde::Deserialize;

use crate::domain::lang::Lang;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;

/// Content language of the current request: `?lang=` first, then an `en.`
/// host, then the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestLang(pub(crate) Lang);

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

impl FromRequestParts<AppState> for RequestLang {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let explicit = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.lang)
            .filter(|lang| !lang.trim().is_empty());
        if let Some(raw) = explicit {
            return Ok(RequestLang(raw.trim().parse::<Lang>()?));
        }

        let from_host = parts
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .and_then(Lang::from_host);
        Ok(RequestLang(from_host.unwrap_or(state.site.default_lang)))
    }
}
