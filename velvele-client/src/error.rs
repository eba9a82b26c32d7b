use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `velvele-client`.
pub enum VelveleClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Запрошенный ресурс не найден (или ещё не опубликован).
    #[error("not found")]
    NotFound,

    /// Некорректный запрос: ошибка валидации параметров на сервере.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Внутренняя ошибка сервера.
    #[error("server error: {0}")]
    Server(String),
}

/// Результат операций `velvele-client`.
pub type VelveleClientResult<T> = Result<T, VelveleClientError>;

impl VelveleClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            status if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::VelveleClientError;

    #[test]
    fn status_codes_map_to_variants() {
        assert!(matches!(
            VelveleClientError::from_http_status(reqwest::StatusCode::NOT_FOUND, None),
            VelveleClientError::NotFound
        ));
        assert!(matches!(
            VelveleClientError::from_http_status(
                reqwest::StatusCode::BAD_REQUEST,
                Some("page must be >= 1".to_string())
            ),
            VelveleClientError::InvalidRequest(message) if message == "page must be >= 1"
        ));
        assert!(matches!(
            VelveleClientError::from_http_status(reqwest::StatusCode::BAD_GATEWAY, None),
            VelveleClientError::Server(_)
        ));
    }
}
