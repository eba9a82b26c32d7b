use reqwest::{Client, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{VelveleClientError, VelveleClientResult};
use crate::models::{Lang, PostDetail, PostList, PostSummary, TagPosts, TagWithCount};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct ListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'static str>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для read-only API `velvele-server`.
pub struct HttpClient {
    base_url: Url,
    client: Client,
}

impl HttpClient {
    /// Создаёт HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> VelveleClientResult<Self> {
        let base_url = base_url.into();
        let base_url = Url::parse(&base_url).map_err(|err| {
            VelveleClientError::InvalidRequest(format!("invalid server url '{base_url}': {err}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(VelveleClientError::InvalidRequest(format!(
                "invalid server url '{base_url}'"
            )));
        }
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Каждый сегмент кодируется отдельно: `/`, `?` и `#` в slug не меняют путь.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn decode_error(response: reqwest::Response) -> VelveleClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        VelveleClientError::from_http_status(status, Some(message))
    }

    /// общий GET с query-параметрами и JSON-ответом
    async fn get_json<TRes>(
        &self,
        segments: &[&str],
        query: &ListQuery<'_>,
    ) -> VelveleClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.endpoint(segments))
            .query(query)
            .send()
            .await
            .map_err(VelveleClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(VelveleClientError::from_reqwest)
    }

    /// Возвращает страницу опубликованных постов, опционально по тегу.
    pub async fn list_posts(
        &self,
        lang: Option<Lang>,
        page: Option<u32>,
        limit: Option<u32>,
        tag: Option<&str>,
    ) -> VelveleClientResult<PostList> {
        let query = ListQuery {
            page,
            limit,
            tag,
            lang: lang.map(Lang::as_str),
        };
        self.get_json(&["api", "posts"], &query).await
    }

    /// Возвращает последние опубликованные посты.
    pub async fn latest_posts(
        &self,
        lang: Option<Lang>,
        limit: Option<u32>,
    ) -> VelveleClientResult<Vec<PostSummary>> {
        let query = ListQuery {
            limit,
            lang: lang.map(Lang::as_str),
            ..ListQuery::default()
        };
        self.get_json(&["api", "posts", "latest"], &query).await
    }

    /// Получает пост по slug вместе с отрендеренным содержимым.
    pub async fn get_post(&self, lang: Option<Lang>, slug: &str) -> VelveleClientResult<PostDetail> {
        let query = ListQuery {
            lang: lang.map(Lang::as_str),
            ..ListQuery::default()
        };
        self.get_json(&["api", "posts", slug], &query).await
    }

    /// Возвращает теги с количеством постов.
    pub async fn list_tags(&self, lang: Option<Lang>) -> VelveleClientResult<Vec<TagWithCount>> {
        let query = ListQuery {
            lang: lang.map(Lang::as_str),
            ..ListQuery::default()
        };
        self.get_json(&["api", "tags"], &query).await
    }

    /// Возвращает тег и страницу его постов.
    pub async fn tag_posts(
        &self,
        lang: Option<Lang>,
        slug: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> VelveleClientResult<TagPosts> {
        let query = ListQuery {
            page,
            limit,
            lang: lang.map(Lang::as_str),
            ..ListQuery::default()
        };
        self.get_json(&["api", "tags", slug], &query).await
    }
}
