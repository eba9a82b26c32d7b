//! Клиентская библиотека для чтения блога Velvele через HTTP API `velvele-server`.
//!
//! `VelveleClient` хранит выбранный язык контента и передаёт его в каждый
//! запрос параметром `lang`; без явного языка сервер определяет его по хосту.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{VelveleClientError, VelveleClientResult};
pub use http_client::HttpClient;
pub use models::{
    Author, Lang, PageLink, Pagination, PostDetail, PostList, PostSummary, Tag, TagPosts,
    TagWithCount,
};

#[derive(Debug, Clone)]
/// Клиент блога поверх HTTP.
pub struct VelveleClient {
    http: HttpClient,
    lang: Option<Lang>,
}

impl VelveleClient {
    /// Создаёт клиент для сервера по базовому URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> VelveleClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            lang: None,
        })
    }

    /// Фиксирует язык контента для всех последующих запросов.
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    /// Текущий язык, если он задан явно.
    pub fn lang(&self) -> Option<Lang> {
        self.lang
    }

    /// Возвращает страницу постов. `page` и `limit` по умолчанию выбирает сервер.
    pub async fn list_posts(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        tag: Option<&str>,
    ) -> VelveleClientResult<PostList> {
        self.http.list_posts(self.lang, page, limit, tag).await
    }

    /// Возвращает `limit` последних постов (по умолчанию один).
    pub async fn latest_posts(&self, limit: Option<u32>) -> VelveleClientResult<Vec<PostSummary>> {
        self.http.latest_posts(self.lang, limit).await
    }

    /// Возвращает пост по slug.
    ///
    /// Черновики и посты с датой публикации в будущем дают `NotFound`.
    pub async fn get_post(&self, slug: &str) -> VelveleClientResult<PostDetail> {
        self.http.get_post(self.lang, slug).await
    }

    /// Возвращает теги, отсортированные по количеству постов.
    pub async fn list_tags(&self) -> VelveleClientResult<Vec<TagWithCount>> {
        self.http.list_tags(self.lang).await
    }

    /// Возвращает тег и страницу его постов.
    pub async fn tag_posts(
        &self,
        slug: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> VelveleClientResult<TagPosts> {
        self.http.tag_posts(self.lang, slug, page, limit).await
    }
}
