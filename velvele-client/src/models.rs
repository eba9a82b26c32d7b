use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Язык контента блога.
pub enum Lang {
    /// Турецкий (язык по умолчанию).
    #[default]
    Tr,
    /// Английский.
    En,
}

impl Lang {
    /// Значение параметра `lang` в запросе.
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Tr => "tr",
            Lang::En => "en",
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tr" => Ok(Lang::Tr),
            "en" => Ok(Lang::En),
            other => Err(format!("unknown language '{other}', expecting tr or en")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Автор поста.
pub struct Author {
    /// Идентификатор автора.
    pub id: Uuid,
    /// Отображаемое имя.
    pub name: String,
    /// Slug автора.
    pub slug: String,
    /// Ссылка на аватар.
    pub avatar_url: Option<String>,
    /// Краткая биография.
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Тег.
pub struct Tag {
    /// Идентификатор тега.
    pub id: Uuid,
    /// Название.
    pub name: String,
    /// Slug тега.
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Тег вместе с количеством опубликованных постов.
pub struct TagWithCount {
    /// Идентификатор тега.
    pub id: Uuid,
    /// Название.
    pub name: String,
    /// Slug тега.
    pub slug: String,
    /// Количество видимых постов с этим тегом.
    pub post_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Краткая модель поста для списков.
pub struct PostSummary {
    /// Идентификатор поста.
    pub id: Uuid,
    /// Язык поста.
    pub lang: Lang,
    /// Slug поста.
    pub slug: String,
    /// Заголовок.
    pub title: String,
    /// Краткое описание.
    pub excerpt: Option<String>,
    /// Обложка.
    pub cover_url: Option<String>,
    /// Дата публикации (UTC).
    pub published_at: Option<DateTime<Utc>>,
    /// Дата последнего обновления (UTC).
    pub updated_at: DateTime<Utc>,
    /// Автор, если указан.
    pub author: Option<Author>,
    /// Теги поста.
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Метаданные пагинации.
pub struct Pagination {
    /// Текущая страница (с 1).
    pub current_page: u32,
    /// Всего страниц.
    pub total_pages: u32,
    /// Всего постов под фильтром.
    pub total_count: u64,
    /// Есть ли следующая страница.
    pub has_next_page: bool,
    /// Есть ли предыдущая страница.
    pub has_prev_page: bool,
    /// Номер следующей страницы.
    pub next_page: Option<u32>,
    /// Номер предыдущей страницы.
    pub prev_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Элемент навигации по страницам: номер страницы или многоточие.
pub struct PageLink {
    /// Номер страницы; отсутствует для многоточия.
    pub page: Option<u32>,
    /// Признак многоточия.
    pub ellipsis: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Страница списка постов.
pub struct PostList {
    /// Посты текущей страницы.
    pub posts: Vec<PostSummary>,
    /// Пагинация.
    pub pagination: Pagination,
    /// Окно номеров страниц для навигации.
    pub page_window: Vec<PageLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Полная модель поста с отрендеренным содержимым.
pub struct PostDetail {
    /// Основные поля поста.
    pub post: PostSummary,
    /// Исходный markdown.
    pub content_md: Option<String>,
    /// Типизированные блоки содержимого.
    pub content_blocks: serde_json::Value,
    /// Готовый HTML.
    pub content_html: String,
    /// Оценка времени чтения в минутах.
    pub reading_minutes: usize,
    /// Похожие посты (по общим тегам).
    pub related: Vec<PostSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Тег и страница его постов.
pub struct TagPosts {
    /// Тег.
    pub tag: Tag,
    /// Посты текущей страницы.
    pub posts: Vec<PostSummary>,
    /// Пагинация.
    pub pagination: Pagination,
    /// Окно номеров страниц для навигации.
    pub page_window: Vec<PageLink>,
}
