use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::post_service::{DEFAULT_RELATED_LIMIT, ListPostsParams, ListPostsResult};
use crate::domain::error::DomainError;
use crate::domain::pagination::{DEFAULT_VISIBLE_PAGES, PageLink, PageRequest, PaginationState};
use crate::domain::post::{Author, Post, Tag};
use crate::markdown::{self, Block};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::handlers::meta::{PageMetaDto, post_meta};
use crate::presentation::http::lang::RequestLang;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ListPostsQuery {
    #[validate(range(min = 1))]
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
    #[validate(length(max = 255))]
    pub(crate) tag: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LatestPostsQuery {
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorDto {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) bio: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TagDto {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) slug: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostSummaryDto {
    pub(crate) id: Uuid,
    pub(crate) lang: String,
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) excerpt: Option<String>,
    pub(crate) cover_url: Option<String>,
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) author: Option<AuthorDto>,
    pub(crate) tags: Vec<TagDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PaginationDto {
    pub(crate) current_page: u32,
    pub(crate) total_pages: u32,
    pub(crate) total_count: u64,
    pub(crate) has_next_page: bool,
    pub(crate) has_prev_page: bool,
    pub(crate) next_page: Option<u32>,
    pub(crate) prev_page: Option<u32>,
}

/// One slot of the numbered pager; `page` is absent for an ellipsis.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PageLinkDto {
    pub(crate) page: Option<u32>,
    pub(crate) ellipsis: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostSummaryDto>,
    pub(crate) pagination: PaginationDto,
    pub(crate) page_window: Vec<PageLinkDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) post: PostSummaryDto,
    pub(crate) content_md: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub(crate) content_blocks: Vec<Block>,
    pub(crate) content_html: String,
    pub(crate) reading_minutes: usize,
    pub(crate) related: Vec<PostSummaryDto>,
    pub(crate) meta: PageMetaDto,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
            slug: author.slug,
            avatar_url: author.avatar_url,
            bio: author.bio,
        }
    }
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

impl From<Post> for PostSummaryDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            lang: post.lang.as_str().to_string(),
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            cover_url: post.cover_url,
            published_at: post.published_at,
            updated_at: post.updated_at,
            author: post.author.map(AuthorDto::from),
            tags: post.tags.into_iter().map(TagDto::from).collect(),
        }
    }
}

impl From<PaginationState> for PaginationDto {
    fn from(state: PaginationState) -> Self {
        Self {
            current_page: state.current_page,
            total_pages: state.total_pages,
            total_count: state.total_count,
            has_next_page: state.has_next_page,
            has_prev_page: state.has_prev_page,
            next_page: state.next_page,
            prev_page: state.prev_page,
        }
    }
}

impl From<PageLink> for PageLinkDto {
    fn from(link: PageLink) -> Self {
        match link {
            PageLink::Page(page) => Self {
                page: Some(page),
                ellipsis: false,
            },
            PageLink::Ellipsis => Self {
                page: None,
                ellipsis: true,
            },
        }
    }
}

impl From<ListPostsResult> for ListPostsResponseDto {
    fn from(result: ListPostsResult) -> Self {
        let page_window = result
            .pagination
            .page_window(DEFAULT_VISIBLE_PAGES)
            .into_iter()
            .map(PageLinkDto::from)
            .collect();
        Self {
            posts: result.posts.into_iter().map(PostSummaryDto::from).collect(),
            pagination: PaginationDto::from(result.pagination),
            page_window,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100)"),
        ("tag" = Option<String>, Query, description = "Only posts carrying this tag slug"),
        ("lang" = Option<String>, Query, description = "Content language override (tr, en)")
    ),
    responses(
        (status = 200, description = "Posts listed", body = ListPostsResponseDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    RequestLang(lang): RequestLang,
    Query(query): Query<ListPostsQuery>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    query.validate()?;
    let page = PageRequest::with_default_limit(query.page, query.limit, state.site.page_size)?;
    let params = ListPostsParams::new(page, lang).with_tag(query.tag);

    let result = state.post_service.list_posts(params).await?;

    Ok((StatusCode::OK, Json(ListPostsResponseDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/posts/latest",
    tag = "posts",
    params(
        ("limit" = Option<u32>, Query, description = "How many posts (1..=100), default 1"),
        ("lang" = Option<String>, Query, description = "Content language override (tr, en)")
    ),
    responses(
        (status = 200, description = "Most recent posts", body = Vec<PostSummaryDto>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn latest_posts(
    State(state): State<AppState>,
    RequestLang(lang): RequestLang,
    Query(query): Query<LatestPostsQuery>,
) -> AppResult<(StatusCode, Json<Vec<PostSummaryDto>>)> {
    query.validate()?;
    let posts = match query.limit {
        Some(limit) => state.post_service.get_latest_posts(lang, limit).await?,
        None => state
            .post_service
            .get_hero_post(lang)
            .await?
            .into_iter()
            .collect(),
    };

    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostSummaryDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    tag = "posts",
    params(
        ("slug" = String, Path, description = "Post slug"),
        ("lang" = Option<String>, Query, description = "Content language override (tr, en)")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDetailDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    RequestLang(lang): RequestLang,
    Path(slug): Path<String>,
) -> AppResult<(StatusCode, Json<PostDetailDto>)> {
    let page = state
        .post_service
        .get_post_page(&slug, lang, DEFAULT_RELATED_LIMIT)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("post '{slug}'")))?;

    let rendered = markdown::render(page.post.content_md.as_deref().unwrap_or_default());
    let reading_minutes = page.post.reading_minutes();
    let content_md = page.post.content_md.clone();
    let meta = post_meta(&page.post, &state.site.site_url);

    Ok((
        StatusCode::OK,
        Json(PostDetailDto {
            post: PostSummaryDto::from(page.post),
            content_md,
            content_blocks: rendered.blocks,
            content_html: rendered.html,
            reading_minutes,
            related: page.related.into_iter().map(PostSummaryDto::from).collect(),
            meta,
        }),
    ))
}
