use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::post_service::ListPostsParams;
use crate::domain::error::DomainError;
use crate::domain::pagination::PageRequest;
use crate::domain::post::TagWithCount;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::handlers::meta::{PageMetaDto, tag_meta};
use crate::presentation::http::handlers::posts::{
    ListPostsResponseDto, PageLinkDto, PaginationDto, PostSummaryDto, TagDto,
};
use crate::presentation::http::lang::RequestLang;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct TagPostsQuery {
    #[validate(range(min = 1))]
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TagWithCountDto {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) post_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TagPostsResponseDto {
    pub(crate) tag: TagDto,
    pub(crate) posts: Vec<PostSummaryDto>,
    pub(crate) pagination: PaginationDto,
    pub(crate) page_window: Vec<PageLinkDto>,
    pub(crate) meta: PageMetaDto,
}

impl From<TagWithCount> for TagWithCountDto {
    fn from(entry: TagWithCount) -> Self {
        Self {
            id: entry.tag.id,
            name: entry.tag.name,
            slug: entry.tag.slug,
            post_count: entry.post_count,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    params(
        ("lang" = Option<String>, Query, description = "Content language override (tr, en)")
    ),
    responses(
        (status = 200, description = "Tags with visible post counts", body = Vec<TagWithCountDto>)
    )
)]
pub(crate) async fn list_tags(
    State(state): State<AppState>,
    RequestLang(lang): RequestLang,
) -> AppResult<(StatusCode, Json<Vec<TagWithCountDto>>)> {
    let tags = state.tag_service.list_tags(lang).await;

    Ok((
        StatusCode::OK,
        Json(tags.into_iter().map(TagWithCountDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/tags/{slug}",
    tag = "tags",
    params(
        ("slug" = String, Path, description = "Tag slug"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100)"),
        ("lang" = Option<String>, Query, description = "Content language override (tr, en)")
    ),
    responses(
        (status = 200, description = "Tag and its posts", body = TagPostsResponseDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Tag not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_tag(
    State(state): State<AppState>,
    RequestLang(lang): RequestLang,
    Path(slug): Path<String>,
    Query(query): Query<TagPostsQuery>,
) -> AppResult<(StatusCode, Json<TagPostsResponseDto>)> {
    query.validate()?;
    let page = PageRequest::with_default_limit(query.page, query.limit, state.site.page_size)?;

    let tag = state
        .tag_service
        .get_tag_by_slug(&slug)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("tag '{slug}'")))?;

    let params = ListPostsParams::new(page, lang).with_tag(Some(tag.slug.clone()));
    let listing = ListPostsResponseDto::from(state.post_service.list_posts(params).await?);
    let meta = tag_meta(&tag, listing.pagination.total_count, lang, &state.site.site_url);

    Ok((
        StatusCode::OK,
        Json(TagPostsResponseDto {
            tag: TagDto::from(tag),
            posts: listing.posts,
            pagination: listing.pagination,
            page_window: listing.page_window,
            meta,
        }),
    ))
}
