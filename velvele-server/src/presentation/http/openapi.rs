use utoipa::OpenApi;

use crate::presentation::http::handlers::health::HealthDto;
use crate::presentation::http::handlers::meta::PageMetaDto;
use crate::presentation::http::handlers::posts::{
    AuthorDto, LatestPostsQuery, ListPostsQuery, ListPostsResponseDto, PageLinkDto,
    PaginationDto, PostDetailDto, PostSummaryDto, TagDto,
};
use crate::presentation::http::handlers::tags::{
    TagPostsQuery, TagPostsResponseDto, TagWithCountDto,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Velvele read API", description = "Published posts, tags and sitemap of the Velvele blog"),
    paths(
        crate::presentation::http::handlers::health::healthz,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::latest_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::tags::list_tags,
        crate::presentation::http::handlers::tags::get_tag,
        crate::presentation::http::handlers::sitemap::sitemap,
        crate::presentation::http::handlers::sitemap::robots
    ),
    components(
        schemas(
            HealthDto,
            ListPostsQuery,
            LatestPostsQuery,
            TagPostsQuery,
            AuthorDto,
            TagDto,
            TagWithCountDto,
            PostSummaryDto,
            PostDetailDto,
            PaginationDto,
            PageLinkDto,
            ListPostsResponseDto,
            TagPostsResponseDto,
            PageMetaDto
        )
    ),
    tags(
        (name = "posts", description = "Post endpoints"),
        (name = "tags", description = "Tag endpoints"),
        (name = "seo", description = "Sitemap and crawler rules"),
        (name = "health", description = "Liveness probe")
    )
)]
pub(crate) struct ApiDoc;
