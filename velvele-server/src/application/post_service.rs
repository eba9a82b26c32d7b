use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::clock::{Clock, SystemClock};
use crate::data::post_repository::{PostFilter, PostRepository, Window};
use crate::domain::error::DomainError;
use crate::domain::lang::Lang;
use crate::domain::pagination::{PageRequest, PaginationState};
use crate::domain::post::Post;

pub(crate) const DEFAULT_RELATED_LIMIT: u32 = 3;
pub(crate) const SITEMAP_POST_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub(crate) struct ListPostsParams {
    pub(crate) page: PageRequest,
    pub(crate) tag_slug: Option<String>,
    pub(crate) lang: Lang,
}

impl ListPostsParams {
    pub(crate) fn new(page: PageRequest, lang: Lang) -> Self {
        Self {
            page,
            tag_slug: None,
            lang,
        }
    }

    pub(crate) fn with_tag(mut self, tag_slug: Option<String>) -> Self {
        self.tag_slug = tag_slug
            .map(|slug| slug.trim().to_string())
            .filter(|slug| !slug.is_empty());
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<Post>,
    pub(crate) pagination: PaginationState,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPage {
    pub(crate) post: Post,
    pub(crate) related: Vec<Post>,
}

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub(crate) fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub(crate) async fn list_posts(
        &self,
        params: ListPostsParams,
    ) -> Result<ListPostsResult, DomainError> {
        let filter = PostFilter::visible(self.clock.now())
            .in_lang(params.lang)
            .tagged(params.tag_slug);
        let window = Window {
            offset: params.page.offset(),
            limit: params.page.limit,
        };

        let (total, posts) = tokio::try_join!(
            self.repo.count_posts(&filter),
            self.repo.find_posts(&filter, window),
        )?;

        Ok(ListPostsResult {
            posts,
            pagination: PaginationState::new(params.page, total),
        })
    }

    pub(crate) async fn get_post_by_slug(
        &self,
        slug: &str,
        lang: Lang,
    ) -> Result<Option<Post>, DomainError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Ok(None);
        }

        let filter = PostFilter::visible(self.clock.now())
            .in_lang(lang)
            .with_slug(slug);
        let posts = self.repo.find_posts(&filter, Window::first(2)).await?;

        if posts.len() > 1 {
            warn!(slug, %lang, "more than one visible post shares a slug, using the most recent");
        }
        Ok(posts.into_iter().next())
    }

    pub(crate) async fn get_latest_posts(
        &self,
        lang: Lang,
        limit: u32,
    ) -> Result<Vec<Post>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let filter = PostFilter::visible(self.clock.now()).in_lang(lang);
        self.repo.find_posts(&filter, Window::first(limit)).await
    }

    pub(crate) async fn get_hero_post(&self, lang: Lang) -> Result<Option<Post>, DomainError> {
        Ok(self.get_latest_posts(lang, 1).await?.into_iter().next())
    }

    /// Supplementary content: store failures are logged and yield an empty list.
    pub(crate) async fn get_related_posts(
        &self,
        exclude_post_id: Uuid,
        candidate_tag_ids: &[Uuid],
        lang: Lang,
        limit: u32,
    ) -> Vec<Post> {
        if candidate_tag_ids.is_empty() || limit == 0 {
            return Vec::new();
        }

        let filter = PostFilter::visible(self.clock.now())
            .in_lang(lang)
            .excluding(exclude_post_id)
            .sharing_tags(candidate_tag_ids.to_vec());

        match self.repo.find_posts(&filter, Window::first(limit)).await {
            Ok(posts) => posts,
            Err(err) => {
                warn!(error = %err, post_id = %exclude_post_id, "related posts unavailable");
                Vec::new()
            }
        }
    }

    pub(crate) async fn get_post_page(
        &self,
        slug: &str,
        lang: Lang,
        related_limit: u32,
    ) -> Result<Option<PostPage>, DomainError> {
        let Some(post) = self.get_post_by_slug(slug, lang).await? else {
            return Ok(None);
        };

        let related = self
            .get_related_posts(post.id, &post.tag_ids(), lang, related_limit)
            .await;
        Ok(Some(PostPage { post, related }))
    }

    pub(crate) async fn sitemap_entries(&self, limit: u32) -> Result<Vec<Post>, DomainError> {
        let filter = PostFilter::visible(self.clock.now());
        self.repo.find_posts(&filter, Window::first(limit)).await
    }
}
