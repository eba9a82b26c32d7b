use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::lang::Lang;
use crate::domain::post::Post;

/// Predicate over visible posts. The same value drives both the page read and
/// the count read, so pagination metadata always matches the page contents.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PostFilter {
    pub(crate) visible_at: DateTime<Utc>,
    pub(crate) lang: Option<Lang>,
    pub(crate) slug: Option<String>,
    pub(crate) tag_slug: Option<String>,
    pub(crate) any_tag_ids: Option<Vec<Uuid>>,
    pub(crate) exclude_id: Option<Uuid>,
}

impl PostFilter {
    pub(crate) fn visible(visible_at: DateTime<Utc>) -> Self {
        Self {
            visible_at,
            lang: None,
            slug: None,
            tag_slug: None,
            any_tag_ids: None,
            exclude_id: None,
        }
    }

    pub(crate) fn in_lang(mut self, lang: Lang) -> Self {
        self.lang = Some(lang);
        self
    }

    pub(crate) fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub(crate) fn tagged(mut self, tag_slug: Option<String>) -> Self {
        self.tag_slug = tag_slug;
        self
    }

    pub(crate) fn sharing_tags(mut self, tag_ids: Vec<Uuid>) -> Self {
        self.any_tag_ids = Some(tag_ids);
        self
    }

    pub(crate) fn excluding(mut self, post_id: Uuid) -> Self {
        self.exclude_id = Some(post_id);
        self
    }

    pub(crate) fn matches(&self, post: &Post) -> bool {
        if !post.is_visible_at(self.visible_at) {
            return false;
        }
        if self.lang.is_some_and(|lang| post.lang != lang) {
            return false;
        }
        if self.slug.as_deref().is_some_and(|slug| post.slug != slug) {
            return false;
        }
        if self.exclude_id.is_some_and(|id| post.id == id) {
            return false;
        }
        if let Some(tag_slug) = self.tag_slug.as_deref()
            && !post.tags.iter().any(|tag| tag.slug == tag_slug)
        {
            return false;
        }
        if let Some(tag_ids) = &self.any_tag_ids
            && !post.tags.iter().any(|tag| tag_ids.contains(&tag.id))
        {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) offset: u64,
    pub(crate) limit: u32,
}

impl Window {
    pub(crate) fn first(limit: u32) -> Self {
        Self { offset: 0, limit }
    }
}

/// Read-only access to posts. Results are ordered by `published_at DESC, id DESC`.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn find_posts(
        &self,
        filter: &PostFilter,
        window: Window,
    ) -> Result<Vec<Post>, DomainError>;
    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError>;
}

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn find_posts(
        &self,
        filter: &PostFilter,
        window: Window,
    ) -> Result<Vec<Post>, DomainError> {
        (**self).find_posts(filter, window).await
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        (**self).count_posts(filter).await
    }
}
