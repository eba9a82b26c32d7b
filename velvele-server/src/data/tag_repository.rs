use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::lang::Lang;
use crate::domain::post::{Tag, TagWithCount};

#[async_trait]
pub(crate) trait TagRepository: Send + Sync {
    /// Tags with at least one visible post in `lang`, most used first.
    async fn list_tags_with_counts(
        &self,
        lang: Lang,
        visible_at: DateTime<Utc>,
    ) -> Result<Vec<TagWithCount>, DomainError>;
    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, DomainError>;
}

#[async_trait]
impl<T: TagRepository + ?Sized> TagRepository for Arc<T> {
    async fn list_tags_with_counts(
        &self,
        lang: Lang,
        visible_at: DateTime<Utc>,
    ) -> Result<Vec<TagWithCount>, DomainError> {
        (**self).list_tags_with_counts(lang, visible_at).await
    }

    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, DomainError> {
        (**self).find_tag_by_slug(slug).await
    }
}
