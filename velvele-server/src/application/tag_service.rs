use std::sync::Arc;

use tracing::warn;

use super::clock::{Clock, SystemClock};
use crate::data::tag_repository::TagRepository;
use crate::domain::error::DomainError;
use crate::domain::lang::Lang;
use crate::domain::post::{Tag, TagWithCount};

pub(crate) struct TagService<R: TagRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: TagRepository> TagService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub(crate) fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// The tag index is supplementary: a failing store yields an empty index.
    pub(crate) async fn list_tags(&self, lang: Lang) -> Vec<TagWithCount> {
        match self.repo.list_tags_with_counts(lang, self.clock.now()).await {
            Ok(tags) => tags,
            Err(err) => {
                warn!(error = %err, %lang, "tag index unavailable");
                Vec::new()
            }
        }
    }

    pub(crate) async fn get_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, DomainError> {
        let slug = slug.trim();
        if slug.is_empty() {
            return Ok(None);
        }
        self.repo.find_tag_by_slug(slug).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::TagService;
    use crate::application::clock::FixedClock;
    use crate::data::tag_repository::TagRepository;
    use crate::domain::error::DomainError;
    use crate::domain::lang::Lang;
    use crate::domain::post::fixtures::tag;
    use crate::domain::post::{Tag, TagWithCount};

    #[derive(Clone)]
    struct FakeTagRepo {
        tags: Vec<TagWithCount>,
        fail: bool,
        list_call: Arc<Mutex<Option<(Lang, DateTime<Utc>)>>>,
        lookups: Arc<Mutex<Vec<String>>>,
    }

    impl FakeTagRepo {
        fn new(tags: Vec<TagWithCount>) -> Self {
            Self {
                tags,
                fail: false,
                list_call: Arc::new(Mutex::new(None)),
                lookups: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl TagRepository for FakeTagRepo {
        async fn list_tags_with_counts(
            &self,
            lang: Lang,
            visible_at: DateTime<Utc>,
        ) -> Result<Vec<TagWithCount>, DomainError> {
            *self.list_call.lock().expect("list_call mutex poisoned") = Some((lang, visible_at));
            if self.fail {
                return Err(DomainError::Store("timeout".to_string()));
            }
            Ok(self.tags.clone())
        }

        async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, DomainError> {
            self.lookups
                .lock()
                .expect("lookups mutex poisoned")
                .push(slug.to_string());
            if self.fail {
                return Err(DomainError::Store("timeout".to_string()));
            }
            Ok(self
                .tags
                .iter()
                .map(|entry| entry.tag.clone())
                .find(|tag| tag.slug == slug))
        }
    }

    #[tokio::test]
    async fn list_tags_passes_language_and_clock() {
        let now = Utc::now();
        let repo = FakeTagRepo::new(vec![TagWithCount {
            tag: tag("rust"),
            post_count: 4,
        }]);
        let service = TagService::with_clock(repo.clone(), Arc::new(FixedClock(now)));

        let tags = service.list_tags(Lang::En).await;
        assert_eq!(tags.len(), 1);
        assert_eq!(
            *repo.list_call.lock().expect("list_call mutex poisoned"),
            Some((Lang::En, now))
        );
    }

    #[tokio::test]
    async fn list_tags_degrades_to_empty() {
        let mut repo = FakeTagRepo::new(vec![]);
        repo.fail = true;
        let service = TagService::new(repo);

        assert!(service.list_tags(Lang::Tr).await.is_empty());
    }

    #[tokio::test]
    async fn get_tag_by_slug_trims_and_skips_blank() {
        let repo = FakeTagRepo::new(vec![TagWithCount {
            tag: tag("rust"),
            post_count: 1,
        }]);
        let service = TagService::new(repo.clone());

        let found = service
            .get_tag_by_slug(" rust ")
            .await
            .expect("lookup must succeed");
        assert_eq!(found.map(|tag| tag.slug), Some("rust".to_string()));

        let blank = service.get_tag_by_slug("   ").await.expect("lookup must succeed");
        assert!(blank.is_none());
        assert_eq!(
            *repo.lookups.lock().expect("lookups mutex poisoned"),
            vec!["rust".to_string()]
        );
    }

    #[tokio::test]
    async fn get_tag_by_slug_propagates_store_failure() {
        let mut repo = FakeTagRepo::new(vec![]);
        repo.fail = true;
        let service = TagService::new(repo);

        let err = service
            .get_tag_by_slug("rust")
            .await
            .expect_err("lookup must fail");
        assert!(matches!(err, DomainError::Store(_)));
    }
}
