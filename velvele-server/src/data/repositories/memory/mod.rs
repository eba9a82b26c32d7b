use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data::post_repository::{PostFilter, PostRepository, Window};
use crate::data::tag_repository::TagRepository;
use crate::domain::error::DomainError;
use crate::domain::lang::Lang;
use crate::domain::post::{Author, Post, PostRecord, Tag, TagWithCount};

mod seed;

pub(crate) use seed::MemorySeed;

/// Table-shaped in-memory store mirroring `authors`, `tags`, `posts` and `post_tags`.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    authors: HashMap<Uuid, Author>,
    tags: HashMap<Uuid, Tag>,
    posts: Vec<PostRecord>,
    post_tags: BTreeSet<(Uuid, Uuid)>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_author(&mut self, author: Author) {
        self.authors.insert(author.id, author);
    }

    pub(crate) fn insert_tag(&mut self, tag: Tag) {
        self.tags.insert(tag.id, tag);
    }

    pub(crate) fn insert_post(&mut self, record: PostRecord) {
        self.posts.retain(|existing| existing.id != record.id);
        self.posts.push(record);
    }

    /// Returns `false` when the pair already exists.
    pub(crate) fn link_tag(&mut self, post_id: Uuid, tag_id: Uuid) -> bool {
        self.post_tags.insert((post_id, tag_id))
    }

    fn hydrate(&self, record: &PostRecord) -> Post {
        let author = record
            .author_id
            .and_then(|author_id| self.authors.get(&author_id))
            .cloned();

        let mut tags: Vec<Tag> = self
            .post_tags
            .range((record.id, Uuid::nil())..=(record.id, Uuid::max()))
            .filter_map(|(_, tag_id)| self.tags.get(tag_id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        Post::new(record.clone(), author, tags)
    }

    fn matching(&self, filter: &PostFilter) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .map(|record| self.hydrate(record))
            .filter(|post| filter.matches(post))
            .collect();
        posts.sort_by_key(|post| Reverse((post.published_at, post.id)));
        posts
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_posts(
        &self,
        filter: &PostFilter,
        window: Window,
    ) -> Result<Vec<Post>, DomainError> {
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset)
            .take(window.limit as usize)
            .collect())
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        Ok(self.matching(filter).len() as u64)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list_tags_with_counts(
        &self,
        lang: Lang,
        visible_at: DateTime<Utc>,
    ) -> Result<Vec<TagWithCount>, DomainError> {
        let visible = self.matching(&PostFilter::visible(visible_at).in_lang(lang));

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for post in &visible {
            for tag in &post.tags {
                *counts.entry(tag.id).or_default() += 1;
            }
        }

        let mut tags: Vec<TagWithCount> = counts
            .into_iter()
            .filter_map(|(tag_id, post_count)| {
                self.tags.get(&tag_id).map(|tag| TagWithCount {
                    tag: tag.clone(),
                    post_count,
                })
            })
            .collect();
        tags.sort_by(|a, b| {
            b.post_count
                .cmp(&a.post_count)
                .then_with(|| a.tag.name.cmp(&b.tag.name))
        });
        Ok(tags)
    }

    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, DomainError> {
        Ok(self.tags.values().find(|tag| tag.slug == slug).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::MemoryStore;
    use crate::data::post_repository::{PostFilter, PostRepository, Window};
    use crate::data::tag_repository::TagRepository;
    use crate::domain::lang::Lang;
    use crate::domain::post::PostStatus;
    use crate::domain::post::fixtures::{author, record, tag};

    #[test]
    fn link_tag_keeps_pairs_unique() {
        let mut store = MemoryStore::new();
        let post = record("a", Some(Utc::now()));
        let rust = tag("rust");

        assert!(store.link_tag(post.id, rust.id));
        assert!(!store.link_tag(post.id, rust.id));
    }

    #[tokio::test]
    async fn find_posts_hydrates_author_and_tags() {
        let mut store = MemoryStore::new();
        let writer = author("ayse");
        let rust = tag("rust");
        let mut post = record("merhaba", Some(Utc::now() - Duration::hours(1)));
        post.author_id = Some(writer.id);

        store.insert_author(writer.clone());
        store.insert_tag(rust.clone());
        store.link_tag(post.id, rust.id);
        store.insert_post(post);

        let posts = store
            .find_posts(&PostFilter::visible(Utc::now()), Window::first(10))
            .await
            .expect("find must succeed");

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author.as_ref(), Some(&writer));
        assert_eq!(posts[0].tags, vec![rust]);
    }

    #[tokio::test]
    async fn row_with_blank_title_does_not_break_listing() {
        let mut store = MemoryStore::new();
        let at = Utc::now() - Duration::hours(1);
        store.insert_post(record("iyi", Some(at)));
        let mut untitled = record("basliksiz", Some(at - Duration::hours(1)));
        untitled.title = String::new();
        store.insert_post(untitled);

        let filter = PostFilter::visible(Utc::now()).in_lang(Lang::Tr);
        let posts = store
            .find_posts(&filter, Window::first(10))
            .await
            .expect("find must succeed");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "");
        assert_eq!(store.count_posts(&filter).await.expect("count must succeed"), 2);
    }

    #[tokio::test]
    async fn ties_on_publish_time_are_ordered_by_id() {
        let mut store = MemoryStore::new();
        let at = Utc::now() - Duration::hours(1);
        let first = record("first", Some(at));
        let second = record("second", Some(at));
        let expected_head = first.id.max(second.id);
        store.insert_post(first);
        store.insert_post(second);

        let posts = store
            .find_posts(&PostFilter::visible(Utc::now()), Window::first(10))
            .await
            .expect("find must succeed");

        assert_eq!(posts[0].id, expected_head);
    }

    #[tokio::test]
    async fn tag_counts_ignore_drafts_and_other_languages() {
        let now = Utc::now();
        let mut store = MemoryStore::new();
        let rust = tag("rust");
        let web = tag("web");
        store.insert_tag(rust.clone());
        store.insert_tag(web.clone());

        let visible = record("visible", Some(now - Duration::hours(1)));
        let visible_two = record("visible-two", Some(now - Duration::hours(2)));
        let mut draft = record("draft", Some(now - Duration::hours(1)));
        draft.status = PostStatus::Draft;
        let mut english = record("english", Some(now - Duration::hours(1)));
        english.lang = Lang::En;

        for post in [&visible, &visible_two, &draft, &english] {
            store.link_tag(post.id, rust.id);
        }
        store.link_tag(visible.id, web.id);
        for post in [visible, visible_two, draft, english] {
            store.insert_post(post);
        }

        let tags = store
            .list_tags_with_counts(Lang::Tr, now)
            .await
            .expect("list must succeed");

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].tag, rust);
        assert_eq!(tags[0].post_count, 2);
        assert_eq!(tags[1].tag, web);
        assert_eq!(tags[1].post_count, 1);
    }

    #[tokio::test]
    async fn find_tag_by_slug_returns_none_for_unknown_slug() {
        let mut store = MemoryStore::new();
        store.insert_tag(tag("rust"));

        let found = store.find_tag_by_slug("rust").await.expect("lookup must succeed");
        assert!(found.is_some());
        let missing = store.find_tag_by_slug("go").await.expect("lookup must succeed");
        assert!(missing.is_none());
    }
}
