use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::lang::Lang;
use crate::domain::post::{Author, PostRecord, PostStatus, Tag};

/// JSON dump of the four tables, one array per table.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MemorySeed {
    #[serde(default)]
    authors: Vec<Author>,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    posts: Vec<SeedPost>,
    #[serde(default)]
    post_tags: Vec<SeedPostTag>,
}

#[derive(Debug, Deserialize)]
struct SeedPost {
    id: Uuid,
    lang: Lang,
    slug: String,
    title: String,
    excerpt: Option<String>,
    content_md: Option<String>,
    cover_url: Option<String>,
    status: PostStatus,
    author_id: Option<Uuid>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SeedPostTag {
    post_id: Uuid,
    tag_id: Uuid,
}

impl MemorySeed {
    pub(crate) fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid memory seed JSON")
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub(crate) fn into_store(self) -> MemoryStore {
        let mut store = MemoryStore::new();
        for author in self.authors {
            store.insert_author(author);
        }
        for tag in self.tags {
            store.insert_tag(tag);
        }
        for post in self.posts {
            store.insert_post(PostRecord {
                id: post.id,
                lang: post.lang,
                slug: post.slug,
                title: post.title,
                excerpt: post.excerpt,
                content_md: post.content_md,
                cover_url: post.cover_url,
                status: post.status,
                author_id: post.author_id,
                published_at: post.published_at,
                created_at: post.created_at,
                updated_at: post.updated_at,
            });
        }
        for link in self.post_tags {
            if !store.link_tag(link.post_id, link.tag_id) {
                tracing::warn!(post_id = %link.post_id, tag_id = %link.tag_id, "duplicate post_tags pair ignored");
            }
        }
        store
    }
}
