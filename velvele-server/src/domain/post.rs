use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;
use super::lang::Lang;

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            _ => Err(DomainError::Validation {
                field: "status",
                message: "must be draft or published",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Author {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) avatar_url: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Tag {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TagWithCount {
    pub(crate) tag: Tag,
    pub(crate) post_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) lang: Lang,
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) excerpt: Option<String>,
    pub(crate) content_md: Option<String>,
    pub(crate) cover_url: Option<String>,
    pub(crate) status: PostStatus,
    pub(crate) author_id: Option<Uuid>,
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) author: Option<Author>,
    pub(crate) tags: Vec<Tag>,
}

/// Column values of a `posts` row before author and tags are attached.
#[derive(Debug, Clone)]
pub(crate) struct PostRecord {
    pub(crate) id: Uuid,
    pub(crate) lang: Lang,
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) excerpt: Option<String>,
    pub(crate) content_md: Option<String>,
    pub(crate) cover_url: Option<String>,
    pub(crate) status: PostStatus,
    pub(crate) author_id: Option<Uuid>,
    pub(crate) published_at: Option<DateTime<Utc>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Post {
    /// Attaches author and tags to a stored row. An author whose id differs
    /// from `author_id` is dropped; duplicate tag ids are collapsed.
    pub(crate) fn new(record: PostRecord, author: Option<Author>, tags: Vec<Tag>) -> Self {
        let author = author.filter(|author| record.author_id == Some(author.id));

        let mut seen = HashSet::new();
        let tags = tags
            .into_iter()
            .filter(|tag| seen.insert(tag.id))
            .collect();

        Self {
            id: record.id,
            lang: record.lang,
            slug: record.slug,
            title: record.title,
            excerpt: record.excerpt,
            content_md: record.content_md,
            cover_url: record.cover_url,
            status: record.status,
            author_id: record.author_id,
            published_at: record.published_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
            author,
            tags,
        }
    }

    /// Published, with a publish timestamp that is not in the future.
    pub(crate) fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.status == PostStatus::Published
            && self.published_at.is_some_and(|published_at| published_at <= now)
    }

    pub(crate) fn tag_ids(&self) -> Vec<Uuid> {
        self.tags.iter().map(|tag| tag.id).collect()
    }

    pub(crate) fn reading_minutes(&self) -> usize {
        let words = self
            .content_md
            .as_deref()
            .map(|body| body.split_whitespace().count())
            .unwrap_or(0);
        words.div_ceil(WORDS_PER_MINUTE).max(1)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use super::{Author, PostRecord, PostStatus, Tag};
    use crate::domain::lang::Lang;

    pub(crate) fn record(slug: &str, published_at: Option<DateTime<Utc>>) -> PostRecord {
        let created_at = published_at.unwrap_or_else(Utc::now);
        PostRecord {
            id: Uuid::new_v4(),
            lang: Lang::Tr,
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            excerpt: None,
            content_md: Some(format!("# {slug}\n\nbody")),
            cover_url: None,
            status: PostStatus::Published,
            author_id: None,
            published_at,
            created_at,
            updated_at: created_at,
        }
    }

    pub(crate) fn tag(slug: &str) -> Tag {
        Tag {
            id: Uuid::new_v4(),
            name: slug.to_uppercase(),
            slug: slug.to_string(),
        }
    }

    pub(crate) fn author(slug: &str) -> Author {
        Author {
            id: Uuid::new_v4(),
            name: format!("Author {slug}"),
            slug: slug.to_string(),
            avatar_url: None,
            bio: None,
            created_at: Utc::now(),
        }
    }
}
