use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::lang::Lang;
use crate::domain::post::{Post, Tag};

const SITE_NAME: &str = "Velvele";

/// Head metadata for a page: `<title>`, description, canonical link and OpenGraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub(crate) struct PageMetaDto {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) canonical_url: String,
    pub(crate) og_type: String,
    pub(crate) og_image: Option<String>,
    pub(crate) keywords: Vec<String>,
}

pub(crate) fn post_meta(post: &Post, site_url: &str) -> PageMetaDto {
    let description = match post.excerpt.as_deref().map(str::trim) {
        Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
        _ => match post.lang {
            Lang::Tr => format!("{} - {SITE_NAME} blog yazısı", post.title),
            Lang::En => format!("{} - {SITE_NAME} blog post", post.title),
        },
    };

    PageMetaDto {
        title: format!("{} | {SITE_NAME}", post.title),
        description,
        canonical_url: format!("{site_url}/posts/{}", post.slug),
        og_type: "article".to_string(),
        og_image: post.cover_url.clone(),
        keywords: post.tags.iter().map(|tag| tag.name.clone()).collect(),
    }
}

pub(crate) fn tag_meta(tag: &Tag, post_count: u64, lang: Lang, site_url: &str) -> PageMetaDto {
    let (title, description) = match lang {
        Lang::Tr => (
            format!("{} Etiketi | {SITE_NAME}", tag.name),
            format!("{} etiketi ile ilgili {post_count} yazı bulundu.", tag.name),
        ),
        Lang::En => (
            format!("{} Tag | {SITE_NAME}", tag.name),
            format!("{post_count} posts tagged {}.", tag.name),
        ),
    };

    PageMetaDto {
        title,
        description,
        canonical_url: format!("{site_url}/etiket/{}", tag.slug),
        og_type: "website".to_string(),
        og_image: None,
        keywords: vec![tag.name.clone()],
    }
}
