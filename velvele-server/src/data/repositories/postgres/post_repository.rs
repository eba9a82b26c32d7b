use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{map_store_error, push_visibility};
use crate::data::post_repository::{PostFilter, PostRepository, Window};
use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post, PostRecord, Tag};

const SELECT_POSTS: &str = r#"
    SELECT
        p.id,
        p.lang::text AS lang,
        p.slug,
        p.title,
        p.excerpt,
        p.content_md,
        p.cover_url,
        p.status::text AS status,
        p.author_id,
        p.published_at,
        p.created_at,
        p.updated_at,
        a.name AS author_name,
        a.slug AS author_slug,
        a.avatar_url AS author_avatar_url,
        a.bio AS author_bio,
        a.created_at AS author_created_at
    FROM posts p
    LEFT JOIN authors a ON a.id = p.author_id"#;

const SELECT_POST_TAGS: &str = r#"
    SELECT pt.post_id, t.id, t.name, t.slug
    FROM post_tags pt
    JOIN tags t ON t.id = pt.tag_id
    WHERE pt.post_id = ANY($1)
    ORDER BY t.name ASC
    "#;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_tags(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Tag>>, DomainError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PostTagRow>(SELECT_POST_TAGS)
            .bind(post_ids.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_error)?;

        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_post.entry(row.post_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                slug: row.slug,
            });
        }
        Ok(by_post)
    }
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    lang: String,
    slug: String,
    title: String,
    excerpt: Option<String>,
    content_md: Option<String>,
    cover_url: Option<String>,
    status: String,
    author_id: Option<Uuid>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: Option<String>,
    author_slug: Option<String>,
    author_avatar_url: Option<String>,
    author_bio: Option<String>,
    author_created_at: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct PostTagRow {
    post_id: Uuid,
    id: Uuid,
    name: String,
    slug: String,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_posts(
        &self,
        filter: &PostFilter,
        window: Window,
    ) -> Result<Vec<Post>, DomainError> {
        let mut query = page_query(filter, window);
        let rows = query
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut tags = self.load_tags(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let post_tags = tags.remove(&row.id).unwrap_or_default();
                map_row_to_post(row, post_tags)
            })
            .collect()
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        let mut query = count_query(filter);
        let count: i64 = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(count.max(0) as u64)
    }
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &PostFilter) {
    qb.push(" WHERE ");
    push_visibility(qb, filter.visible_at);

    if let Some(lang) = filter.lang {
        qb.push(" AND p.lang::text = ").push_bind(lang.as_str());
    }
    if let Some(slug) = &filter.slug {
        qb.push(" AND p.slug = ").push_bind(slug.clone());
    }
    if let Some(post_id) = filter.exclude_id {
        qb.push(" AND p.id <> ").push_bind(post_id);
    }
    if let Some(tag_slug) = &filter.tag_slug {
        qb.push(
            " AND EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = p.id AND t.slug = ",
        )
        .push_bind(tag_slug.clone())
        .push(")");
    }
    // semi-join: a post sharing several candidate tags still yields one row
    if let Some(tag_ids) = &filter.any_tag_ids {
        qb.push(
            " AND EXISTS (SELECT 1 FROM post_tags pt \
             WHERE pt.post_id = p.id AND pt.tag_id = ANY(",
        )
        .push_bind(tag_ids.clone())
        .push("))");
    }
}

fn count_query(filter: &PostFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM posts p");
    push_filter(&mut qb, filter);
    qb
}

fn page_query(filter: &PostFilter, window: Window) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_POSTS);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY p.published_at DESC, p.id DESC LIMIT ")
        .push_bind(i64::from(window.limit))
        .push(" OFFSET ")
        .push_bind(i64::try_from(window.offset).unwrap_or(i64::MAX));
    qb
}

fn map_row_to_post(row: PostRow, tags: Vec<Tag>) -> Result<Post, DomainError> {
    let lang = row
        .lang
        .parse()
        .map_err(|err: DomainError| DomainError::Unexpected(err.to_string()))?;
    let status = row
        .status
        .parse()
        .map_err(|err: DomainError| DomainError::Unexpected(err.to_string()))?;

    let author = match (row.author_id, row.author_name, row.author_slug, row.author_created_at) {
        (Some(id), Some(name), Some(slug), Some(created_at)) => Some(Author {
            id,
            name,
            slug,
            avatar_url: row.author_avatar_url,
            bio: row.author_bio,
            created_at,
        }),
        _ => None,
    };

    let record = PostRecord {
        id: row.id,
        lang,
        slug: row.slug,
        title: row.title,
        excerpt: row.excerpt,
        content_md: row.content_md,
        cover_url: row.cover_url,
        status,
        author_id: row.author_id,
        published_at: row.published_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };

    Ok(Post::new(record, author, tags))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::{count_query, page_query};
    use crate::data::post_repository::{PostFilter, Window};
    use crate::domain::lang::Lang;

    fn where_clause(sql: &str) -> &str {
        let start = sql.find(" WHERE ").expect("query must have a WHERE clause");
        let end = sql.find(" ORDER BY ").unwrap_or(sql.len());
        &sql[start..end]
    }

    #[test]
    fn count_and_page_share_the_same_predicate() {
        let filter = PostFilter::visible(Utc::now())
            .in_lang(Lang::Tr)
            .tagged(Some("rust".to_string()));

        let count = count_query(&filter);
        let page = page_query(&filter, Window { offset: 12, limit: 12 });
        let count_sql = count.sql();
        let page_sql = page.sql();

        assert_eq!(where_clause(count_sql), where_clause(page_sql));
        assert!(count_sql.contains("t.slug = $3"));
    }

    #[test]
    fn page_query_orders_by_publish_time_then_id() {
        let filter = PostFilter::visible(Utc::now()).in_lang(Lang::En);
        let page = page_query(&filter, Window::first(3));
        let sql = page.sql();

        assert!(sql.contains("ORDER BY p.published_at DESC, p.id DESC LIMIT $3 OFFSET $4"));
        assert!(sql.contains("p.status::text = 'published'"));
        assert!(sql.contains("p.published_at IS NOT NULL"));
    }

    #[test]
    fn related_filter_uses_semi_join_and_exclusion() {
        let filter = PostFilter::visible(Utc::now())
            .in_lang(Lang::Tr)
            .excluding(Uuid::new_v4())
            .sharing_tags(vec![Uuid::new_v4(), Uuid::new_v4()]);
        let count = count_query(&filter);
        let sql = count.sql();

        assert!(sql.contains("p.id <> $3"));
        assert!(sql.contains("pt.tag_id = ANY($4)"));
        assert!(!sql.contains("JOIN post_tags pt ON"));
    }
}
