use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{map_store_error, push_visibility};
use crate::data::tag_repository::TagRepository;
use crate::domain::error::DomainError;
use crate::domain::lang::Lang;
use crate::domain::post::{Tag, TagWithCount};

#[derive(Debug, Clone)]
pub(crate) struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TagRow {
    id: Uuid,
    name: String,
    slug: String,
}

#[derive(FromRow)]
struct TagCountRow {
    id: Uuid,
    name: String,
    slug: String,
    post_count: i64,
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn list_tags_with_counts(
        &self,
        lang: Lang,
        visible_at: DateTime<Utc>,
    ) -> Result<Vec<TagWithCount>, DomainError> {
        let mut query = tag_counts_query(lang, visible_at);
        let rows = query
            .build_query_as::<TagCountRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_store_error)?;

        Ok(rows
            .into_iter()
            .map(|row| TagWithCount {
                tag: Tag {
                    id: row.id,
                    name: row.name,
                    slug: row.slug,
                },
                post_count: row.post_count.max(0) as u64,
            })
            .collect())
    }

    async fn find_tag_by_slug(&self, slug: &str) -> Result<Option<Tag>, DomainError> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT id, name, slug
            FROM tags
            WHERE slug = $1
            LIMIT 1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        Ok(row.map(|row| Tag {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }))
    }
}

fn tag_counts_query(lang: Lang, visible_at: DateTime<Utc>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT t.id, t.name, t.slug, COUNT(DISTINCT p.id) AS post_count \
         FROM tags t \
         JOIN post_tags pt ON pt.tag_id = t.id \
         JOIN posts p ON p.id = pt.post_id \
         WHERE ",
    );
    push_visibility(&mut qb, visible_at);
    qb.push(" AND p.lang::text = ")
        .push_bind(lang.as_str())
        .push(" GROUP BY t.id, t.name, t.slug ORDER BY post_count DESC, t.name ASC");
    qb
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::tag_counts_query;
    use crate::domain::lang::Lang;

    #[test]
    fn tag_counts_only_consider_visible_posts() {
        let query = tag_counts_query(Lang::Tr, Utc::now());
        let sql = query.sql();

        assert!(sql.contains("p.status::text = 'published'"));
        assert!(sql.contains("p.published_at <= $1"));
        assert!(sql.contains("p.lang::text = $2"));
        assert!(sql.contains("COUNT(DISTINCT p.id)"));
    }
}
