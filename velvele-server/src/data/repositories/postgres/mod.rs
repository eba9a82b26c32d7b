use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use crate::domain::error::DomainError;

pub(crate) mod post_repository;
pub(crate) mod tag_repository;

/// Appends the visibility predicate for the `posts` table aliased as `p`.
fn push_visibility(qb: &mut QueryBuilder<'_, Postgres>, visible_at: DateTime<Utc>) {
    qb.push("p.status::text = 'published' AND p.published_at IS NOT NULL AND p.published_at <= ")
        .push_bind(visible_at);
}

fn map_store_error(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "store query failed");
    DomainError::Store(err.to_string())
}
