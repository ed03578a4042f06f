// ============================================================================
// CMS Infrastructure - PostgreSQL Comment Repository
// File: crates/cms-infrastructure/src/database/postgres/comment_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use cms_core::error::DomainError;
use cms_core::repositories::CommentRepository;

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn increase_like(&self, comment_id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE comments SET likes = likes + 1 WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error liking comment {}: {}", comment_id, e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(result.rows_affected() > 0)
    }
}
