// ============================================================================
// CMS Infrastructure - PostgreSQL Option Repository
// File: crates/cms-infrastructure/src/database/postgres/option_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use cms_core::error::DomainError;
use cms_core::repositories::OptionRepository;

pub struct PgOptionRepository {
    pool: PgPool,
}

impl PgOptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OptionRepository for PgOptionRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        sqlx::query_scalar::<_, String>("SELECT option_value FROM options WHERE option_key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error reading option {}: {}", key, e);
                DomainError::DatabaseError(e.to_string())
            })
    }
}
