//! Comment repository trait (port)

use async_trait::async_trait;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Returns `false` when no comment has this id.
    async fn increase_like(&self, comment_id: i32) -> Result<bool, DomainError>;
}
