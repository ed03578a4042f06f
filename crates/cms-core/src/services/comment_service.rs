//! Comment interactions exposed by the content API

use std::sync::Arc;
use tracing::info;

use crate::error::DomainError;
use crate::repositories::CommentRepository;

pub struct CommentService<C: CommentRepository + ?Sized> {
    comment_repo: Arc<C>,
}

impl<C: CommentRepository + ?Sized> CommentService<C> {
    pub fn new(comment_repo: Arc<C>) -> Self {
        Self { comment_repo }
    }

    pub async fn increase_like(&self, comment_id: i32) -> Result<(), DomainError> {
        if !self.comment_repo.increase_like(comment_id).await? {
            return Err(DomainError::CommentNotFound(comment_id));
        }
        info!(comment_id, "Comment liked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockCommentRepository;

    #[tokio::test]
    async fn test_unknown_comment_is_not_found() {
        let mut repo = MockCommentRepository::new();
        repo.expect_increase_like().returning(|id| Ok(id == 1));
        let service = CommentService::new(Arc::new(repo));
        assert!(service.increase_like(1).await.is_ok());
        assert_eq!(service.increase_like(2).await, Err(DomainError::CommentNotFound(2)));
    }
}
