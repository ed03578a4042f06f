//! Option repository trait (port)

use async_trait::async_trait;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OptionRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
}
