//! Menu repository trait (port)

use async_trait::async_trait;
use crate::domain::{MenuRecord, SortSpec};
use crate::error::DomainError;

/// Read contract over persisted menus.
///
/// Teams are not stored entities: `list_teams` is a distinct projection over
/// the `team` column of existing menus, so an empty list is a valid answer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Menus of one team in the requested order. No rows is `Ok(vec![])`.
    async fn list_by_team(&self, team: &str, sort: &SortSpec) -> Result<Vec<MenuRecord>, DomainError>;
    /// Distinct team labels in a stable, adapter-defined order.
    async fn list_teams(&self) -> Result<Vec<String>, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}
