// ============================================================================
// CMS Core - Menu Service
// File: crates/cms-core/src/services/menu_service.rs
// ============================================================================
//! Menu listings backing the template helpers.
//!
//! Empty data is a normal answer here: an unknown team or a site without
//! menus yields an empty list or forest. Only store failures, including a
//! read exceeding the configured deadline, come back as errors.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use cms_shared::constants::DEFAULT_READ_TIMEOUT_MS;
use tracing::{debug, error};

use crate::domain::property::DEFAULT_MENU_TEAM;
use crate::domain::{MenuNode, MenuRecord, SortSpec};
use crate::error::DomainError;
use crate::repositories::{MenuRepository, OptionRepository};
use crate::services::option_service::OptionService;
use crate::services::team_policy::resolve_with_fallback;
use crate::services::tree_builder::build_tree;

pub struct MenuService<M: MenuRepository + ?Sized, O: OptionRepository + ?Sized> {
    menu_repo: Arc<M>,
    options: OptionService<O>,
    read_timeout: Duration,
}

impl<M: MenuRepository + ?Sized, O: OptionRepository + ?Sized> MenuService<M, O> {
    pub fn new(menu_repo: Arc<M>, option_repo: Arc<O>) -> Self {
        Self {
            menu_repo,
            options: OptionService::new(option_repo),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Bound a single repository read by the read deadline.
    async fn bounded<T, F>(&self, operation: &'static str, read: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.read_timeout, read).await {
            Ok(result) => result,
            Err(_) => {
                error!(operation, timeout_ms = self.read_timeout.as_millis() as u64, "Menu read timed out");
                Err(DomainError::Timeout(operation))
            }
        }
    }

    async fn configured_team(&self) -> String {
        self.options.get_string(&DEFAULT_MENU_TEAM).await
    }

    /// `listMenu`: default team, flat, with cross-team rescue.
    pub async fn list_menu(&self) -> Result<Vec<MenuRecord>, DomainError> {
        let configured = self.configured_team().await;
        resolve_with_fallback(&configured, |team| self.fetch_team(team), || self.list_teams()).await
    }

    /// `listMenuAsTree`: default team, as a forest, with cross-team rescue.
    pub async fn list_menu_as_tree(&self) -> Result<Vec<MenuNode>, DomainError> {
        let configured = self.configured_team().await;
        resolve_with_fallback(
            &configured,
            |team| async move { self.fetch_team(team).await.map(build_tree) },
            || self.list_teams(),
        )
        .await
    }

    /// `listMenuTeams`
    pub async fn list_teams(&self) -> Result<Vec<String>, DomainError> {
        self.bounded("list_teams", self.menu_repo.list_teams()).await
    }

    /// `listMenuByTeam`: no fallback, unknown team is empty.
    pub async fn list_by_team(&self, team: &str) -> Result<Vec<MenuRecord>, DomainError> {
        self.fetch_team(team.to_string()).await
    }

    /// `listMenuAsTreeByTeam`: no fallback.
    pub async fn list_as_tree_by_team(&self, team: &str) -> Result<Vec<MenuNode>, DomainError> {
        self.fetch_team(team.to_string()).await.map(build_tree)
    }

    /// `getMenuCount`
    pub async fn count(&self) -> Result<i64, DomainError> {
        self.bounded("count", self.menu_repo.count()).await
    }

    async fn fetch_team(&self, team: String) -> Result<Vec<MenuRecord>, DomainError> {
        let sort = SortSpec::priority_asc();
        let menus = self.bounded("list_by_team", self.menu_repo.list_by_team(&team, &sort)).await?;
        debug!(team = %team, count = menus.len(), "Listed menus");
        Ok(menus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockMenuRepository, MockOptionRepository};
    use mockall::predicate::eq;

    fn menu(id: i32, priority: i32, parent_id: i32, team: &str) -> MenuRecord {
        MenuRecord::new(id, format!("menu-{id}"), "/", priority).with_parent(parent_id).with_team(team)
    }

    fn options(team: Option<&'static str>) -> MockOptionRepository {
        let mut repo = MockOptionRepository::new();
        repo.expect_get()
            .with(eq("default_menu_team"))
            .returning(move |_| Ok(team.map(str::to_string)));
        repo
    }

    fn service(menus: MockMenuRepository, team: Option<&'static str>) -> MenuService<MockMenuRepository, MockOptionRepository> {
        MenuService::new(Arc::new(menus), Arc::new(options(team)))
    }

    #[tokio::test]
    async fn test_list_menu_uses_configured_team() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_by_team()
            .withf(|team, sort| team == "main" && *sort == SortSpec::priority_asc())
            .times(1)
            .returning(|_, _| Ok(vec![menu(1, 1, 0, "main")]));
        menus.expect_list_teams().never();
        let result = service(menus, Some("main")).list_menu().await.unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_list_menu_rescues_from_other_team() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_by_team().withf(|team, _| team == "main").returning(|_, _| Ok(vec![]));
        menus.expect_list_by_team()
            .withf(|team, _| team == "secondary")
            .returning(|_, _| Ok(vec![menu(9, 1, 0, "secondary")]));
        menus.expect_list_teams()
            .times(1)
            .returning(|| Ok(vec!["main".into(), "secondary".into()]));
        let result = service(menus, Some("main")).list_menu().await.unwrap();
        assert_eq!(result[0].id, 9);
    }

    #[tokio::test]
    async fn test_tree_rescue_and_shape() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_by_team().withf(|team, _| team == "gone").returning(|_, _| Ok(vec![]));
        menus.expect_list_by_team()
            .withf(|team, _| team == "main")
            .returning(|_, _| Ok(vec![menu(1, 1, 0, "main"), menu(2, 1, 1, "main")]));
        menus.expect_list_teams().returning(|| Ok(vec!["".into(), "main".into()]));
        let forest = service(menus, Some("gone")).list_menu_as_tree().await.unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children[0].menu.id, 2);
    }

    #[tokio::test]
    async fn test_by_team_has_no_fallback() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_by_team().returning(|_, _| Ok(vec![]));
        menus.expect_list_teams().never();
        let service = service(menus, Some("main"));
        assert!(service.list_by_team("missing").await.unwrap().is_empty());
        assert!(service.list_as_tree_by_team("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_by_team()
            .returning(|_, _| Err(DomainError::DatabaseError("connection refused".into())));
        let err = service(menus, Some("main")).list_menu().await.unwrap_err();
        assert!(err.is_store_failure());
    }

    #[tokio::test]
    async fn test_tree_is_idempotent() {
        let mut menus = MockMenuRepository::new();
        menus.expect_list_by_team()
            .returning(|_, _| Ok(vec![menu(2, 2, 0, "main"), menu(1, 1, 0, "main"), menu(3, 1, 2, "main")]));
        let service = service(menus, Some("main"));
        let first = service.list_menu_as_tree().await.unwrap();
        let second = service.list_menu_as_tree().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].menu.id, 1);
    }

    struct SlowMenus;

    #[async_trait::async_trait]
    impl MenuRepository for SlowMenus {
        async fn list_by_team(&self, _: &str, _: &SortSpec) -> Result<Vec<MenuRecord>, DomainError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
        async fn list_teams(&self) -> Result<Vec<String>, DomainError> {
            Ok(vec![])
        }
        async fn count(&self) -> Result<i64, DomainError> {
            Ok(0)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_read_times_out() {
        let service = MenuService::new(Arc::new(SlowMenus), Arc::new(options(None)))
            .with_read_timeout(Duration::from_millis(50));
        let err = service.list_by_team("main").await.unwrap_err();
        assert_eq!(err, DomainError::Timeout("list_by_team"));
    }
}
