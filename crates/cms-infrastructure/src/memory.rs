//! In-memory adapters.
//!
//! One store backs all three repository ports. Team order is the order in
//! which a team first appears among the stored menus.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use parking_lot::RwLock;

use cms_core::domain::{MenuRecord, SortSpec};
use cms_core::error::DomainError;
use cms_core::repositories::{CommentRepository, MenuRepository, OptionRepository};

#[derive(Default)]
pub struct InMemoryStore {
    menus: RwLock<Vec<MenuRecord>>,
    options: RwLock<HashMap<String, String>>,
    comment_likes: RwLock<HashMap<i32, i64>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menus(menus: Vec<MenuRecord>) -> Self {
        let store = Self::new();
        *store.menus.write() = menus;
        store
    }

    pub fn set_option(&self, key: impl Into<String>, value: impl Into<String>) {
        self.options.write().insert(key.into(), value.into());
    }

    pub fn insert_comment(&self, comment_id: i32) {
        self.comment_likes.write().entry(comment_id).or_insert(0);
    }

    pub fn comment_likes(&self, comment_id: i32) -> Option<i64> {
        self.comment_likes.read().get(&comment_id).copied()
    }

    /// Make every read fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, AtomicOrdering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(DomainError::DatabaseError("in-memory store unavailable".into()));
        }
        Ok(())
    }
}

const SORTABLE: &[&str] = &["id", "name", "url", "priority", "parent_id", "team"];

fn compare(a: &MenuRecord, b: &MenuRecord, sort: &SortSpec) -> Ordering {
    for order in &sort.orders {
        let ordering = match order.property.as_str() {
            "id" => a.id.cmp(&b.id),
            "name" => a.name.cmp(&b.name),
            "url" => a.url.cmp(&b.url),
            "priority" => a.priority.cmp(&b.priority),
            "parent_id" => a.parent_id.cmp(&b.parent_id),
            _ => a.team.cmp(&b.team),
        };
        let ordering = if order.descending { ordering.reverse() } else { ordering };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id.cmp(&b.id)
}

fn sorted(mut menus: Vec<MenuRecord>, sort: &SortSpec) -> Result<Vec<MenuRecord>, DomainError> {
    if let Some(order) = sort.orders.iter().find(|o| !SORTABLE.contains(&o.property.as_str())) {
        return Err(DomainError::InvalidSort(order.property.clone()));
    }
    menus.sort_by(|a, b| compare(a, b, sort));
    Ok(menus)
}

#[async_trait]
impl MenuRepository for InMemoryStore {
    async fn list_by_team(&self, team: &str, sort: &SortSpec) -> Result<Vec<MenuRecord>, DomainError> {
        self.check_available()?;
        let menus = self.menus.read().iter().filter(|m| m.team == team).cloned().collect();
        sorted(menus, sort)
    }

    async fn list_teams(&self) -> Result<Vec<String>, DomainError> {
        self.check_available()?;
        let mut teams: Vec<String> = Vec::new();
        for menu in self.menus.read().iter() {
            if !teams.contains(&menu.team) {
                teams.push(menu.team.clone());
            }
        }
        Ok(teams)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.check_available()?;
        Ok(self.menus.read().len() as i64)
    }
}

#[async_trait]
impl OptionRepository for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_available()?;
        Ok(self.options.read().get(key).cloned())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn increase_like(&self, comment_id: i32) -> Result<bool, DomainError> {
        self.check_available()?;
        match self.comment_likes.write().get_mut(&comment_id) {
            Some(likes) => {
                *likes += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_core::domain::SortOrder;

    fn store() -> InMemoryStore {
        InMemoryStore::with_menus(vec![
            MenuRecord::new(3, "C", "/c", 2).with_team("main"),
            MenuRecord::new(1, "A", "/a", 2).with_team("main"),
            MenuRecord::new(2, "B", "/b", 1).with_team("footer"),
            MenuRecord::new(4, "D", "/d", 0).with_team("main"),
        ])
    }

    #[tokio::test]
    async fn test_list_by_team_sorted_with_id_tie_break() {
        let menus = store().list_by_team("main", &SortSpec::priority_asc()).await.unwrap();
        let ids: Vec<i32> = menus.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    #[tokio::test]
    async fn test_teams_in_first_appearance_order() {
        let store = store();
        assert_eq!(store.list_teams().await.unwrap(), vec!["main".to_string(), "footer".to_string()]);
        assert_eq!(store.count().await.unwrap(), 4);
        assert!(store.list_by_team("nope", &SortSpec::priority_asc()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_sort_field() {
        let spec = SortSpec { orders: vec![SortOrder::asc("color")] };
        assert!(matches!(store().list_by_team("main", &spec).await, Err(DomainError::InvalidSort(_))));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_reads() {
        let store = store();
        store.set_unavailable(true);
        assert!(store.list_teams().await.unwrap_err().is_store_failure());
    }

    #[tokio::test]
    async fn test_comment_likes() {
        let store = InMemoryStore::new();
        store.insert_comment(5);
        assert!(store.increase_like(5).await.unwrap());
        assert!(!store.increase_like(6).await.unwrap());
        assert_eq!(store.comment_likes(5), Some(1));
    }
}
