// ============================================================================
// CMS Infrastructure - PostgreSQL Menu Repository
// File: crates/cms-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;

use cms_core::domain::{MenuRecord, MenuTarget, SortSpec};
use cms_core::error::DomainError;
use cms_core::repositories::MenuRepository;

const MENU_COLUMNS: &str = "id, name, url, priority, parent_id, team, target, icon";
const SORTABLE: &[&str] = &["id", "name", "url", "priority", "parent_id", "team"];

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub priority: i32,
    pub parent_id: i32,
    pub team: String,
    pub target: String,
    pub icon: Option<String>,
}

impl From<MenuRow> for MenuRecord {
    fn from(row: MenuRow) -> Self {
        MenuRecord {
            id: row.id,
            name: row.name,
            url: row.url,
            priority: row.priority,
            parent_id: row.parent_id,
            team: row.team,
            target: MenuTarget::from_str(&row.target).unwrap_or_default(),
            icon: row.icon.filter(|icon| !icon.is_empty()),
        }
    }
}

/// ORDER BY clause from whitelisted columns; `id` always breaks ties.
fn order_by(sort: &SortSpec) -> Result<String, DomainError> {
    let mut parts = Vec::with_capacity(sort.orders.len() + 1);
    for order in &sort.orders {
        if !SORTABLE.contains(&order.property.as_str()) {
            return Err(DomainError::InvalidSort(order.property.clone()));
        }
        let direction = if order.descending { "DESC" } else { "ASC" };
        parts.push(format!("{} {}", order.property, direction));
    }
    if !sort.orders.iter().any(|order| order.property == "id") {
        parts.push("id ASC".to_string());
    }
    Ok(format!("ORDER BY {}", parts.join(", ")))
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn list_by_team(&self, team: &str, sort: &SortSpec) -> Result<Vec<MenuRecord>, DomainError> {
        let sql = format!("SELECT {} FROM menus WHERE team = $1 {}", MENU_COLUMNS, order_by(sort)?);
        let rows: Vec<MenuRow> = match sqlx::query_as::<_, MenuRow>(&sql).bind(team).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(sqlx::Error::RowNotFound) => Vec::new(),
            Err(e) => return Err(db_error("listing menus by team", e)),
        };
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_teams(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT team FROM menus ORDER BY team ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing menu teams", e))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menus")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("counting menus", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_core::domain::SortOrder;

    #[test]
    fn test_order_by_appends_id_tie_break() {
        assert_eq!(order_by(&SortSpec::priority_asc()).unwrap(), "ORDER BY priority ASC, id ASC");
        let spec = SortSpec { orders: vec![
            SortOrder { property: "team".into(), descending: true },
            SortOrder { property: "id".into(), descending: true },
        ] };
        assert_eq!(order_by(&spec).unwrap(), "ORDER BY team DESC, id DESC");
    }

    #[test]
    fn test_order_by_rejects_unknown_columns() {
        let spec = SortSpec { orders: vec![SortOrder::asc("password")] };
        assert_eq!(order_by(&spec), Err(DomainError::InvalidSort("password".into())));
    }

    #[test]
    fn test_row_mapping_defaults_unknown_target() {
        let row = MenuRow {
            id: 1,
            name: "Home".into(),
            url: "/".into(),
            priority: 1,
            parent_id: 0,
            team: "main".into(),
            target: "popup".into(),
            icon: Some(String::new()),
        };
        let menu = MenuRecord::from(row);
        assert_eq!(menu.target, MenuTarget::SelfWindow);
        assert_eq!(menu.icon, None);
    }
}
