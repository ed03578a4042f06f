// ============================================================================
// CMS Core - Menu Entity
// File: crates/cms-core/src/domain/menu.rs
// Description: Navigation menu record and derived tree node
// ============================================================================

use serde::{Deserialize, Serialize};

/// Parent id carried by top-level menus.
pub const ROOT_PARENT_ID: i32 = 0;

/// Where a menu link opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuTarget {
    #[serde(rename = "_self")]
    SelfWindow,
    #[serde(rename = "_blank")]
    NewWindow,
    #[serde(rename = "_parent")]
    Parent,
    #[serde(rename = "_top")]
    Top,
}

impl MenuTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuTarget::SelfWindow => "_self",
            MenuTarget::NewWindow => "_blank",
            MenuTarget::Parent => "_parent",
            MenuTarget::Top => "_top",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "_self" => Some(MenuTarget::SelfWindow),
            "_blank" => Some(MenuTarget::NewWindow),
            "_parent" => Some(MenuTarget::Parent),
            "_top" => Some(MenuTarget::Top),
            _ => None,
        }
    }
}

impl Default for MenuTarget {
    fn default() -> Self {
        MenuTarget::SelfWindow
    }
}

/// Menu record as persisted. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub priority: i32,
    pub parent_id: i32,
    pub team: String,
    pub target: MenuTarget,
    pub icon: Option<String>,
}

impl MenuRecord {
    pub fn new(id: i32, name: impl Into<String>, url: impl Into<String>, priority: i32) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            priority,
            parent_id: ROOT_PARENT_ID,
            team: String::new(),
            target: MenuTarget::default(),
            icon: None,
        }
    }

    pub fn with_parent(mut self, parent_id: i32) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    pub fn is_root_menu(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }

    /// Sibling order: priority ascending, id breaks ties.
    pub fn sort_key(&self) -> (i32, i32) {
        (self.priority, self.id)
    }
}

/// A menu with its ordered children, built fresh for each render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub menu: MenuRecord,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Number of nodes in this subtree, including self.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Menu chains can be arbitrarily deep; unwind them without recursion.
impl Drop for MenuNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}
