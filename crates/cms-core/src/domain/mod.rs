//! # CMS Core - Domain Module
//! 
//! Domain entities for the CMS render layer.

pub mod menu;
pub mod property;
pub mod sort;

// Re-export all entities and enums
pub use menu::{MenuNode, MenuRecord, MenuTarget, ROOT_PARENT_ID};
pub use property::{Property, PropertyDefault};
pub use sort::{SortOrder, SortSpec};
