//! Domain services (render-time logic)

pub mod comment_service;
pub mod menu_service;
pub mod option_service;
pub mod team_policy;
pub mod tree_builder;

pub use comment_service::CommentService;
pub use menu_service::MenuService;
pub use option_service::OptionService;
pub use team_policy::{resolve_default_team, resolve_with_fallback};
pub use tree_builder::{build_forest, build_tree, flatten, Forest, TreeDiagnostic};
