//! PostgreSQL repository implementations

pub mod comment_repo_impl;
pub mod menu_repo_impl;
pub mod option_repo_impl;

pub use comment_repo_impl::PgCommentRepository;
pub use menu_repo_impl::PgMenuRepository;
pub use option_repo_impl::PgOptionRepository;
