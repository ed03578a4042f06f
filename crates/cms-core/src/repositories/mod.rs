//! Repository traits (ports)

pub mod comment_repository;
pub mod menu_repository;
pub mod option_repository;

pub use comment_repository::CommentRepository;
pub use menu_repository::MenuRepository;
pub use option_repository::OptionRepository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use option_repository::MockOptionRepository;
