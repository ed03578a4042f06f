//! # CMS Infrastructure
//! 
//! Repository adapters: PostgreSQL for deployments, in-memory for tests and
//! database-less runs.

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, PgCommentRepository, PgMenuRepository, PgOptionRepository};
pub use memory::InMemoryStore;
