//! # CMS Core
//! 
//! Domain entities, repository traits, and the render-time services the
//! template layer calls into: locale negotiation, translations, menu trees
//! and team resolution.

pub mod domain;
pub mod error;
pub mod i18n;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
