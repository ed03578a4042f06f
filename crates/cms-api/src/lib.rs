//! # CMS API
//! 
//! HTTP boundary: locale negotiation, page rendering, content API, health.

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, StartupError};
pub use router::build_router;
pub use state::{AppState, Repositories};
