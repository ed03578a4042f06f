//! # CMS Template
//! 
//! Binds the core services to the template engine as named helpers and
//! renders pages with them.

pub mod binding;
pub mod engine;
pub mod error;
pub mod registry;
pub mod renderer;

pub use binding::{register_i18n_helpers, register_menu_helpers};
pub use engine::build_engine;
pub use error::{RegistryError, RenderFailure};
pub use registry::{HelperFn, HelperRegistry, Signature};
pub use renderer::PageRenderer;
