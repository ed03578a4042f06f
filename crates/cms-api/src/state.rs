use std::sync::Arc;

use cms_core::repositories::{CommentRepository, MenuRepository, OptionRepository};
use cms_core::services::{CommentService, MenuService, OptionService};
use cms_shared::config::AppConfig;
use cms_template::{build_engine, register_i18n_helpers, register_menu_helpers, HelperRegistry, PageRenderer};
use tokio::runtime::Handle;
use tracing::info;

use crate::error::StartupError;

pub type SiteMenuService = MenuService<dyn MenuRepository, dyn OptionRepository>;

/// Repository ports the application runs on.
#[derive(Clone)]
pub struct Repositories {
    pub menus: Arc<dyn MenuRepository>,
    pub options: Arc<dyn OptionRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    /// One store serving every port.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: MenuRepository + OptionRepository + CommentRepository + 'static,
    {
        Self { menus: store.clone(), options: store.clone(), comments: store }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub menus: Arc<SiteMenuService>,
    pub options: Arc<OptionService<dyn OptionRepository>>,
    pub comments: Arc<CommentService<dyn CommentRepository>>,
    pub renderer: PageRenderer,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire services, bind the helper set and load the site templates.
    ///
    /// Must be called from within the runtime the helpers will block on.
    pub fn build(repos: Repositories, config: AppConfig) -> Result<Self, StartupError> {
        let handle = Handle::try_current().map_err(|e| StartupError::Runtime(e.to_string()))?;

        let menus: Arc<SiteMenuService> = Arc::new(
            MenuService::new(repos.menus, repos.options.clone()).with_read_timeout(config.site.read_timeout()),
        );

        let mut registry = HelperRegistry::new();
        register_menu_helpers(&mut registry, menus.clone(), handle)?;
        register_i18n_helpers(&mut registry)?;
        info!(helpers = registry.len(), "Template helpers bound");

        let engine = build_engine(&config.site.template_dir, registry)
            .map_err(|e| StartupError::Template(e.to_string()))?;

        Ok(Self {
            menus,
            options: Arc::new(OptionService::new(repos.options)),
            comments: Arc::new(CommentService::new(repos.comments)),
            renderer: PageRenderer::new(engine, config.site.render_timeout()),
            config: Arc::new(config),
        })
    }
}
