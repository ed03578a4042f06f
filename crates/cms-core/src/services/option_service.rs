// ============================================================================
// CMS Core - Option Service
// File: crates/cms-core/src/services/option_service.rs
// ============================================================================
//! Site options with typed defaults.
//!
//! Options only steer rendering, so a failed read degrades to the default
//! instead of failing the page.

use std::sync::Arc;
use tracing::warn;

use crate::domain::{Property, PropertyDefault};
use crate::repositories::OptionRepository;

pub struct OptionService<O: OptionRepository + ?Sized> {
    option_repo: Arc<O>,
}

impl<O: OptionRepository + ?Sized> OptionService<O> {
    pub fn new(option_repo: Arc<O>) -> Self {
        Self { option_repo }
    }

    async fn raw(&self, property: &Property) -> Option<String> {
        match self.option_repo.get(property.key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = property.key, "Failed to read option, using default: {}", e);
                None
            }
        }
    }

    pub async fn get_string(&self, property: &Property) -> String {
        match (self.raw(property).await, property.default) {
            (Some(value), _) => value,
            (None, PropertyDefault::Str(default)) => default.to_string(),
            (None, PropertyDefault::Bool(default)) => default.to_string(),
        }
    }

    pub async fn get_bool(&self, property: &Property) -> bool {
        let default = match property.default {
            PropertyDefault::Bool(default) => default,
            PropertyDefault::Str(default) => default == "true",
        };
        match self.raw(property).await {
            Some(value) => match value.trim().to_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                other => {
                    warn!(key = property.key, value = other, "Option is not a boolean, using default");
                    default
                }
            },
            None => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::{BLOG_LOCALE, COMMENT_API_ENABLED, DEFAULT_MENU_TEAM};
    use crate::error::DomainError;
    use crate::repositories::MockOptionRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_stored_value_wins() {
        let mut repo = MockOptionRepository::new();
        repo.expect_get()
            .with(eq("default_menu_team"))
            .returning(|_| Ok(Some("main".to_string())));
        let service = OptionService::new(Arc::new(repo));
        assert_eq!(service.get_string(&DEFAULT_MENU_TEAM).await, "main");
    }

    #[tokio::test]
    async fn test_missing_and_failing_reads_use_default() {
        let mut repo = MockOptionRepository::new();
        repo.expect_get().with(eq("blog_locale")).returning(|_| Ok(None));
        repo.expect_get()
            .with(eq("comment_api_enabled"))
            .returning(|_| Err(DomainError::DatabaseError("down".into())));
        let service = OptionService::new(Arc::new(repo));
        assert_eq!(service.get_string(&BLOG_LOCALE).await, "zh");
        assert!(!service.get_bool(&COMMENT_API_ENABLED).await);
    }

    #[tokio::test]
    async fn test_bool_parsing() {
        let mut repo = MockOptionRepository::new();
        repo.expect_get().returning(|_| Ok(Some(" TRUE ".to_string())));
        let service = OptionService::new(Arc::new(repo));
        assert!(service.get_bool(&COMMENT_API_ENABLED).await);
    }
}
