// ============================================================================
// CMS API - Page Handlers
// File: crates/cms-api/src/handlers/page.rs
// ============================================================================
//! Site pages rendered from the registered templates.

use axum::{
    extract::{Path, State},
    response::Html,
    Extension,
};
use cms_core::i18n::LocaleTag;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

pub const INDEX_TEMPLATE: &str = "index";

async fn render(state: &AppState, template: &str, lang: &LocaleTag) -> Result<Html<String>, ApiError> {
    let data = json!({
        "lang": lang,
        "site": { "name": state.config.app.name },
    });
    Ok(Html(state.renderer.render(template, data).await?))
}

/// GET /
pub async fn index(State(state): State<AppState>, Extension(lang): Extension<LocaleTag>) -> Result<Html<String>, ApiError> {
    render(&state, INDEX_TEMPLATE, &lang).await
}

/// GET /{page}
pub async fn page(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Extension(lang): Extension<LocaleTag>,
) -> Result<Html<String>, ApiError> {
    if !state.renderer.has_template(&page) {
        return Err(ApiError::NotFound(format!("page {page}")));
    }
    render(&state, &page, &lang).await
}
