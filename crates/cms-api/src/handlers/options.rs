use std::collections::BTreeMap;

use axum::extract::State;
use cms_core::domain::property::{
    COMMENT_API_ENABLED, COMMENT_CONTENT_PLACEHOLDER, COMMENT_GRAVATAR_DEFAULT, COMMENT_GRAVATAR_SOURCE,
};

use crate::error::ApiError;
use crate::envelope::Envelope;
use crate::state::AppState;

/// GET /api/content/options/comment
///
/// Comment widget settings, hidden entirely while the comment API is off.
pub async fn comment_options(
    State(state): State<AppState>,
) -> Result<Envelope<BTreeMap<&'static str, String>>, ApiError> {
    if !state.options.get_bool(&COMMENT_API_ENABLED).await {
        return Err(ApiError::NotFound("comment api disabled".to_string()));
    }

    let mut result = BTreeMap::new();
    for property in [&COMMENT_GRAVATAR_SOURCE, &COMMENT_GRAVATAR_DEFAULT, &COMMENT_CONTENT_PLACEHOLDER] {
        result.insert(property.key, state.options.get_string(property).await);
    }
    Ok(Envelope::ok(result))
}
