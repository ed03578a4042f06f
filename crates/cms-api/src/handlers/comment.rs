use axum::extract::{Path, State};
use cms_core::domain::property::COMMENT_API_ENABLED;

use crate::error::ApiError;
use crate::envelope::Envelope;
use crate::state::AppState;

/// POST /api/content/comments/{comment_id}/likes
pub async fn like(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<Envelope<()>, ApiError> {
    if !state.options.get_bool(&COMMENT_API_ENABLED).await {
        return Err(ApiError::NotFound("comment api disabled".to_string()));
    }
    let comment_id: i32 = comment_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid comment id: {comment_id}")))?;

    state.comments.increase_like(comment_id).await?;
    Ok(Envelope::ok(()))
}
