use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::database::InventoryRecord;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::payload::OfficePayload;

/// PUT /offices/:id - Replace the mutable fields of one of the caller's records
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<InventoryRecord> {
    let fields = OfficePayload::from_body(body)?.validate(state.validation)?;
    let id = parse_record_id(&id)?;

    let record = state.store.update(&user.owner(), id, fields).await?;
    tracing::debug!("Updated inventory record {} for {}", record.id, user.user_id());

    Ok(ApiResponse::success(record))
}

/// DELETE /offices/:id - Permanently remove one of the caller's records
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_record_id(&id)?;

    state.store.delete(&user.owner(), id).await?;
    tracing::debug!("Deleted inventory record {} for {}", id, user.user_id());

    Ok(ApiResponse::no_content())
}

/// A malformed id can't name any record, so it gets the same 404.
fn parse_record_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::record_not_found())
}
