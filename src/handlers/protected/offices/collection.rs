use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::Value;

use crate::database::InventoryRecord;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

use super::payload::OfficePayload;

/// GET /offices - List the caller's inventory records
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<InventoryRecord>> {
    let records = state.store.list(&user.owner()).await?;
    Ok(ApiResponse::success(records))
}

/// POST /offices - Create a record owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<InventoryRecord> {
    let fields = OfficePayload::from_body(body)?.validate(state.validation)?;

    let record = state.store.create(&user.owner(), fields).await?;
    tracing::debug!("Created inventory record {} for {}", record.id, user.user_id());

    Ok(ApiResponse::created(record))
}
