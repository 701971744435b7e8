//! Order tracking proxy.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use artemia_core::OrderCode;

use crate::error::AppError;
use crate::state::AppState;

/// Proxy an order code to the external tracking API.
///
/// The upstream JSON body is returned verbatim; any upstream failure maps
/// to the standard error envelope.
pub async fn track(
    State(state): State<AppState>,
    Path(order_code): Path<String>,
) -> Result<Json<Value>, AppError> {
    let order_code = OrderCode::parse(&order_code)
        .map_err(|e| AppError::Validation(format!("invalid order code: {e}")))?;

    let body = state.tracking().track(&order_code).await?;
    Ok(Json(body))
}
