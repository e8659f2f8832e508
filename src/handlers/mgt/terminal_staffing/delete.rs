// handlers/mgt/terminal_staffing/delete.rs - ANY /api/mgt/terminal_staffing/delete handler

use axum::extract::{Extension, State};
use serde::Serialize;

use crate::api::RequestParams;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthorizedCaller};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StaffingDeleted {
    pub id: i64,
    /// Rows removed; 0 when the entry was already gone
    pub deleted: u64,
}

/// Delete one terminal staffing entry by `id` (query string or body).
///
/// Runs behind `authorize_middleware`. A missing or non-numeric `id` is
/// coerced to 0 unless strict id parsing is configured. Deleting an entry
/// that does not exist still succeeds, so repeating a request is harmless.
///
/// Expected Output (Success):
/// ```json
/// { "success": true, "data": { "id": 42, "deleted": 1 } }
/// ```
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthorizedCaller>,
    params: RequestParams,
) -> ApiResult<StaffingDeleted> {
    let id = match params.int_param("id") {
        None => 0,
        Some(p) if !p.exact && state.config.security.strict_id_params => {
            tracing::warn!("Rejected non-numeric staffing id: {:?}", params.get("id"));
            return Err(ApiError::bad_request("Parameter 'id' must be an integer"));
        }
        Some(p) => p.value,
    };

    let deleted = state.staffing.delete(id).await?;

    if state.config.security.enable_audit_logging {
        tracing::info!(
            target: "audit",
            staffing_id = id,
            rows = deleted,
            caller = ?caller.cid(),
            bypass = matches!(caller, AuthorizedCaller::DebugBypass),
            "terminal staffing entry deleted"
        );
    } else {
        tracing::debug!("Deleted terminal staffing id {} ({} rows)", id, deleted);
    }

    Ok(ApiResponse::success(StaffingDeleted { id, deleted }))
}
