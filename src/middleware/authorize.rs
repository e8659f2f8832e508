use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::error::ApiError;
use crate::session::SessionIdentity;
use crate::state::AppState;

/// Who was let through the permission check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizedCaller {
    /// Session caller id matched a row in the user directory
    Account { cid: i64 },
    /// Operator mode granted access without a lookup
    DebugBypass,
}

impl AuthorizedCaller {
    pub fn cid(&self) -> Option<i64> {
        match self {
            AuthorizedCaller::Account { cid } => Some(*cid),
            AuthorizedCaller::DebugBypass => None,
        }
    }
}

/// Middleware that gates management routes on the session caller.
///
/// Any existing account passes; there is no role or ownership check. On
/// denial the request ends with 403 before the handler runs.
pub async fn authorize_middleware(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let caller = authorize(&state, &SessionIdentity::new(session)).await?;

    // Inject caller into request
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

pub async fn authorize(
    state: &AppState,
    identity: &SessionIdentity,
) -> Result<AuthorizedCaller, ApiError> {
    if state.config.security.debug_auth_bypass {
        tracing::warn!("Debug auth bypass enabled: request authorized without directory lookup");
        identity.reset_to_sentinel().await?;
        return Ok(AuthorizedCaller::DebugBypass);
    }

    let Some(cid) = identity.caller_id().await? else {
        tracing::warn!("Authorization failed: no caller id in session");
        return Err(ApiError::forbidden("Not authorized"));
    };

    // Only a returned row authorizes; a failed lookup denies like a missing one
    match state.users.account_exists(cid).await {
        Ok(true) => {
            tracing::debug!("Authorization successful for cid {}", cid);
            Ok(AuthorizedCaller::Account { cid })
        }
        Ok(false) => {
            tracing::warn!("Authorization failed: cid {} not found in user directory", cid);
            Err(ApiError::forbidden("Not authorized"))
        }
        Err(e) => {
            tracing::error!("User directory lookup failed for cid {}: {}", cid, e);
            Err(ApiError::forbidden("Not authorized"))
        }
    }
}
