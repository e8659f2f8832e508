use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::{any, get},
    Router,
};
use time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::{SecurityConfig, SessionConfig};
use crate::handlers;
use crate::middleware::authorize_middleware;
use crate::state::AppState;

/// Full application router: routes plus session, CORS and trace layers.
///
/// `store` must be the session store the login flow writes to; the caller id
/// only reaches this service through it.
pub fn app<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    with_layers(routes(state.clone()), state, store)
}

/// Route table without the outer layers
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Session-authorized management API
        .merge(mgt_routes(state))
}

/// Wrap a route table with the session layer and global middleware.
pub fn with_layers<Store>(routes: Router<AppState>, state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    routes
        .layer(session_layer(store, &state.config.session))
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn mgt_routes(state: AppState) -> Router<AppState> {
    use handlers::mgt::terminal_staffing;

    Router::new()
        // Method is unrestricted; the page posts a form, API clients may DELETE
        .route(
            "/api/mgt/terminal_staffing/delete",
            any(terminal_staffing::staffing_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, authorize_middleware))
}

/// Sessions are resumed from the cookie or started fresh per request; the
/// layer persists them only when modified.
fn session_layer<Store>(store: Store, config: &SessionConfig) -> SessionManagerLayer<Store>
where
    Store: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_secure(config.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(config.inactivity_minutes)))
}

fn cors_layer(config: &SecurityConfig) -> CorsLayer {
    if !config.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
