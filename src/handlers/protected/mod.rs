// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind jwt_auth_middleware, which inserts an
// AuthUser into the request extensions. Handlers pass AuthUser::owner()
// into each store call.

pub mod offices;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/offices", get(offices::list).post(offices::create))
        .route("/offices/:id", put(offices::update).delete(offices::delete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
