//! Auth Router

use axum::{Router, middleware, routing::get};

use crate::presentation::handlers::{self, AuthAppState, AuthStore};
use crate::presentation::middleware::check_auth_session;

/// Create the Auth router for any repository implementation
///
/// Takes the state by value so the same state can also guard the blog
/// routes.
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: AuthStore,
{
    Router::new()
        .route(
            "/register",
            get(handlers::register_form::<R>).post(handlers::register_submit::<R>),
        )
        .route(
            "/login",
            get(handlers::login_form::<R>).post(handlers::login_submit::<R>),
        )
        .route(
            "/logout",
            get(handlers::logout::<R>).post(handlers::logout::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            check_auth_session::<R>,
        ))
        .with_state(state)
}
