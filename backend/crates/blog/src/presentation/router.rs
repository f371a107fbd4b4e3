//! Blog Router

use auth::middleware::{check_auth_session, require_auth_session};
use auth::{AuthAppState, AuthStore, SqliteAuthRepository};
use axum::{Router, middleware, routing::get};

use crate::infra::sqlite::SqlitePostRepository;
use crate::presentation::handlers::{self, BlogAppState, PostStore};

/// Create the Blog router with the SQLite repositories
pub fn blog_router(
    repo: SqlitePostRepository,
    auth_state: AuthAppState<SqliteAuthRepository>,
) -> Router {
    let state = BlogAppState::new(repo, auth_state.config.cookie_secure);
    blog_router_generic(state, auth_state)
}

/// Create a generic Blog router
///
/// Every page learns who is signed in; `/dashboard` and `/blog/*` also
/// require it.
pub fn blog_router_generic<P, R>(state: BlogAppState<P>, auth_state: AuthAppState<R>) -> Router
where
    P: PostStore,
    R: AuthStore,
{
    let protected = Router::new()
        .route("/dashboard", get(handlers::dashboard::<P>))
        .route(
            "/blog/new",
            get(handlers::new_post_form::<P>).post(handlers::new_post_submit::<P>),
        )
        .route("/blog/{id}", get(handlers::post_detail::<P>))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            require_auth_session::<R>,
        ));

    Router::new()
        .route("/", get(handlers::home::<P>))
        .merge(protected)
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            check_auth_session::<R>,
        ))
        .with_state(state)
}
