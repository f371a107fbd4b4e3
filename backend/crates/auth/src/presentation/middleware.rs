//! Auth Middleware
//!
//! `check_auth_session` resolves the session for every page;
//! `require_auth_session` additionally turns anonymous requests into a
//! redirect to the login page.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::{ClientFingerprint, extract_client_ip, extract_fingerprint};
use platform::cookie::extract_cookie;
use platform::flash::Flash;
use platform::html::SeeOther;
use std::net::SocketAddr;

use crate::application::{CheckSessionUseCase, CurrentAccount};
use crate::presentation::handlers::{AuthAppState, AuthStore};

/// Authentication status stored in request extensions
#[derive(Debug, Clone, Default)]
pub struct AuthStatus {
    pub account: Option<CurrentAccount>,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    /// Email shown in the navigation bar
    pub fn email(&self) -> Option<String> {
        self.account.as_ref().map(|a| a.email.to_string())
    }
}

/// Middleware that checks the auth session but doesn't require it
///
/// Inserts [`AuthStatus`] and the request's [`ClientFingerprint`].
pub async fn check_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthStore,
{
    let fingerprint = request_fingerprint(&req);
    let account = resolve_account(&state, req.headers(), &fingerprint).await;

    req.extensions_mut().insert(fingerprint);
    req.extensions_mut().insert(AuthStatus { account });

    next.run(req).await
}

/// Middleware that requires a valid auth session
///
/// Anonymous requests get `303 See Other` to `/login?next=<path>`; the
/// wrapped handler does not run. On success inserts [`CurrentAccount`].
pub async fn require_auth_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthStore,
{
    let resolved = req
        .extensions()
        .get::<AuthStatus>()
        .map(|status| status.account.clone());

    let account = match resolved {
        Some(account) => account,
        None => {
            let fingerprint = request_fingerprint(&req);
            let account = resolve_account(&state, req.headers(), &fingerprint).await;
            req.extensions_mut().insert(fingerprint);
            account
        }
    };

    let Some(account) = account else {
        tracing::debug!(path = %req.uri().path(), "Anonymous request to protected page");
        return SeeOther::to(login_redirect_target(req.uri()))
            .with_cookie(
                Flash::info("Please log in to access this page.")
                    .set_cookie(state.config.cookie_secure),
            )
            .into_response();
    };

    req.extensions_mut().insert(AuthStatus {
        account: Some(account.clone()),
    });
    req.extensions_mut().insert(account);

    next.run(req).await
}

fn request_fingerprint(req: &Request) -> ClientFingerprint {
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(req.headers(), direct_ip);
    extract_fingerprint(req.headers(), client_ip)
}

async fn resolve_account<R>(
    state: &AuthAppState<R>,
    headers: &HeaderMap,
    fingerprint: &ClientFingerprint,
) -> Option<CurrentAccount>
where
    R: AuthStore,
{
    let token = extract_cookie(headers, &state.config.session_cookie_name)?;

    let use_case =
        CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case.execute(&token, &fingerprint.hash).await {
        Ok(account) => Some(account),
        Err(e) => {
            e.log();
            None
        }
    }
}

/// `/login?next=<path and query>`
fn login_redirect_target(uri: &Uri) -> String {
    let original = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let mut encoded = String::with_capacity(original.len());
    for c in original.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '&' => encoded.push_str("%26"),
            '+' => encoded.push_str("%2B"),
            '=' => encoded.push_str("%3D"),
            '?' => encoded.push_str("%3F"),
            '#' => encoded.push_str("%23"),
            ' ' => encoded.push_str("%20"),
            _ => encoded.push(c),
        }
    }

    format!("/login?next={}", encoded)
}
