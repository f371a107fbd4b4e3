//! HTTP Handlers

use axum::Form;
use axum::extract::{Extension, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use kernel::validation::FieldErrors;
use platform::client::ClientFingerprint;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};
use platform::csrf::{self, CSRF_ERROR};
use platform::flash::Flash;
use platform::html::{HtmlResponse, Page, SeeOther};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    SignInInput, SignInOutput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginForm, LoginQuery, RegistrationForm, safe_next};
use crate::presentation::middleware::AuthStatus;
use crate::presentation::views;

const REGISTERED: &str = "Congratulations, you are now a registered user!";
const LOGGED_OUT: &str = "You have been logged out.";
const BAD_CREDENTIALS: &str = "Invalid email or password.";

/// Repository bound shared by every auth handler and middleware
pub trait AuthStore: AccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static {}

impl<T> AuthStore for T where T: AccountRepository + AuthSessionRepository + Clone + Send + Sync + 'static {}

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: AuthStore,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    fn page(&self, headers: &HeaderMap, status: &AuthStatus) -> Page {
        Page::new(headers, status.email(), self.config.cookie_secure)
    }

    fn session_cookie(&self, output: &SignInOutput) -> Option<HeaderValue> {
        set_cookie_header(
            &self.config.session_cookie(output.remember_me),
            &output.session_token,
        )
    }

    fn sign_in_use_case(&self) -> SignInUseCase<R, R> {
        SignInUseCase::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Register
// ============================================================================

/// GET /register
pub async fn register_form<R>(
    State(state): State<AuthAppState<R>>,
    Extension(status): Extension<AuthStatus>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
{
    if status.is_authenticated() {
        return SeeOther::to("/dashboard").into_response();
    }

    render_register(&state, &status, &headers, "", &FieldErrors::new()).into_response()
}

/// POST /register
///
/// On success the new account is signed in straight away.
pub async fn register_submit<R>(
    State(state): State<AuthAppState<R>>,
    Extension(status): Extension<AuthStatus>,
    Extension(fingerprint): Extension<ClientFingerprint>,
    headers: HeaderMap,
    Form(form): Form<RegistrationForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let mut errors = form.validate();
    if !csrf::verify(&headers, &form.csrf_token) {
        errors.add_form_error(CSRF_ERROR);
    }

    if errors.is_empty() {
        let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
        let input = SignUpInput {
            email: form.email.clone(),
            password: form.password.clone(),
        };

        match use_case.execute(input).await {
            Ok(account) => {
                let output = state
                    .sign_in_use_case()
                    .start_session(&account, false, fingerprint)
                    .await?;

                return Ok(SeeOther::to("/dashboard")
                    .with_cookie(state.session_cookie(&output))
                    .with_cookie(Flash::success(REGISTERED).set_cookie(state.config.cookie_secure))
                    .into_response());
            }
            Err(AuthError::EmailTaken) => errors.add(
                "email",
                format!("{} is already associated with an account.", form.email.trim()),
            ),
            Err(AuthError::InvalidEmail) => errors.add("email", "Invalid email address."),
            Err(AuthError::PasswordPolicy(policy)) => errors.add("password", policy.to_string()),
            Err(e) => return Err(e),
        }
    }

    Ok(render_register(&state, &status, &headers, &form.email, &errors)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response())
}

fn render_register<R>(
    state: &AuthAppState<R>,
    status: &AuthStatus,
    headers: &HeaderMap,
    email: &str,
    errors: &FieldErrors,
) -> HtmlResponse
where
    R: AuthStore,
{
    let page = state.page(headers, status);
    let content = views::register_page(page.csrf(), email, errors);
    page.render("Register", content)
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login_form<R>(
    State(state): State<AuthAppState<R>>,
    Extension(status): Extension<AuthStatus>,
    Query(query): Query<LoginQuery>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
{
    if status.is_authenticated() {
        return SeeOther::to(safe_next(query.next.as_deref())).into_response();
    }

    let form = LoginForm {
        next: query.next,
        ..LoginForm::default()
    };
    render_login(&state, &status, &headers, &form, &FieldErrors::new()).into_response()
}

/// POST /login
pub async fn login_submit<R>(
    State(state): State<AuthAppState<R>>,
    Extension(status): Extension<AuthStatus>,
    Extension(fingerprint): Extension<ClientFingerprint>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let mut errors = form.validate();
    if !csrf::verify(&headers, &form.csrf_token) {
        errors.add_form_error(CSRF_ERROR);
    }

    if errors.is_empty() {
        let input = SignInInput {
            email: form.email.clone(),
            password: form.password.clone(),
            remember_me: form.remember_me(),
        };

        match state.sign_in_use_case().execute(input, fingerprint).await {
            Ok(output) => {
                return Ok(SeeOther::to(safe_next(form.next.as_deref()))
                    .with_cookie(state.session_cookie(&output))
                    .into_response());
            }
            Err(AuthError::InvalidCredentials) => {
                AuthError::InvalidCredentials.log();
                errors.add_form_error(BAD_CREDENTIALS);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(render_login(&state, &status, &headers, &form, &errors)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response())
}

fn render_login<R>(
    state: &AuthAppState<R>,
    status: &AuthStatus,
    headers: &HeaderMap,
    form: &LoginForm,
    errors: &FieldErrors,
) -> HtmlResponse
where
    R: AuthStore,
{
    let page = state.page(headers, status);
    let content = views::login_page(
        page.csrf(),
        &form.email,
        form.remember_me(),
        form.next.as_deref(),
        errors,
    );
    page.render("Log in", content)
}

// ============================================================================
// Logout
// ============================================================================

/// GET|POST /logout
///
/// Always succeeds: the cookie is cleared even if the session is already gone.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: AuthStore,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        if let Err(e) = use_case.execute(&token).await {
            e.log();
        }
    }

    SeeOther::to("/")
        .with_cookie(delete_cookie_header(&state.config.session_cookie(false)))
        .with_cookie(Flash::info(LOGGED_OUT).set_cookie(state.config.cookie_secure))
        .into_response()
}
