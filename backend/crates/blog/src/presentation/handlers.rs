//! HTTP Handlers

use auth::{AuthStatus, CurrentAccount};
use axum::Form;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use kernel::validation::FieldErrors;
use platform::csrf::{self, CSRF_ERROR};
use platform::flash::Flash;
use platform::html::{HtmlResponse, Page, SeeOther};
use std::sync::Arc;

use crate::application::{CreatePostInput, CreatePostUseCase, GetPostUseCase, ListPostsUseCase};
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::PostForm;
use crate::presentation::views;

const POST_CREATED: &str = "Your blog post has been created!";

/// Repository bound shared by every blog handler
pub trait PostStore: PostRepository + Clone + Send + Sync + 'static {}

impl<T> PostStore for T where T: PostRepository + Clone + Send + Sync + 'static {}

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<P>
where
    P: PostStore,
{
    pub repo: Arc<P>,
    pub cookie_secure: bool,
}

impl<P> BlogAppState<P>
where
    P: PostStore,
{
    pub fn new(repo: P, cookie_secure: bool) -> Self {
        Self {
            repo: Arc::new(repo),
            cookie_secure,
        }
    }

    fn page(&self, headers: &HeaderMap, status: &AuthStatus) -> Page {
        Page::new(headers, status.email(), self.cookie_secure)
    }
}

/// GET /
pub async fn home<P>(
    State(state): State<BlogAppState<P>>,
    Extension(status): Extension<AuthStatus>,
    headers: HeaderMap,
) -> HtmlResponse
where
    P: PostStore,
{
    state
        .page(&headers, &status)
        .render("Home", views::home_page(status.is_authenticated()))
}

/// GET /dashboard
pub async fn dashboard<P>(
    State(state): State<BlogAppState<P>>,
    Extension(status): Extension<AuthStatus>,
    headers: HeaderMap,
) -> BlogResult<HtmlResponse>
where
    P: PostStore,
{
    let posts = ListPostsUseCase::new(state.repo.clone()).execute().await?;

    Ok(state
        .page(&headers, &status)
        .render("Dashboard", views::dashboard_page(&posts)))
}

// ============================================================================
// New Post
// ============================================================================

/// GET /blog/new
pub async fn new_post_form<P>(
    State(state): State<BlogAppState<P>>,
    Extension(status): Extension<AuthStatus>,
    headers: HeaderMap,
) -> HtmlResponse
where
    P: PostStore,
{
    render_new_post(&state, &status, &headers, &PostForm::default(), &FieldErrors::new())
}

/// POST /blog/new
pub async fn new_post_submit<P>(
    State(state): State<BlogAppState<P>>,
    Extension(status): Extension<AuthStatus>,
    Extension(account): Extension<CurrentAccount>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> BlogResult<Response>
where
    P: PostStore,
{
    let mut errors = form.validate();
    if !csrf::verify(&headers, &form.csrf_token) {
        errors.add_form_error(CSRF_ERROR);
    }

    if errors.is_empty() {
        let input = CreatePostInput {
            title: form.title.clone(),
            body: form.content.clone(),
            author_id: account.account_id,
        };

        match CreatePostUseCase::new(state.repo.clone()).execute(input).await {
            Ok(_) => {
                return Ok(SeeOther::to("/dashboard")
                    .with_cookie(Flash::success(POST_CREATED).set_cookie(state.cookie_secure))
                    .into_response());
            }
            Err(BlogError::InvalidTitle(message)) => errors.add("title", message),
            Err(BlogError::EmptyBody) => errors.add("content", "This field is required."),
            Err(BlogError::InvalidBody(message)) => errors.add("content", message),
            Err(e) => return Err(e),
        }
    }

    Ok(render_new_post(&state, &status, &headers, &form, &errors)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response())
}

fn render_new_post<P>(
    state: &BlogAppState<P>,
    status: &AuthStatus,
    headers: &HeaderMap,
    form: &PostForm,
    errors: &FieldErrors,
) -> HtmlResponse
where
    P: PostStore,
{
    let page = state.page(headers, status);
    let content = views::new_post_page(page.csrf(), form, errors);
    page.render("New post", content)
}

// ============================================================================
// Post Detail
// ============================================================================

/// GET /blog/{id}
pub async fn post_detail<P>(
    State(state): State<BlogAppState<P>>,
    Extension(status): Extension<AuthStatus>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> BlogResult<HtmlResponse>
where
    P: PostStore,
{
    let post = GetPostUseCase::new(state.repo.clone())
        .execute_raw(&raw_id)
        .await?;

    let title = post.title.to_string();
    Ok(state
        .page(&headers, &status)
        .render(&title, views::post_page(&post)))
}
