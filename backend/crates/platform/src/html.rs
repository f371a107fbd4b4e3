//! HTML Page Shell
//!
//! Shared maud layout, form widgets and response types for server-rendered
//! pages. All dynamic content is HTML-escaped by maud.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use kernel::validation::FieldErrors;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::csrf::{CSRF_FIELD, CsrfToken};
use crate::flash::{self, Flash};

pub const SITE_NAME: &str = "Inkwell";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 0 auto; padding: 0 1rem; color: #222; }
nav { display: flex; gap: 1rem; align-items: baseline; padding: 1rem 0; border-bottom: 1px solid #ddd; }
nav .brand { font-weight: bold; margin-right: auto; }
.flash { padding: .75rem 1rem; margin: 1rem 0; border-radius: 4px; background: #eef; }
.flash.success { background: #e6f4ea; }
.flash.warning { background: #fff4e5; }
.flash.danger, .form-errors { background: #fdecea; }
.field { margin: 1rem 0; display: flex; flex-direction: column; gap: .25rem; }
.field .error, .form-errors li { color: #b00020; }
textarea { min-height: 12rem; }
.post-meta { color: #666; font-size: .9rem; }
"#;

/// Per-request page context: who is signed in, and the pending flash
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    pub signed_in_as: Option<String>,
    pub flash: Option<Flash>,
}

impl PageChrome {
    pub fn new(signed_in_as: Option<String>, flash: Option<Flash>) -> Self {
        Self {
            signed_in_as,
            flash,
        }
    }
}

/// Full page with navigation and flash area
pub fn layout(title: &str, chrome: &PageChrome, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (SITE_NAME) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    a class="brand" href="/" { (SITE_NAME) }
                    @if let Some(email) = &chrome.signed_in_as {
                        a href="/dashboard" { "Dashboard" }
                        a href="/blog/new" { "New post" }
                        span class="who" { (email) }
                        a href="/logout" { "Log out" }
                    } @else {
                        a href="/login" { "Log in" }
                        a href="/register" { "Register" }
                    }
                }
                main {
                    @if let Some(flash) = &chrome.flash {
                        div class={ "flash " (flash.level.as_str()) } role="status" { (flash.message) }
                    }
                    (content)
                }
            }
        }
    }
}

/// Hidden CSRF field for a POST form
pub fn csrf_input(token: &CsrfToken) -> Markup {
    html! {
        input type="hidden" name=(CSRF_FIELD) value=(token.value());
    }
}

/// Errors that belong to the whole form
pub fn form_errors(errors: &FieldErrors) -> Markup {
    html! {
        @if !errors.form_errors().is_empty() {
            ul class="form-errors" {
                @for message in errors.form_errors() {
                    li { (message) }
                }
            }
        }
    }
}

fn field_error_list(errors: &FieldErrors, name: &str) -> Markup {
    html! {
        @for message in errors.get(name) {
            span class="error" { (message) }
        }
    }
}

/// Labelled `<input>` with its validation messages
pub fn input_field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    errors: &FieldErrors,
) -> Markup {
    html! {
        div class="field" {
            label for=(name) { (label) }
            input id=(name) name=(name) type=(input_type) value=(value);
            (field_error_list(errors, name))
        }
    }
}

/// Labelled `<textarea>` with its validation messages
pub fn textarea_field(label: &str, name: &str, value: &str, errors: &FieldErrors) -> Markup {
    html! {
        div class="field" {
            label for=(name) { (label) }
            textarea id=(name) name=(name) { (value) }
            (field_error_list(errors, name))
        }
    }
}

pub fn checkbox_field(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="field checkbox" {
            label {
                input type="checkbox" name=(name) value="y" checked[checked];
                " " (label)
            }
        }
    }
}

// ============================================================================
// Page
// ============================================================================

/// Everything a rendered page needs besides its content
///
/// Takes the pending flash (clearing its cookie) and issues the CSRF token
/// used by any form on the page.
pub struct Page {
    chrome: PageChrome,
    csrf: CsrfToken,
    cookies: Vec<HeaderValue>,
}

impl Page {
    pub fn new(headers: &HeaderMap, signed_in_as: Option<String>, secure_cookies: bool) -> Self {
        let csrf = CsrfToken::issue(headers, secure_cookies);
        let mut cookies: Vec<HeaderValue> = csrf.set_cookie().into_iter().collect();

        let pending = flash::peek(headers);
        if pending.is_some() {
            cookies.extend(flash::clear_cookie(secure_cookies));
        }

        Self {
            chrome: PageChrome::new(signed_in_as, pending),
            csrf,
            cookies,
        }
    }

    pub fn csrf(&self) -> &CsrfToken {
        &self.csrf
    }

    pub fn chrome(&self) -> &PageChrome {
        &self.chrome
    }

    /// Wrap `content` in the layout
    pub fn render(self, title: &str, content: Markup) -> HtmlResponse {
        let markup = layout(title, &self.chrome, content);
        self.cookies
            .into_iter()
            .fold(HtmlResponse::new(markup), |response, cookie| {
                response.with_cookie(Some(cookie))
            })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Rendered page plus the cookies to set alongside it
pub struct HtmlResponse {
    status: StatusCode,
    markup: Markup,
    cookies: Vec<HeaderValue>,
}

impl HtmlResponse {
    pub fn new(markup: Markup) -> Self {
        Self {
            status: StatusCode::OK,
            markup,
            cookies: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Append a Set-Cookie header; `None` is skipped
    pub fn with_cookie(mut self, cookie: Option<HeaderValue>) -> Self {
        self.cookies.extend(cookie);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HtmlResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Html(self.markup.into_string())).into_response();
        append_cookies(&mut response, self.cookies);
        response
    }
}

/// `303 See Other` redirect plus the cookies to set alongside it
pub struct SeeOther {
    location: String,
    cookies: Vec<HeaderValue>,
}

impl SeeOther {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            cookies: Vec::new(),
        }
    }

    /// Append a Set-Cookie header; `None` is skipped
    pub fn with_cookie(mut self, cookie: Option<HeaderValue>) -> Self {
        self.cookies.extend(cookie);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for SeeOther {
    fn into_response(self) -> Response {
        let location =
            HeaderValue::from_str(&self.location).unwrap_or_else(|_| HeaderValue::from_static("/"));
        let mut response = (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response();
        append_cookies(&mut response, self.cookies);
        response
    }
}

fn append_cookies(response: &mut Response, cookies: Vec<HeaderValue>) {
    let headers = response.headers_mut();
    for cookie in cookies {
        headers.append(header::SET_COOKIE, cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_signed_out_nav() {
        let page = layout("Home", &PageChrome::default(), html! { p { "hi" } }).into_string();
        assert!(page.contains("<title>Home | Inkwell</title>"));
        assert!(page.contains("href=\"/login\""));
        assert!(page.contains("href=\"/register\""));
        assert!(!page.contains("href=\"/logout\""));
    }

    #[test]
    fn test_layout_signed_in_nav_and_flash() {
        let chrome = PageChrome::new(
            Some("a@example.com".to_string()),
            Some(Flash::success("<b>done</b>")),
        );
        let page = layout("Dashboard", &chrome, html! {}).into_string();
        assert!(page.contains("a@example.com"));
        assert!(page.contains("href=\"/logout\""));
        assert!(page.contains("class=\"flash success\""));
        assert!(page.contains("&lt;b&gt;done&lt;/b&gt;"));
    }

    #[test]
    fn test_field_errors_rendered() {
        let mut errors = FieldErrors::new();
        errors.add("title", "This field is required.");
        errors.add_form_error("The CSRF token is missing or invalid.");

        let field = input_field("Title", "title", "text", "", &errors).into_string();
        assert!(field.contains("This field is required."));

        let form = form_errors(&errors).into_string();
        assert!(form.contains("The CSRF token is missing or invalid."));
        assert!(form_errors(&FieldErrors::new()).into_string().is_empty());
    }

    #[test]
    fn test_csrf_input_carries_token() {
        let token = CsrfToken::issue(&HeaderMap::new(), false);
        let input = csrf_input(&token).into_string();
        assert!(input.contains("name=\"csrf_token\""));
        assert!(input.contains(token.value()));
    }

    #[test]
    fn test_html_response_sets_cookies() {
        let response = HtmlResponse::new(html! { p { "x" } })
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .with_cookie(Some(HeaderValue::from_static("a=1")))
            .with_cookie(None)
            .with_cookie(Some(HeaderValue::from_static("b=2")))
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.headers().get_all(header::SET_COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_page_issues_csrf_and_clears_flash() {
        let flash_cookie = Flash::info("hello").set_cookie(false).unwrap();
        let pair = flash_cookie.to_str().unwrap().split(';').next().unwrap().to_string();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());

        let page = Page::new(&headers, None, false);
        assert_eq!(page.chrome().flash.as_ref().unwrap().message, "hello");
        let token = page.csrf().value().to_string();

        let response = page.render("Home", html! {}).into_response();
        let cookies: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();

        assert!(cookies.iter().any(|c| c.starts_with(&format!("csrf_token={token}"))));
        assert!(cookies.iter().any(|c| c.starts_with("flash=;")));
    }

    #[test]
    fn test_see_other() {
        let response = SeeOther::to("/dashboard")
            .with_cookie(Some(HeaderValue::from_static("flash=abc")))
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");
        assert_eq!(response.headers()[header::SET_COOKIE], "flash=abc");
    }
}
