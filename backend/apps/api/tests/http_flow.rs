//! End-to-end HTTP flows through the assembled application

use api::{build_app, prepare_database};
use auth::AuthConfig;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::collections::BTreeMap;
use std::str::FromStr;
use tower::ServiceExt;

const USER_AGENT: &str = "http-flow-test/1.0";
const CSRF: &str = "aW5rd2VsbC10ZXN0LWNzcmYtdG9rZW4tMzItYnl0ZXM";
const PASSWORD: &str = "Correct-Horse-42";

async fn pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    prepare_database(&pool).await.unwrap();
    pool
}

/// Browser stand-in: keeps cookies between requests
struct Client {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl Client {
    async fn new() -> (Self, SqlitePool) {
        let pool = pool().await;
        let app = build_app(pool.clone(), AuthConfig::development());
        let mut cookies = BTreeMap::new();
        cookies.insert("csrf_token".to_string(), CSRF.to_string());
        (Self { app, cookies }, pool)
    }

    fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    async fn send(&mut self, request: Request<Body>) -> Response {
        let response = self.app.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let value = value.to_str().unwrap();
            let pair = value.split(';').next().unwrap();
            let (name, cookie) = pair.split_once('=').unwrap();
            if cookie.is_empty() || value.contains("Max-Age=0") {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), cookie.to_string());
            }
        }

        response
    }

    async fn get(&mut self, uri: &str) -> Response {
        let request = Request::get(uri)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, self.cookie_header())
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Response {
        let body = form
            .iter()
            .map(|(k, v)| format!("{k}={}", encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::post(uri)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, self.cookie_header())
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn register(&mut self, email: &str) -> Response {
        self.post(
            "/register",
            &[
                ("email", email),
                ("password", PASSWORD),
                ("confirm_password", PASSWORD),
                ("csrf_token", CSRF),
            ],
        )
        .await
    }
}

/// Enough form encoding for the values used here
fn encode(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('@', "%40")
        .replace('&', "%26")
        .replace('/', "%2F")
        .replace('=', "%3D")
        .replace(' ', "+")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_post_and_read_back() {
    let (mut client, pool) = Client::new().await;

    let response = client.register("writer@example.com").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(count(&pool, "accounts").await, 1);

    let session_key: String = sqlx::query_scalar("SELECT session_key FROM accounts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(session_key.len(), 36);

    let response = client.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Congratulations, you are now a registered user!"));
    assert!(page.contains("writer@example.com"));

    let response = client
        .post(
            "/blog/new",
            &[("title", "Hello"), ("content", "World"), ("csrf_token", CSRF)],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(count(&pool, "posts").await, 1);

    let (post_id, author_id): (i64, i64) =
        sqlx::query_as("SELECT id, author_id FROM posts WHERE title = 'Hello'")
            .fetch_one(&pool)
            .await
            .unwrap();
    let account_id: i64 = sqlx::query_scalar("SELECT id FROM accounts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(author_id, account_id);

    let page = body_text(client.get("/dashboard").await).await;
    assert!(page.contains("Your blog post has been created!"));

    let response = client.get(&format!("/blog/{post_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Hello"));
    assert!(page.contains("World"));
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let (mut client, pool) = Client::new().await;
    client.register("taken@example.com").await;
    client.get("/logout").await;

    let response = client.register("Taken@Example.com").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body_text(response)
            .await
            .contains("is already associated with an account.")
    );
    assert_eq!(count(&pool, "accounts").await, 1);
}

#[tokio::test]
async fn test_mismatched_passwords_create_nothing() {
    let (mut client, pool) = Client::new().await;

    let response = client
        .post(
            "/register",
            &[
                ("email", "new@example.com"),
                ("password", PASSWORD),
                ("confirm_password", "Different-Horse-42"),
                ("csrf_token", CSRF),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Passwords must match."));
    assert_eq!(count(&pool, "accounts").await, 0);
}

#[tokio::test]
async fn test_missing_csrf_creates_nothing() {
    let (mut client, pool) = Client::new().await;

    let response = client
        .post(
            "/register",
            &[
                ("email", "new@example.com"),
                ("password", PASSWORD),
                ("confirm_password", PASSWORD),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(count(&pool, "accounts").await, 0);
}

#[tokio::test]
async fn test_anonymous_access_redirects() {
    let (mut client, pool) = Client::new().await;

    let response = client.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=/dashboard");

    let response = client
        .post(
            "/blog/new",
            &[("title", "Hello"), ("content", "World"), ("csrf_token", CSRF)],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login"));
    assert_eq!(count(&pool, "posts").await, 0);
}

#[tokio::test]
async fn test_login_logout_cycle() {
    let (mut client, _pool) = Client::new().await;
    client.register("cycle@example.com").await;

    let response = client.get("/logout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(!client.cookies.contains_key("session"));

    let response = client.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .post(
            "/login",
            &[
                ("email", "cycle@example.com"),
                ("password", "Wrong-Horse-42"),
                ("csrf_token", CSRF),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let failure_wrong_password = body_text(response).await;

    let response = client
        .post(
            "/login",
            &[
                ("email", "nobody@example.com"),
                ("password", PASSWORD),
                ("csrf_token", CSRF),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let failure_unknown = body_text(response).await;
    assert!(failure_wrong_password.contains("Invalid email or password."));
    assert!(failure_unknown.contains("Invalid email or password."));

    let response = client
        .post(
            "/login",
            &[
                ("email", "cycle@example.com"),
                ("password", PASSWORD),
                ("next", "/blog/new"),
                ("csrf_token", CSRF),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/blog/new");

    assert_eq!(client.get("/blog/new").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_bound_to_user_agent() {
    let (mut client, _pool) = Client::new().await;
    client.register("agent@example.com").await;

    let request = Request::get("/dashboard")
        .header(header::USER_AGENT, "some-other-browser")
        .header(header::COOKIE, client.cookie_header())
        .body(Body::empty())
        .unwrap();
    let response = client.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_not_found_pages() {
    let (mut client, _pool) = Client::new().await;
    client.register("reader@example.com").await;

    assert_eq!(client.get("/blog/12345").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(client.get("/blog/abc").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(client.get("/no/such/page").await.status(), StatusCode::NOT_FOUND);
}
