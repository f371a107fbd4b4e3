//! Blog Pages

use kernel::validation::FieldErrors;
use maud::{Markup, html};
use platform::csrf::CsrfToken;
use platform::html::{csrf_input, form_errors, input_field, textarea_field};

use crate::domain::entity::post::Post;
use crate::presentation::dto::PostForm;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

pub fn home_page(signed_in: bool) -> Markup {
    html! {
        h1 { "Welcome to Inkwell" }
        p { "Write short posts and read what everyone else is writing." }
        @if signed_in {
            p { a class="button" href="/dashboard" { "Go to your dashboard" } }
        } @else {
            p {
                a class="button" href="/login" { "Log in" }
                " or "
                a class="button" href="/register" { "Register" }
            }
        }
    }
}

pub fn dashboard_page(posts: &[Post]) -> Markup {
    html! {
        h1 { "Dashboard" }
        p { a href="/blog/new" { "Write a new post" } }
        @if posts.is_empty() {
            p class="empty" { "No posts yet." }
        } @else {
            ul class="posts" {
                @for post in posts {
                    li {
                        a href={ "/blog/" (post.post_id) } { (post.title) }
                        " "
                        span class="post-meta" {
                            "by " (post.author_email) " on " (post.created_at.format(DATE_FORMAT))
                        }
                    }
                }
            }
        }
    }
}

pub fn new_post_page(csrf: &CsrfToken, form: &PostForm, errors: &FieldErrors) -> Markup {
    html! {
        h1 { "New post" }
        form method="post" action="/blog/new" novalidate {
            (csrf_input(csrf))
            (form_errors(errors))
            (input_field("Title", "title", "text", &form.title, errors))
            (textarea_field("Content", "content", &form.content, errors))
            button type="submit" { "Publish" }
        }
    }
}

pub fn post_page(post: &Post) -> Markup {
    html! {
        article {
            h1 { (post.title) }
            p class="post-meta" {
                "by " (post.author_email) " on " (post.created_at.format(DATE_FORMAT))
            }
            @for paragraph in post.body.paragraphs() {
                p { (paragraph) }
            }
        }
        p { a href="/dashboard" { "Back to dashboard" } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{post_body::PostBody, post_title::PostTitle};
    use chrono::{TimeZone, Utc};
    use kernel::id::{AccountId, PostId};

    fn post() -> Post {
        Post {
            post_id: PostId::new(7),
            title: PostTitle::new("<Hello>").unwrap(),
            body: PostBody::new("World\n\nAgain").unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
            author_id: AccountId::new(1),
            author_email: "a@example.com".to_string(),
        }
    }

    #[test]
    fn test_home_page_links() {
        assert!(home_page(true).into_string().contains("href=\"/dashboard\""));
        let anonymous = home_page(false).into_string();
        assert!(anonymous.contains("href=\"/login\""));
        assert!(anonymous.contains("href=\"/register\""));
    }

    #[test]
    fn test_dashboard_lists_posts() {
        let page = dashboard_page(&[post()]).into_string();
        assert!(page.contains("href=\"/blog/7\""));
        assert!(page.contains("&lt;Hello&gt;"));
        assert!(page.contains("2025-03-01 09:30 UTC"));
        assert!(dashboard_page(&[]).into_string().contains("No posts yet."));
    }

    #[test]
    fn test_post_page_paragraphs() {
        let page = post_page(&post()).into_string();
        assert!(page.contains("<p>World</p>"));
        assert!(page.contains("<p>Again</p>"));
        assert!(page.contains("a@example.com"));
    }
}
