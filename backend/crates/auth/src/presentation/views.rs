//! Auth Pages

use kernel::validation::FieldErrors;
use maud::{Markup, html};
use platform::csrf::CsrfToken;
use platform::html::{checkbox_field, csrf_input, form_errors, input_field};

pub fn register_page(csrf: &CsrfToken, email: &str, errors: &FieldErrors) -> Markup {
    html! {
        h1 { "Register" }
        form method="post" action="/register" novalidate {
            (csrf_input(csrf))
            (form_errors(errors))
            (input_field("Email Address", "email", "email", email, errors))
            (input_field("Password", "password", "password", "", errors))
            (input_field("Retype Password", "confirm_password", "password", "", errors))
            button type="submit" { "Register" }
        }
        p { "Already registered? " a href="/login" { "Log in" } }
    }
}

pub fn login_page(
    csrf: &CsrfToken,
    email: &str,
    remember_me: bool,
    next: Option<&str>,
    errors: &FieldErrors,
) -> Markup {
    html! {
        h1 { "Log in" }
        form method="post" action="/login" novalidate {
            (csrf_input(csrf))
            @if let Some(next) = next {
                input type="hidden" name="next" value=(next);
            }
            (form_errors(errors))
            (input_field("Email Address", "email", "email", email, errors))
            (input_field("Password", "password", "password", "", errors))
            (checkbox_field("Remember Me", "remember_me", remember_me))
            button type="submit" { "Log in" }
        }
        p { "New here? " a href="/register" { "Register" } }
    }
}
