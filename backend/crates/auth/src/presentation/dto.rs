//! Form DTOs
//!
//! `application/x-www-form-urlencoded` bodies and their field validation.

use kernel::validation::{self, FieldErrors};
use platform::password::ClearTextPassword;
use serde::Deserialize;

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.check(
            "email",
            validation::required(&self.email).and_then(|_| validation::email(&self.email)),
        );

        if errors.check("password", validation::required(&self.password)) {
            if let Err(policy) = ClearTextPassword::new(self.password.clone()) {
                errors.add("password", policy.to_string());
            }
        }

        errors.check(
            "confirm_password",
            validation::required(&self.confirm_password).and_then(|_| {
                validation::equal_to(
                    &self.confirm_password,
                    &self.password,
                    "Passwords must match.",
                )
            }),
        );

        errors
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox: present ("y") when ticked, absent otherwise
    #[serde(default)]
    pub remember_me: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

impl LoginForm {
    pub fn remember_me(&self) -> bool {
        self.remember_me.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.check("email", validation::required(&self.email));
        errors.check("password", validation::required(&self.password));
        errors
    }
}

/// `?next=` on the login page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Keep a post-login redirect on this site
///
/// Accepts absolute paths only; protocol-relative (`//host`) and backslash
/// tricks fall back to the dashboard.
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/dashboard".to_string(),
    }
}
