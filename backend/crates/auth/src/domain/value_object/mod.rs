//! Value Object Module

pub mod account_password;
pub mod email;
pub mod role_name;
pub mod session_key;
pub mod session_token;
