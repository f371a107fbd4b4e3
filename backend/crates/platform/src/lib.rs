//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, random tokens)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Cookie management, CSRF double-submit tokens, flash messages
//! - Client fingerprinting
//! - HTML page shell and response helpers

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod csrf;
pub mod flash;
pub mod html;
pub mod password;
