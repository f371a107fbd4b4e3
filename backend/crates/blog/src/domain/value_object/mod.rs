//! Value Object Module

pub mod post_body;
pub mod post_title;
