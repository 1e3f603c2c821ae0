pub mod auth;
pub mod mirror;
pub mod sweep;
