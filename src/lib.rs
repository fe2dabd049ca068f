//! Bearer-token authorization gate for an axum service.
//!
//! Each protected route declares the [`models::UserFlags`] it needs with
//! [`middleware::auth::access::require`]. The gate resolves the token through
//! an [`services::identity::IdentityLookup`], checks the flags (administrators
//! pass every check) and hands the resolved [`models::User`] to the handler
//! via [`api::v1::extractors::CurrentUser`]. Every rejection is a bare 401.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repos;
pub mod services;
pub mod state;
