//! Identity lookup interface used by the authorization gate.
use async_trait::async_trait;
use thiserror::Error;

use crate::models::User;
use crate::repos::error::RepoError;

/// Result type for identity lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// Backend failure while resolving a token.
///
/// Kept apart from "not found" (`Ok(None)`) so the gate can answer a storage
/// outage with 5xx instead of a misleading 401.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("identity backend error: {0}")]
    Backend(#[from] RepoError),
    #[error("identity backend unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a bearer credential to the user that owns it.
///
/// Implementations must:
/// - match the token exactly (no trimming, no case folding)
/// - return the user with `favorites` loaded
/// - not cache across calls; a changed grant must be visible on the next lookup
#[async_trait]
pub trait IdentityLookup: Send + Sync + 'static {
    /// Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn find_by_token(&self, token: &str) -> LookupResult<Option<User>>;
}
