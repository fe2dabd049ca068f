use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::models::User;

use super::CurrentUser;

/// extensions に User が無い場合は 401 (gate が掛かっていないルートで使われた)。
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
