//! Bearer token → User → required flags check.
//!
//! HTTP 非依存の判定ロジック。middleware はこの結果を 401 / next.run() に変換するだけ。
//!
//! 判定順序:
//! 1. `Authorization` ヘッダが無い → Reject
//! 2. 1 文字の空白で split して 2 要素かつ先頭が `Bearer` (大文字小文字区別) でない → Reject
//! 3. token で user を引き、見つからない → Reject
//! 4. user.flags が required を全て含む、または ADMINISTRATOR を持つ → Allow
//!
//! 失敗理由はログ用にのみ区別し、呼び出し側 (クライアント) には区別を返さない。

use axum::http::{HeaderMap, header};

use crate::models::{User, UserFlags};
use crate::services::identity::{IdentityLookup, LookupError};

const BEARER_SCHEME: &str = "Bearer";

/// Why a request was turned away. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingHeader,
    MalformedHeader,
    UnknownToken,
    InsufficientFlags,
}

impl Rejection {
    pub fn reason(self) -> &'static str {
        match self {
            Rejection::MissingHeader => "missing_header",
            Rejection::MalformedHeader => "malformed_header",
            Rejection::UnknownToken => "unknown_token",
            Rejection::InsufficientFlags => "insufficient_flags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(User),
    Reject(Rejection),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }
}

/// Extract the credential from `Authorization: Bearer <token>`.
///
/// Only the first `Authorization` header is consulted.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, Rejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(Rejection::MissingHeader)?;

    // raw bytes, not `to_str()`: a stored token may contain non-ASCII UTF-8.
    // only bytes that are not valid UTF-8 are malformed.
    let value = std::str::from_utf8(value.as_bytes()).map_err(|_| Rejection::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(Rejection::MalformedHeader),
    }
}

/// Run the full gate for one request.
///
/// `Err` is reserved for lookup backend failures; every client-side problem
/// is a `Decision::Reject`.
pub async fn authorize(
    lookup: &dyn IdentityLookup,
    required: UserFlags,
    headers: &HeaderMap,
) -> Result<Decision, LookupError> {
    let token = match bearer_token(headers) {
        Ok(token) => token,
        Err(rejection) => return Ok(Decision::Reject(rejection)),
    };

    let Some(user) = lookup.find_by_token(token).await? else {
        return Ok(Decision::Reject(Rejection::UnknownToken));
    };

    if !user.flags.satisfies(required) {
        return Ok(Decision::Reject(Rejection::InsufficientFlags));
    }

    Ok(Decision::Allow(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::HeaderValue;

    use crate::services::identity::{InMemoryIdentityLookup, LookupResult};

    fn headers(auth: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(v) = auth {
            map.insert(header::AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        map
    }

    fn store() -> InMemoryIdentityLookup {
        InMemoryIdentityLookup::with_users([
            User::new("xyz123", UserFlags::READ | UserFlags::WRITE),
            User::new("reader", UserFlags::READ),
            User::new("admin", UserFlags::ADMINISTRATOR),
            User::new("nobody", UserFlags::NONE),
        ])
    }

    struct BrokenLookup;

    #[async_trait]
    impl IdentityLookup for BrokenLookup {
        fn backend_name(&self) -> &'static str {
            "broken"
        }

        async fn find_by_token(&self, _token: &str) -> LookupResult<Option<User>> {
            Err(LookupError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn bearer_token_accepts_exact_shape() {
        assert_eq!(bearer_token(&headers(Some("Bearer abc"))), Ok("abc"));
    }

    #[test]
    fn bearer_token_rejects_missing_header() {
        assert_eq!(bearer_token(&headers(None)), Err(Rejection::MissingHeader));
    }

    #[test]
    fn bearer_token_rejects_malformed_shapes() {
        for value in [
            "Basic abc",
            "Token abc",
            "bearer abc",
            "BEARER abc",
            "Bearer",
            "Bearer ",
            "Bearer a b",
            "Bearer  abc",
            " Bearer abc",
            "Bearer\tabc",
            "",
        ] {
            assert_eq!(
                bearer_token(&headers(Some(value))),
                Err(Rejection::MalformedHeader),
                "{value:?}"
            );
        }
    }

    #[test]
    fn bearer_token_rejects_invalid_utf8() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xffabc").unwrap(),
        );
        assert_eq!(bearer_token(&map), Err(Rejection::MalformedHeader));
    }

    #[test]
    fn bearer_token_keeps_non_ascii_credential() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes("Bearer tökén".as_bytes()).unwrap(),
        );
        assert_eq!(bearer_token(&map), Ok("tökén"));
    }

    #[tokio::test]
    async fn non_ascii_token_matches_stored_user() {
        let s = store();
        s.insert(User::new("tökén", UserFlags::READ)).await;

        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes("Bearer tökén".as_bytes()).unwrap(),
        );
        let d = authorize(&s, UserFlags::READ, &map).await.unwrap();
        assert!(d.is_allow());
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let d = authorize(&store(), UserFlags::READ, &headers(None))
            .await
            .unwrap();
        assert_eq!(d, Decision::Reject(Rejection::MissingHeader));
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let d = authorize(&store(), UserFlags::NONE, &headers(Some("Bearer nope")))
            .await
            .unwrap();
        assert_eq!(d, Decision::Reject(Rejection::UnknownToken));
    }

    #[tokio::test]
    async fn superset_is_allowed_and_returns_user() {
        let d = authorize(&store(), UserFlags::READ, &headers(Some("Bearer xyz123")))
            .await
            .unwrap();
        match d {
            Decision::Allow(user) => {
                assert_eq!(user.token, "xyz123");
                assert_eq!(user.flags, UserFlags::READ | UserFlags::WRITE);
            }
            other => panic!("expected allow, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_flag_is_rejected() {
        let d = authorize(&store(), UserFlags::WRITE, &headers(Some("Bearer reader")))
            .await
            .unwrap();
        assert_eq!(d, Decision::Reject(Rejection::InsufficientFlags));
    }

    #[tokio::test]
    async fn administrator_is_allowed_for_any_requirement() {
        for required in [UserFlags::NONE, UserFlags::WRITE, UserFlags::all()] {
            let d = authorize(&store(), required, &headers(Some("Bearer admin")))
                .await
                .unwrap();
            assert!(d.is_allow(), "{required}");
        }
    }

    #[tokio::test]
    async fn empty_requirement_only_authenticates() {
        let d = authorize(&store(), UserFlags::NONE, &headers(Some("Bearer nobody")))
            .await
            .unwrap();
        assert!(d.is_allow());
    }

    #[tokio::test]
    async fn repeated_calls_agree() {
        let s = store();
        let h = headers(Some("Bearer reader"));
        let first = authorize(&s, UserFlags::WRITE, &h).await.unwrap();
        let second = authorize(&s, UserFlags::WRITE, &h).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn grant_changes_apply_to_next_call() {
        let s = store();
        let h = headers(Some("Bearer reader"));
        assert!(!authorize(&s, UserFlags::WRITE, &h).await.unwrap().is_allow());

        s.insert(User::new("reader", UserFlags::READ | UserFlags::WRITE))
            .await;
        assert!(authorize(&s, UserFlags::WRITE, &h).await.unwrap().is_allow());
    }

    #[tokio::test]
    async fn backend_failure_is_an_error_not_a_rejection() {
        let res = authorize(&BrokenLookup, UserFlags::NONE, &headers(Some("Bearer abc"))).await;
        assert!(matches!(res, Err(LookupError::Unavailable(_))));
    }

    #[tokio::test]
    async fn malformed_header_never_reaches_backend() {
        // BrokenLookup would error if called
        let d = authorize(&BrokenLookup, UserFlags::NONE, &headers(Some("Basic abc")))
            .await
            .unwrap();
        assert_eq!(d, Decision::Reject(Rejection::MalformedHeader));
    }
}
