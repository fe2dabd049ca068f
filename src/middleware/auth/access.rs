//! ルート単位の認可 gate: Bearer token → User → 要求フラグ判定 → User を extensions に入れる
//!
//! - 要求フラグは Router 組み立て時に `require(.., UserFlags::READ)` のように宣言する
//! - `UserFlags::NONE` は「認証のみ」
//! - 拒否理由 (ヘッダ無し / 形式不正 / 未知 token / 権限不足) は全て body 無しの 401
//! - lookup backend の障害だけは 500 (401 にはしない)
//!
//! handler には到達しない限り何も実行されない。lookup を待っている間に request が
//! cancel / timeout された場合、future ごと drop されるので next は呼ばれない。

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::models::UserFlags;
use crate::services::auth::gate::{self, Decision};
use crate::services::identity::IdentityLookup;
use crate::state::AppState;

/// Per-route gate configuration, fixed at router construction time.
#[derive(Clone)]
struct RouteGate {
    identities: Arc<dyn IdentityLookup>,
    required: UserFlags,
}

/// Protect every route of `router` with the given required flags.
///
/// 例：
/// ```ignore
/// let favorites = Router::new().route("/me/favorites", get(list_favorites));
/// let favorites = middleware::auth::access::require(favorites, &state, UserFlags::READ);
/// ```
///
/// `route_layer` を使うので、マッチしないパスは 401 ではなく 404 のまま。
pub fn require(router: Router<AppState>, state: &AppState, required: UserFlags) -> Router<AppState> {
    let gate = RouteGate {
        identities: state.identities.clone(),
        required,
    };
    router.route_layer(middleware::from_fn_with_state(gate, gate_middleware))
}

async fn gate_middleware(
    State(gate): State<RouteGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let decision = gate::authorize(gate.identities.as_ref(), gate.required, req.headers())
        .await
        .map_err(|err| {
            tracing::warn!(
                error = ?err,
                backend = gate.identities.backend_name(),
                "identity lookup failed"
            );
            AppError::from(err)
        })?;

    let user = match decision {
        Decision::Allow(user) => user,
        Decision::Reject(rejection) => {
            tracing::debug!(
                reason = rejection.reason(),
                required = %gate.required,
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by gate"
            );
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(user_id = %user.id, required = %gate.required, "request authorized");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
