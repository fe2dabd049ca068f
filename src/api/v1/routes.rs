/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - ルートごとの要求フラグはここで宣言する (access::require)
 *   - /health                         public
 *   - /me                             認証のみ
 *   - /me/favorites                   READ
 *   - /admin/users/{user_id}/flags    ADMINISTRATOR
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    admin::get_user_flags,
    health::health,
    me::{me, my_favorites},
};
use crate::middleware::auth::access;
use crate::models::UserFlags;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let authenticated = access::require(
        Router::new().route("/me", get(me)),
        state,
        UserFlags::NONE,
    );

    let readers = access::require(
        Router::new().route("/me/favorites", get(my_favorites)),
        state,
        UserFlags::READ,
    );

    let admins = access::require(
        Router::new().route("/admin/users/{user_id}/flags", get(get_user_flags)),
        state,
        UserFlags::ADMINISTRATOR,
    );

    public.merge(authenticated).merge(readers).merge(admins)
}
