/*
 * Responsibility
 * - GET /me            (認証のみ)
 * - GET /me/favorites  (READ 必須)
 * - User は gate が解決済み。ここでは DB を引かない
 */
use axum::Json;

use crate::api::v1::{
    dto::users::{FavoritesResponse, MeResponse},
    extractors::CurrentUser,
};

pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse::from(&user))
}

pub async fn my_favorites(CurrentUser(user): CurrentUser) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        favorites: user.favorites,
    })
}
