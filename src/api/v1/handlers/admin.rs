/*
 * Responsibility
 * - GET /admin/users/{user_id}/flags (ADMINISTRATOR 必須)
 * - 任意ユーザーの flags を repo から読む
 * - user_id が UUID でなければ JSON envelope の 400
 */
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use uuid::Uuid;

use crate::{
    api::v1::{dto::users::UserFlagsResponse, extractors::CurrentUser},
    error::AppError,
    repos::user_repo,
    state::AppState,
};

pub async fn get_user_flags(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    user_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserFlagsResponse>, AppError> {
    let Path(user_id) =
        user_id.map_err(|_| AppError::bad_request("INVALID_USER_ID", "invalid user id"))?;

    let Some(db) = state.db.as_ref() else {
        tracing::error!("admin flag lookup requires a database");
        return Err(AppError::Internal);
    };

    let flags = user_repo::get_flags(db, user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    tracing::info!(admin_id = %admin.id, %user_id, "admin read user flags");

    Ok(Json(UserFlagsResponse::new(user_id, flags)))
}
