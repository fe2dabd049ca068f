/*
 * Responsibility
 * - users / favorites テーブル向け SQLx 操作 (読み取りのみ)
 * - token 完全一致で user を引き、favorites を同時に読み込む
 * - DB エラーは RepoError に変換して返す
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{Favorite, User, UserFlags};
use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    pub token: String,
    pub flags: i32,
}

#[derive(Debug, FromRow)]
pub struct FavoriteRow {
    #[sqlx(rename = "pfpId")]
    pub pfp_id: Uuid,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Self {
            pfp_id: row.pfp_id,
            created_at: row.created_at,
        }
    }
}

pub async fn find_by_token(db: &PgPool, token: &str) -> Result<Option<User>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", token, flags
        FROM users
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(db)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let favorites = list_favorites(db, row.id).await?;

    Ok(Some(User {
        id: row.id,
        token: row.token,
        flags: UserFlags::from_db(row.flags),
        favorites,
    }))
}

pub async fn list_favorites(db: &PgPool, user_id: Uuid) -> Result<Vec<Favorite>, RepoError> {
    let rows = sqlx::query_as::<_, FavoriteRow>(
        r#"
        SELECT "pfpId", "createdAt"
        FROM favorites
        WHERE "userId" = $1
        ORDER BY "createdAt" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Favorite::from).collect())
}

pub async fn get_flags(db: &PgPool, user_id: Uuid) -> Result<Option<UserFlags>, RepoError> {
    let flags: Option<i32> = sqlx::query_scalar(
        r#"
        SELECT flags
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(flags.map(UserFlags::from_db))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Require DATABASE_URL pointing at a Postgres server; each test gets a
    // fresh database with migrations/ applied.

    async fn insert_user(db: &PgPool, token: &str, flags: UserFlags) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO users (token, flags)
            VALUES ($1, $2)
            RETURNING "userId"
            "#,
        )
        .bind(token)
        .bind(flags.to_db())
        .fetch_one(db)
        .await
        .unwrap()
    }

    async fn insert_favorite(db: &PgPool, user_id: Uuid) -> Uuid {
        let pfp_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO favorites ("userId", "pfpId")
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(pfp_id)
        .execute(db)
        .await
        .unwrap();
        pfp_id
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn find_by_token_loads_favorites(db: PgPool) {
        let user_id = insert_user(&db, "xyz123", UserFlags::READ | UserFlags::WRITE).await;
        let first = insert_favorite(&db, user_id).await;
        let second = insert_favorite(&db, user_id).await;

        let user = find_by_token(&db, "xyz123").await.unwrap().unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.token, "xyz123");
        assert_eq!(user.flags, UserFlags::READ | UserFlags::WRITE);
        let mut pfps: Vec<Uuid> = user.favorites.iter().map(|f| f.pfp_id).collect();
        pfps.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(pfps, expected);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn find_by_token_without_favorites(db: PgPool) {
        insert_user(&db, "reader", UserFlags::READ).await;

        let user = find_by_token(&db, "reader").await.unwrap().unwrap();
        assert!(user.favorites.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn find_by_token_is_exact_match(db: PgPool) {
        insert_user(&db, "abc", UserFlags::READ).await;

        assert!(find_by_token(&db, "nope").await.unwrap().is_none());
        assert!(find_by_token(&db, "ABC").await.unwrap().is_none());
        assert!(find_by_token(&db, "abc ").await.unwrap().is_none());
        assert!(find_by_token(&db, "").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn administrator_bit_survives_integer_column(db: PgPool) {
        let flags = UserFlags::ADMINISTRATOR | UserFlags::MODERATE;
        insert_user(&db, "root", flags).await;

        let user = find_by_token(&db, "root").await.unwrap().unwrap();
        assert_eq!(user.flags, flags);
        assert!(user.flags.is_administrator());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn get_flags_by_id(db: PgPool) {
        let user_id = insert_user(&db, "admin", UserFlags::ADMINISTRATOR).await;

        assert_eq!(
            get_flags(&db, user_id).await.unwrap(),
            Some(UserFlags::ADMINISTRATOR)
        );
        assert_eq!(get_flags(&db, Uuid::new_v4()).await.unwrap(), None);
    }
}
