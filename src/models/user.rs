/*
 * Responsibility
 * - 認証済み主体 (User) とその付随リソース (Favorite)
 * - gate は読むだけ。生成・更新は外部ストアの責務
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::UserFlags;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub pfp_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// An identity resolved from a bearer token.
///
/// `favorites` is always loaded together with the user; handlers rely on it
/// being populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub flags: UserFlags,
    pub favorites: Vec<Favorite>,
}

impl User {
    pub fn new(token: impl Into<String>, flags: UserFlags) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: token.into(),
            flags,
            favorites: Vec::new(),
        }
    }

    pub fn with_favorites(mut self, favorites: Vec<Favorite>) -> Self {
        self.favorites = favorites;
        self
    }
}
