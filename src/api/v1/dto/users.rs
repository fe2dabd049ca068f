/*
 * Responsibility
 * - /me, /admin/users 系の response DTO
 * - flags は数値ではなくフラグ名の配列で返す
 */
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Favorite, User, UserFlags};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub flags: Vec<&'static str>,
    pub is_administrator: bool,
    pub favorite_count: usize,
}

impl From<&User> for MeResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            flags: user.flags.names(),
            is_administrator: user.flags.is_administrator(),
            favorite_count: user.favorites.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Serialize)]
pub struct UserFlagsResponse {
    pub id: Uuid,
    pub flags: Vec<&'static str>,
    pub bits: u32,
}

impl UserFlagsResponse {
    pub fn new(id: Uuid, flags: UserFlags) -> Self {
        Self {
            id,
            flags: flags.names(),
            bits: flags.bits(),
        }
    }
}
