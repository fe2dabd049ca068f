use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::User;
use crate::repos::user_repo;
use crate::services::identity::lookup::{IdentityLookup, LookupResult};

/// Postgres-backed identity lookup.
///
/// Thin adapter over `user_repo`; the pool is the only state and is cheap to
/// clone.
#[derive(Clone, Debug)]
pub struct PgIdentityLookup {
    db: PgPool,
}

impl PgIdentityLookup {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityLookup for PgIdentityLookup {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_by_token(&self, token: &str) -> LookupResult<Option<User>> {
        Ok(user_repo::find_by_token(&self.db, token).await?)
    }
}
