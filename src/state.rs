/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - identities: token → User の解決 (gate が使う)
 *   - db: handler が直接読む repo 用 (テストでは None)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;

use crate::services::identity::{IdentityLookup, PgIdentityLookup};

#[derive(Clone)]
pub struct AppState {
    pub identities: Arc<dyn IdentityLookup>,
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self {
            identities: Arc::new(PgIdentityLookup::new(db.clone())),
            db: Some(db),
        }
    }

    /// State with a custom identity backend and no database.
    pub fn with_identities(identities: Arc<dyn IdentityLookup>) -> Self {
        Self {
            identities,
            db: None,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("identities", &self.identities.backend_name())
            .field("db", &self.db.is_some())
            .finish()
    }
}
