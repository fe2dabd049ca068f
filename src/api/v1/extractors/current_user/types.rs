/*
 * Responsibility
 * - Handler から見える「認証済みユーザー」の型
 * - gate が解決した User をそのまま包む (DB は引き直さない)
 */

use crate::models::User;

/// gate が request extensions に入れた User。
/// `middleware::auth::access::require` で保護されたルート専用。
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);
