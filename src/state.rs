/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: TokenVerifier (secret は起動時に一度だけ設定)
 *   - users: UserStore (本番は PgUserStore、テストは in-memory)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::UserStore;
use crate::services::auth::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<TokenVerifier>,
    pub users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("users", &self.users.backend_name())
            .finish()
    }
}

impl AppState {
    pub fn new(auth: Arc<TokenVerifier>, users: Arc<dyn UserStore>) -> Self {
        Self { auth, users }
    }
}
