/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token 検証や users の存在確認は middleware/services 側の責務
 * - extensions はリクエスト単位なので、リクエストをまたいで残ることはない
 */

use uuid::Uuid;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は token の `uid` claim を UUID に変換したもので、users に存在確認済み
/// - `uid` は claim の文字列そのまま (大文字 / ハイフンなし等も正規化しない)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
    uid: String,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, uid: impl Into<String>) -> Self {
        Self {
            user_id,
            uid: uid.into(),
        }
    }

    /// The identity exactly as carried by the token's `uid` claim.
    pub fn uid(&self) -> &str {
        &self.uid
    }
}
