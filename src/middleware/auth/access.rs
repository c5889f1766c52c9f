//! Bearer token 検証 → users 存在確認 → AuthCtx を extensions に入れる
//!
//! 各ステップは失敗した時点で打ち切る (retry なし):
//! - `Authorization` ヘッダの読み取り
//! - 先頭の `Bearer ` を 1 回だけ除去 (無い場合はヘッダ値をそのまま token とみなす)
//! - 署名 + exp の検証
//! - `uid` claim の取り出しと UUID への変換
//! - users の存在確認
//!
//! 成功時のみ AuthCtx を insert して next へ進む。失敗時はレスポンスを返し、next は呼ばない。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use uuid::Uuid;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AuthError;
use crate::repos::RepoError;
use crate::state::AppState;

/// 保護対象の router に認証を掛ける。
///
/// `route_layer` なので、マッチしたルートにだけ適用される (404 は 401 にならない)。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_ctx = resolve_identity(&state, req.headers()).await?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}

/// Extract the token from the `Authorization` header.
///
/// The `Bearer ` prefix is optional; without it the whole value is the token.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingCredential)?;

    let value = value.to_str().map_err(|_| {
        tracing::warn!("authorization header is not visible ASCII");
        AuthError::InvalidCredential
    })?;

    Ok(value.strip_prefix("Bearer ").unwrap_or(value))
}

async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Result<AuthCtx, AuthError> {
    let token = bearer_token(headers)?;

    let claims = state.auth.verify(token).map_err(|err| {
        tracing::warn!(error = %err, "bearer token verification failed");
        AuthError::InvalidCredential
    })?;

    let uid = claims.subject().ok_or_else(|| {
        tracing::warn!("verified token has no string `uid` claim");
        AuthError::MalformedClaim
    })?;

    // uid は攻撃者が制御できる値なので、変換失敗は 500 ではなく 401
    let user_id = Uuid::parse_str(uid).map_err(|err| {
        tracing::warn!(error = %err, "`uid` claim is not a valid user id");
        AuthError::UnknownSubject
    })?;

    match state.users.find_by_id(user_id).await {
        Ok(record) => {
            tracing::debug!(
                user_id = %record.id,
                expires_at = ?claims.expires_at(),
                "request authenticated"
            );
            Ok(AuthCtx::new(record.id, uid))
        }
        Err(RepoError::NotFound) => {
            tracing::warn!(%user_id, "token subject does not exist");
            Err(AuthError::UnknownSubject)
        }
        Err(err @ RepoError::Db(_)) => {
            tracing::error!(
                error = ?err,
                backend = state.users.backend_name(),
                %user_id,
                "user lookup failed"
            );
            Err(AuthError::StoreFault)
        }
    }
}
