/*
 * Responsibility
 * - GET /me (認証必須)
 * - middleware が検証済みの AuthCtx をそのまま返す
 */
use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        uid: ctx.uid().to_string(),
    })
}
