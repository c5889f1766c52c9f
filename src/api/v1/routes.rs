/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は認証なし、/me は認証必須
 * - Bearer が必要な範囲はここで route_layer として適用する
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/me", get(me));
    let protected = middleware::auth::access::apply(protected, state);

    Router::new().route("/health", get(health)).merge(protected)
}
