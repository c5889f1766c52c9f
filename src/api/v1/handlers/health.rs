/*
 * Responsibility
 * - GET /health (疎通用、認証なし)
 * - user store には触れない (store 障害時も process の生存確認はできる)
 */
use axum::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
