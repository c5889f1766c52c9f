/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Bearer token → AuthCtx (保護対象ルートのみ)
 * - http: request id / trace / body limit / timeout (全ルート)
 */
pub mod auth;
pub mod http;
