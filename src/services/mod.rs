/*
 * Responsibility
 * - HTTP に依存しないドメインサービス (token 検証など)
 */
pub mod auth;
