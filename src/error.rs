/*
 * Responsibility
 * - 認証ゲートの失敗分類 (AuthError) 定義
 * - IntoResponse 実装 (HTTP status / text/plain body)
 * - 内部エラーの詳細はクライアントに返さない (ログにのみ出す)
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing credential")]
    MissingCredential,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("malformed credential")]
    MalformedClaim,
    #[error("unknown subject")]
    UnknownSubject,
    #[error("store unavailable")]
    StoreFault,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::InvalidCredential
            | AuthError::MalformedClaim
            | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AuthError::StoreFault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client. Never carries the underlying cause.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "No Authorization Header",
            AuthError::InvalidCredential => "Invalid Authorization Token",
            AuthError::MalformedClaim => "Incorrect Authorization Header",
            AuthError::UnknownSubject => "No Such User",
            AuthError::StoreFault => "Internal Server Error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // &'static str responds with `text/plain; charset=utf-8`
        (self.status_code(), self.public_message()).into_response()
    }
}
