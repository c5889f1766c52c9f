/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - "not found" は Db エラーとは別の variant として返す (文字列比較はしない)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
