/*
 * Responsibility
 * - 永続化層 (users) の公開インターフェース
 */
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod user_repo;

pub use error::RepoError;
pub use user_repo::{PgUserStore, UserStore};
