//! In-memory `UserStore` implementations used by tests.
use std::collections::HashSet;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{UserRecord, UserStore};

/// Fixed set of known users. Counts lookups so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: HashSet<Uuid>,
    lookups: AtomicUsize,
}

impl MemoryUserStore {
    pub fn with_users(users: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            users: users.into_iter().collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<UserRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.users.contains(&id) {
            Ok(UserRecord { id })
        } else {
            Err(RepoError::NotFound)
        }
    }
}

/// Every lookup fails as if the pool could not hand out a connection.
#[derive(Debug, Default)]
pub struct UnreachableUserStore;

#[async_trait]
impl UserStore for UnreachableUserStore {
    fn backend_name(&self) -> &'static str {
        "unreachable"
    }

    async fn find_by_id(&self, _id: Uuid) -> RepoResult<UserRecord> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}

/// Lookups never complete. `dropped` flips once an in-flight lookup is dropped.
#[derive(Debug, Default)]
pub struct StalledUserStore {
    pub dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for StalledUserStore {
    fn backend_name(&self) -> &'static str {
        "stalled"
    }

    async fn find_by_id(&self, _id: Uuid) -> RepoResult<UserRecord> {
        let _flag = DropFlag(self.dropped.clone());
        std::future::pending::<RepoResult<UserRecord>>().await
    }
}
