//! Driving port for user lookups and simulated mutations.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, NewUser, User, UserChanges};

/// Domain use-case port backing the `/api/v1/users` endpoints.
///
/// Identifiers arrive raw so the implementation owns the id policy: reads
/// reject ids `<= 0` as invalid and ids above the directory range as missing,
/// mutations only reject the latter.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the user with `raw_id`.
    async fn fetch_user(&self, raw_id: i64) -> Result<User, Error>;

    /// Create a user from a validated payload.
    async fn create_user(&self, draft: NewUser) -> Result<User, Error>;

    /// Apply `changes` to the user with `raw_id`.
    async fn update_user(&self, raw_id: i64, changes: UserChanges) -> Result<User, Error>;

    /// Delete the user with `raw_id`.
    async fn delete_user(&self, raw_id: i64) -> Result<(), Error>;

    /// Return one page of users.
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error>;
}
