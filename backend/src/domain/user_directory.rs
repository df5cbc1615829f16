//! Simulated user directory.
//!
//! Every record is synthesised inside the call that needs it and dropped
//! with the response. Nothing is shared between requests apart from the
//! injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{info, warn};

use crate::domain::ports::UserDirectory;
use crate::domain::user_lookup::{
    REPORTED_USER_TOTAL, UserLookup, classify, classify_for_mutation,
};
use crate::domain::{Error, NewUser, User, UserChanges, UserId, synthesized_email, synthesized_name};

/// Identifier assigned to every created user.
pub const CREATED_USER_ID: UserId = UserId::new(1);

/// Age reported after an update that does not carry a usable age.
pub const DEFAULT_UPDATED_AGE: i64 = 25;

/// [`UserDirectory`] that synthesises users from their identifiers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use starter::domain::SimulatedUserDirectory;
///
/// let directory = SimulatedUserDirectory::new(Arc::new(DefaultClock));
/// # let _ = directory;
/// ```
#[derive(Clone)]
pub struct SimulatedUserDirectory {
    clock: Arc<dyn Clock>,
}

impl SimulatedUserDirectory {
    /// Create a directory stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn resolve(lookup: UserLookup, raw_id: i64) -> Result<UserId, Error> {
        match lookup {
            UserLookup::Invalid => warn!(user_id = raw_id, "invalid user id"),
            UserLookup::NotFound => warn!(user_id = raw_id, "user not found"),
            UserLookup::Found(_) => {}
        }
        lookup.into_result()
    }
}

#[async_trait]
impl UserDirectory for SimulatedUserDirectory {
    async fn fetch_user(&self, raw_id: i64) -> Result<User, Error> {
        info!(user_id = raw_id, "fetching user");
        let id = Self::resolve(classify(raw_id), raw_id)?;
        let user = User::synthesized(id, self.clock.utc());
        info!(user_id = raw_id, name = user.name(), "user fetched");
        Ok(user)
    }

    async fn create_user(&self, draft: NewUser) -> Result<User, Error> {
        let NewUser { name, email, age } = draft;
        info!(name = name.as_ref(), email = email.as_str(), "creating user");
        let user = User::new(
            CREATED_USER_ID,
            name,
            email,
            age.map(|age| age.get()),
            self.clock.utc(),
        );
        info!(user_id = user.id().get(), name = user.name(), "user created");
        Ok(user)
    }

    async fn update_user(&self, raw_id: i64, changes: UserChanges) -> Result<User, Error> {
        info!(user_id = raw_id, "updating user");
        let id = Self::resolve(classify_for_mutation(raw_id), raw_id)?;
        let UserChanges { name, email, age } = changes;
        // Blank emails and an age of zero count as absent.
        let name = name.map_or_else(|| synthesized_name(id), String::from);
        let email = email
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| synthesized_email(id));
        let age = age
            .map(|age| age.get())
            .filter(|years| *years != 0)
            .unwrap_or(DEFAULT_UPDATED_AGE);
        let user = User::new(id, name, email, Some(age), self.clock.utc());
        info!(user_id = raw_id, name = user.name(), "user updated");
        Ok(user)
    }

    async fn delete_user(&self, raw_id: i64) -> Result<(), Error> {
        info!(user_id = raw_id, "deleting user");
        Self::resolve(classify_for_mutation(raw_id), raw_id)?;
        info!(user_id = raw_id, "user deleted");
        Ok(())
    }

    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error> {
        info!(skip = request.skip(), limit = request.limit(), "listing users");
        let created_at = self.clock.utc();
        let users = request
            .positions()
            .map(|position| {
                i64::try_from(position)
                    .map(|raw| User::synthesized(UserId::new(raw), created_at))
                    .map_err(|_| Error::internal(format!("user position {position} out of range")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = users.len(), "users listed");
        Ok(Page::new(request, REPORTED_USER_TOTAL, users))
    }
}
