//! User data model.
//!
//! Users are simulated: records are synthesised from their identifier on
//! demand and never stored. Inbound payloads are validated into [`NewUser`]
//! and [`UserChanges`] before any domain logic runs.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Minimum allowed length for a user name, in characters.
pub const USER_NAME_MIN: usize = 1;
/// Maximum allowed length for a user name, in characters.
pub const USER_NAME_MAX: usize = 50;
/// Smallest accepted age.
pub const AGE_MIN: i64 = 0;
/// Largest accepted age.
pub const AGE_MAX: i64 = 150;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Name shorter than [`USER_NAME_MIN`] characters.
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
    /// Name longer than [`USER_NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Age below [`AGE_MIN`].
    #[error("age must be greater than or equal to {min}")]
    AgeTooLow { min: i64 },
    /// Age above [`AGE_MAX`].
    #[error("age must be less than or equal to {max}")]
    AgeTooHigh { max: i64 },
}

/// Integer user identifier.
///
/// The type itself accepts any integer: the lookup policy in
/// [`crate::domain::user_lookup`] decides which values denote real users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User name holding between [`USER_NAME_MIN`] and [`USER_NAME_MAX`]
/// characters.
///
/// Length counts Unicode scalar values, so `"张三"` is two characters.
/// Whitespace is not trimmed: `" "` is a valid one-character name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        let length = name.chars().count();
        if length < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort {
                min: USER_NAME_MIN,
            });
        }
        if length > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Age within [`AGE_MIN`]..=[`AGE_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i64);

impl Age {
    /// Validate and construct an [`Age`].
    pub fn new(years: i64) -> Result<Self, UserValidationError> {
        if years < AGE_MIN {
            return Err(UserValidationError::AgeTooLow { min: AGE_MIN });
        }
        if years > AGE_MAX {
            return Err(UserValidationError::AgeTooHigh { max: AGE_MAX });
        }
        Ok(Self(years))
    }

    /// Age in years.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Validated payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Requested name.
    pub name: UserName,
    /// Contact address. Format is not enforced.
    pub email: String,
    /// Optional age.
    pub age: Option<Age>,
}

/// Validated partial update; absent fields keep their synthesised defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement name.
    pub name: Option<UserName>,
    /// Replacement contact address.
    pub email: Option<String>,
    /// Replacement age.
    pub age: Option<Age>,
}

/// Application user.
///
/// `age` is a plain integer, not an [`Age`]: synthesised users derive it
/// from the id (`20 + id`), which exceeds [`AGE_MAX`] for ids above 130 when
/// a listing pages past the reported total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    age: Option<i64>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from its parts.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        age: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            age,
            created_at,
        }
    }

    /// Synthesise the record for `id`: `user{id}`, `user{id}@example.com`,
    /// age `20 + id`.
    pub fn synthesized(id: UserId, created_at: DateTime<Utc>) -> Self {
        Self::new(
            id,
            synthesized_name(id),
            synthesized_email(id),
            Some(id.get().saturating_add(20)),
            created_at,
        )
    }

    /// Identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Age in years, when known.
    pub fn age(&self) -> Option<i64> {
        self.age
    }

    /// Moment the record was materialised.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Name given to the synthesised user with `id`.
pub fn synthesized_name(id: UserId) -> String {
    format!("user{id}")
}

/// Email given to the synthesised user with `id`.
pub fn synthesized_email(id: UserId) -> String {
    format!("user{id}@example.com")
}
