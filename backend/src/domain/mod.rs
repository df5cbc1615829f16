//! Domain primitives and services.
//!
//! Purpose: define the user model, the identifier policy and the simulated
//! directory behind the users API. Nothing here knows about HTTP; the
//! inbound adapter translates [`Error`] into response envelopes.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure and its category.
//! - User, NewUser, UserChanges: user record and validated inputs.
//! - SimulatedUserDirectory: the [`ports::UserDirectory`] implementation.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_directory;
pub mod user_lookup;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{
    Age, NewUser, User, UserChanges, UserId, UserName, UserValidationError, synthesized_email,
    synthesized_name,
};
pub use self::user_directory::SimulatedUserDirectory;
