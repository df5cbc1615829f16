//! Identifier policy for the simulated user directory.
//!
//! Ids in `1..=100` exist, ids `<= 0` are invalid input and ids `> 100` are
//! unknown. Reads apply the full three-way classification; updates and
//! deletes only apply the not-found half, so an id `<= 0` passes through them.

use crate::domain::{Error, UserId};

/// Highest identifier the directory reports as existing.
pub const MAX_USER_ID: i64 = 100;

/// Total reported by listings, independent of the requested page.
pub const REPORTED_USER_TOTAL: u64 = 100;

/// Message attached to lookups with an id `<= 0`.
pub const INVALID_USER_ID_MESSAGE: &str = "无效的用户 ID (invalid user id)";

/// Message attached to lookups with an id above [`MAX_USER_ID`].
pub const USER_NOT_FOUND_MESSAGE: &str = "用户不存在 (user not found)";

/// Outcome of classifying a raw identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup {
    /// The id is `<= 0`.
    Invalid,
    /// The id is above [`MAX_USER_ID`].
    NotFound,
    /// The id denotes an existing user.
    Found(UserId),
}

impl UserLookup {
    /// Convert the classification into a domain result.
    ///
    /// # Examples
    /// ```
    /// use starter::domain::{ErrorCode, UserId};
    /// use starter::domain::user_lookup::classify;
    ///
    /// assert_eq!(classify(1).into_result(), Ok(UserId::new(1)));
    /// let err = classify(0).into_result().expect_err("0 is invalid");
    /// assert_eq!(err.code(), ErrorCode::InvalidRequest);
    /// ```
    pub fn into_result(self) -> Result<UserId, Error> {
        match self {
            Self::Invalid => Err(Error::invalid_request(INVALID_USER_ID_MESSAGE)),
            Self::NotFound => Err(Error::not_found(USER_NOT_FOUND_MESSAGE)),
            Self::Found(id) => Ok(id),
        }
    }
}

/// Classify `raw` for reads.
pub const fn classify(raw: i64) -> UserLookup {
    if raw <= 0 {
        UserLookup::Invalid
    } else if raw > MAX_USER_ID {
        UserLookup::NotFound
    } else {
        UserLookup::Found(UserId::new(raw))
    }
}

/// Classify `raw` for updates and deletes, which skip the invalid-id check.
pub const fn classify_for_mutation(raw: i64) -> UserLookup {
    if raw > MAX_USER_ID {
        UserLookup::NotFound
    } else {
        UserLookup::Found(UserId::new(raw))
    }
}

#[cfg(test)]
mod tests {
    //! Boundary coverage for the identifier policy.

    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(i64::MIN, UserLookup::Invalid)]
    #[case(-1, UserLookup::Invalid)]
    #[case(0, UserLookup::Invalid)]
    #[case(1, UserLookup::Found(UserId::new(1)))]
    #[case(50, UserLookup::Found(UserId::new(50)))]
    #[case(100, UserLookup::Found(UserId::new(100)))]
    #[case(101, UserLookup::NotFound)]
    #[case(i64::MAX, UserLookup::NotFound)]
    fn classify_partitions_ids(#[case] raw: i64, #[case] expected: UserLookup) {
        assert_eq!(classify(raw), expected);
    }

    #[rstest]
    #[case(-5, UserLookup::Found(UserId::new(-5)))]
    #[case(0, UserLookup::Found(UserId::new(0)))]
    #[case(100, UserLookup::Found(UserId::new(100)))]
    #[case(101, UserLookup::NotFound)]
    fn mutation_policy_only_rejects_unknown_ids(#[case] raw: i64, #[case] expected: UserLookup) {
        assert_eq!(classify_for_mutation(raw), expected);
    }

    #[rstest]
    fn invalid_lookup_maps_to_invalid_request() {
        let err = classify(0).into_result().expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("invalid"));
        assert!(err.message().contains("无效"));
    }

    #[rstest]
    fn unknown_lookup_maps_to_not_found() {
        let err = classify(101).into_result().expect_err("unknown id");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("not found"));
        assert!(err.message().contains("不存在"));
    }
}
