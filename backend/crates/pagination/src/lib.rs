//! Offset pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] captures the `skip`/`limit` pair supplied by a client and
//! a [`Page`] carries one slice of results together with the total the
//! producer reports. Neither type reconciles `skip + limit` with `total`:
//! callers that synthesise records may legitimately page past the reported
//! total, and this crate leaves that policy to them.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of records returned when a client omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The requested limit exceeds the configured ceiling.
    #[error("limit {limit} exceeds the maximum page size of {max}")]
    LimitTooLarge {
        /// Limit supplied by the client.
        limit: u32,
        /// Ceiling configured by the server.
        max: u32,
    },
}

/// Offset-based page request.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(5, 3);
/// let positions: Vec<u64> = request.positions().collect();
/// assert_eq!(positions, vec![6, 7, 8]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    skip: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request without enforcing a maximum page size.
    #[must_use]
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// Build a request, rejecting limits above `max_limit`.
    ///
    /// The limit is never clamped; oversize requests fail outright so the
    /// caller can report the problem to the client.
    ///
    /// # Errors
    /// Returns [`PageRequestError::LimitTooLarge`] when `limit > max_limit`.
    pub const fn bounded(skip: u32, limit: u32, max_limit: u32) -> Result<Self, PageRequestError> {
        if limit > max_limit {
            return Err(PageRequestError::LimitTooLarge {
                limit,
                max: max_limit,
            });
        }
        Ok(Self { skip, limit })
    }

    /// Number of records skipped before the page starts.
    #[must_use]
    pub const fn skip(&self) -> u32 {
        self.skip
    }

    /// Maximum number of records in the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// One-based record positions covered by this page.
    ///
    /// Positions are widened to `u64` so `skip + limit` cannot overflow.
    #[must_use]
    pub fn positions(&self) -> RangeInclusive<u64> {
        let first = u64::from(self.skip) + 1;
        let last = u64::from(self.skip) + u64::from(self.limit);
        first..=last
    }
}

/// One page of results plus the total reported by the producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    total: u64,
    skip: u32,
    limit: u32,
    items: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page for `request`.
    #[must_use]
    pub fn new(request: PageRequest, total: u64, items: Vec<T>) -> Self {
        Self {
            total,
            skip: request.skip,
            limit: request.limit,
            items,
        }
    }

    /// Total number of records reported by the producer.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Offset echoed from the request.
    #[must_use]
    pub const fn skip(&self) -> u32 {
        self.skip
    }

    /// Limit echoed from the request.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Records contained in the page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Transform every record while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total: self.total,
            skip: self.skip,
            limit: self.limit,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
