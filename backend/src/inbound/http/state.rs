//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::UserDirectory;
use crate::settings::DEFAULT_MAX_PAGE_LIMIT;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User directory port.
    pub users: Arc<dyn UserDirectory>,
    /// Source of timestamps reported by the health endpoint.
    pub clock: Arc<dyn Clock>,
    /// Largest `limit` accepted by the users listing.
    pub max_page_limit: u32,
}

impl HttpState {
    /// Construct state with the default listing ceiling.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use starter::domain::SimulatedUserDirectory;
    /// use starter::inbound::http::state::HttpState;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let state = HttpState::new(Arc::new(SimulatedUserDirectory::new(clock.clone())), clock)
    ///     .with_max_page_limit(50);
    /// assert_eq!(state.max_page_limit, 50);
    /// ```
    pub fn new(users: Arc<dyn UserDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            clock,
            max_page_limit: DEFAULT_MAX_PAGE_LIMIT,
        }
    }

    /// Override the listing ceiling.
    #[must_use]
    pub fn with_max_page_limit(mut self, max_page_limit: u32) -> Self {
        self.max_page_limit = max_page_limit;
        self
    }
}
