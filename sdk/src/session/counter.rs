//! Hourly transaction accounting.
//!
//! The exchange caps the number of order instructions a customer may submit
//! per hour. Placement and replacement calls report their instruction count
//! here before anything is sent.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

/// Default hourly instruction limit.
pub const DEFAULT_TRANSACTION_LIMIT: usize = 5000;

/// Rejection raised when a call would exceed the hourly limit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionCountError {
    /// The requested instructions do not fit in the current hour.
    #[error("too many transactions: {requested} requested, {count} of {limit} already used this hour")]
    TooManyTransactions {
        /// Instructions in the rejected call.
        requested: usize,
        /// Instructions already recorded this hour.
        count: usize,
        /// Hourly limit.
        limit: usize,
    },
}

/// Instruction counter for the current UTC hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionCounter {
    limit: usize,
    count: usize,
    window: Option<(NaiveDate, u32)>,
}

impl Default for TransactionCounter {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSACTION_LIMIT)
    }
}

impl TransactionCounter {
    /// Creates a counter with the given hourly limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            count: 0,
            window: None,
        }
    }

    /// Hourly limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Instructions recorded in the current window.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Records `requested` instructions at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionCountError::TooManyTransactions`] if the total for
    /// this hour would exceed the limit. Nothing is recorded in that case.
    pub fn increment_and_check(&mut self, requested: usize) -> Result<usize, TransactionCountError> {
        self.increment_and_check_at(requested, Utc::now())
    }

    /// Records `requested` instructions at `now`.
    ///
    /// # Errors
    ///
    /// See [`Self::increment_and_check`].
    pub fn increment_and_check_at(
        &mut self,
        requested: usize,
        now: DateTime<Utc>,
    ) -> Result<usize, TransactionCountError> {
        let window = (now.date_naive(), now.hour());
        if self.window != Some(window) {
            self.window = Some(window);
            self.count = 0;
        }

        let total = self.count.saturating_add(requested);
        if total > self.limit {
            return Err(TransactionCountError::TooManyTransactions {
                requested,
                count: self.count,
                limit: self.limit,
            });
        }

        self.count = total;
        Ok(total)
    }
}
