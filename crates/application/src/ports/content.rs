//! Content port
//!
//! Word lists come from the content platform already filtered for the
//! learner's level; the session only rejects emptiness.

use async_trait::async_trait;

use domain::Word;

use crate::error::ApplicationError;

/// Port for fetching exercise word lists
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentPort: Send + Sync {
    /// Fetch the pre-filtered word list for an exercise
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError` when the list cannot be loaded.
    async fn word_list(&self, list_id: &str) -> Result<Vec<Word>, ApplicationError>;
}
