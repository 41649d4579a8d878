use thiserror::Error;

use crate::resolver::resolver::NotFoundReason;
use crate::snapshot::source::SourceError;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The active window could not be reached; the element cache was cleared.
    #[error("transport error: {0}")]
    Transport(#[from] SourceError),

    /// Raised only by [`Resolver::require`](crate::resolver::resolver::Resolver::require).
    #[error("element not found using locator '{locator}' (target types: {types:?}): {reason}")]
    ElementNotFound {
        locator: String,
        types: Vec<String>,
        reason: NotFoundReason,
    },
}
