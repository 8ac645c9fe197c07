use thiserror::Error;

/// Errors surfaced at the discovery core boundary.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Query was blank or whitespace-only. Caller error, not worth retrying.
    #[error("invalid query: query must not be blank")]
    InvalidQuery,

    /// Search could not be completed: the direct lookup (or the direct
    /// fallback of a thematic search) hit a transport failure.
    #[error("search failed for query '{query}': {reason}")]
    SearchFailed {
        /// The search query that failed
        query: String,
        /// The reason for the failure
        reason: String,
    },

    /// The completion provider call failed.
    #[error("recommendation failed: {reason}")]
    RecommendationFailed {
        /// The reason for the failure
        reason: String,
    },

    /// Network communication error while talking to a provider.
    #[error("network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// Provider answered with a non-success status or an unreadable body.
    #[error("provider error: {reason}")]
    Provider {
        /// The reason for the provider error
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
