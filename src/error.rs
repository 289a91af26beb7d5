use thiserror::Error;

/// Failures reported by the search engines and the move selector.
///
/// Running out of legal moves is not an error: the engines return `None` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The game adapter broke its contract, e.g. gave a different move list for the same
    /// position, or produced a non-finite utility.
    #[error("game adapter contract violation: {0}")]
    AdapterContractViolation(String),

    /// Rejected before any search begins.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
