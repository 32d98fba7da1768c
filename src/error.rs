use thiserror::Error;

/// Reasons an optimal BST instance is rejected before the DP pass runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    /// `p` or `q` does not hold exactly one entry per gap (`n + 1`).
    #[error("expected {expected} entries in `{name}`, got {actual}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `p[0]` has no key attached to it and must stay zero.
    #[error("placeholder p[0] must be 0, got {0}")]
    NonZeroPlaceholder(f64),

    /// A probability is negative, above one, or not a number.
    #[error("{name}[{index}] = {value} is not a probability")]
    ProbabilityOutOfRange {
        name: &'static str,
        index: usize,
        value: f64,
    },

    /// The key and gap probabilities do not add up to one.
    #[error("probabilities sum to {sum}, expected 1 (tolerance {tolerance})")]
    ProbabilitySum { sum: f64, tolerance: f64 },

    /// Keys must be strictly ascending; `index` is the first offending key.
    #[error("keys must be strictly ascending, key {index} breaks the order")]
    UnsortedKeys { index: usize },

    #[error("{count} keys exceeds the configured limit of {limit}")]
    TooManyKeys { count: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
