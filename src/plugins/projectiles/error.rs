use std::fmt;

/// Reasons a fire request could not be served as asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireError {
    /// Every pooled bullet is in flight.
    PoolExhausted,
    /// No live target and a zero-length aim.
    NoDirection,
}

impl fmt::Display for FireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolExhausted => f.write_str("bullet pool exhausted"),
            Self::NoDirection => f.write_str("no target and no aim direction"),
        }
    }
}

impl std::error::Error for FireError {}
