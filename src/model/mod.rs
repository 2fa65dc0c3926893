pub mod assignment;
pub mod election;
pub mod tolerance;

use std::time::Duration;

pub use assignment::SeatAssignment;
pub use election::ElectionInstance;

/// Zero-based index into an election's votes sequence.
pub type PartyId = usize;

#[derive(Debug, thiserror::Error)]
pub enum ElectionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Knapsack for party {party} has no feasible selection")]
    OptimizationInfeasible { party: PartyId },
    #[error("Knapsack for party {party} did not finish within {limit:?}")]
    SolveTimedOut { party: PartyId, limit: Duration },
}

impl ElectionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ElectionError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ElectionError>;
