//! Market Engine Error Types

use crate::types::MarketId;
use oraculum_fhe::{Principal, VaultError};
use thiserror::Error;

/// Errors that can occur in market operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    // Argument errors
    #[error("market title must not be empty")]
    EmptyTitle,

    #[error("outcome label at index {index} must not be empty")]
    EmptyOutcomeLabel { index: usize },

    #[error("outcome count {got} outside allowed range [{min}, {max}]")]
    OutcomeCountOutOfRange { got: usize, min: usize, max: usize },

    #[error("stake amount must be greater than zero")]
    ZeroStake,

    #[error("winning outcome {index} out of range for {outcome_count} outcomes")]
    WinnerOutOfRange { index: u8, outcome_count: usize },

    // Lookup errors
    #[error("market {0} not found")]
    MarketNotFound(MarketId),

    #[error("no bet recorded for {participant} in market {market_id}")]
    BetNotFound {
        market_id: MarketId,
        participant: Principal,
    },

    // Lifecycle errors
    #[error("market {0} is closed")]
    MarketClosed(MarketId),

    // Duplicate errors
    #[error("{participant} already placed a bet in market {market_id}")]
    DuplicateBet {
        market_id: MarketId,
        participant: Principal,
    },

    // Capability errors
    #[error("cipher vault failure: {0}")]
    Vault(#[from] VaultError),
}

/// Coarse failure classes for callers that dispatch by kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, rejected before any state mutation
    InvalidArgument,
    /// Unknown market or bet
    NotFound,
    /// Operation not valid for the market's lifecycle state
    InvalidState,
    /// Duplicate mutation prevented
    AlreadyExists,
    /// Decrypt attempted without a grant or with a bad credential
    Denied,
    /// Failure inside the homomorphic backend
    Backend,
}

impl MarketError {
    /// The coarse class of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::EmptyTitle
            | MarketError::EmptyOutcomeLabel { .. }
            | MarketError::OutcomeCountOutOfRange { .. }
            | MarketError::ZeroStake
            | MarketError::WinnerOutOfRange { .. } => ErrorKind::InvalidArgument,
            MarketError::MarketNotFound(_) | MarketError::BetNotFound { .. } => ErrorKind::NotFound,
            MarketError::MarketClosed(_) => ErrorKind::InvalidState,
            MarketError::DuplicateBet { .. } => ErrorKind::AlreadyExists,
            MarketError::Vault(VaultError::AccessDenied(_))
            | MarketError::Vault(VaultError::InvalidCredential) => ErrorKind::Denied,
            MarketError::Vault(_) => ErrorKind::Backend,
        }
    }
}

/// Result type for market operations
pub type MarketResult<T> = Result<T, MarketError>;
