//! Public identifiers, statuses, and view snapshots

use oraculum_fhe::{CipherU32, HandleId, Principal};
use serde::{Deserialize, Serialize};

/// Monotonically assigned market identifier (0-based, dense)
pub type MarketId = u64;

/// Market lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    /// Accepting bets
    Active,
    /// Resolved; no further mutation
    Closed,
}

/// Read-only snapshot of a market's public metadata
///
/// Carries the current tally handle ids so external decryptors can
/// correlate grants with handles; never carries plaintext counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketView {
    /// Market identifier
    pub id: MarketId,
    /// Market question
    pub title: String,
    /// Named outcomes; index order is the tally order and never changes
    pub outcomes: Vec<String>,
    /// Lifecycle state
    pub status: MarketStatus,
    /// Sum of all stakes placed (public amounts)
    pub total_stake: u64,
    /// Number of distinct participants with a bet
    pub participant_count: u64,
    /// Winning outcome index, present iff closed
    pub result: Option<u8>,
    /// Principal that registered the market
    pub creator: Principal,
    /// Arena ids of the current tally ciphertexts, one per outcome
    pub tally_handles: Vec<HandleId>,
}

impl MarketView {
    /// Number of declared outcomes
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }
}

/// Read-only snapshot of a single bet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetView {
    /// Market the bet belongs to
    pub market_id: MarketId,
    /// Betting principal
    pub participant: Principal,
    /// Handle of the encrypted outcome choice
    pub choice: CipherU32,
    /// Public stake amount
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_outcome_count() {
        let view = MarketView {
            id: 0,
            title: "Weather".into(),
            outcomes: vec!["Sunny".into(), "Rainy".into(), "Snow".into()],
            status: MarketStatus::Active,
            total_stake: 0,
            participant_count: 0,
            result: None,
            creator: Principal::from_label("creator"),
            tally_handles: vec![0, 1, 2],
        };

        assert_eq!(view.outcome_count(), 3);
        assert_eq!(view.tally_handles.len(), view.outcome_count());
    }
}
