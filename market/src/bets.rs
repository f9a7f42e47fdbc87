//! Bet ledger
//!
//! Per-market book of bets, one per participant. A stored bet is
//! immutable: there is no edit or cancel path, and the encrypted choice
//! is never range-validated here (the ledger cannot inspect it).

use crate::errors::{MarketError, MarketResult};
use crate::types::{BetView, MarketId};
use oraculum_fhe::{CipherU32, Principal};
use std::collections::HashMap;

/// A single stored bet
#[derive(Clone, Debug)]
pub struct Bet {
    /// Encrypted outcome index
    pub choice: CipherU32,
    /// Public stake amount, always > 0
    pub amount: u64,
}

/// All bets of one market, keyed by participant
#[derive(Default)]
pub struct BetBook {
    entries: HashMap<Principal, Bet>,
}

impl BetBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `participant` already has a bet here
    pub fn contains(&self, participant: &Principal) -> bool {
        self.entries.contains_key(participant)
    }

    /// Look up a participant's bet
    pub fn get(&self, participant: &Principal) -> Option<&Bet> {
        self.entries.get(participant)
    }

    /// Store a bet, rejecting duplicates per (market, participant)
    pub fn insert(
        &mut self,
        market_id: MarketId,
        participant: Principal,
        bet: Bet,
    ) -> MarketResult<()> {
        if self.entries.contains_key(&participant) {
            return Err(MarketError::DuplicateBet {
                market_id,
                participant,
            });
        }
        self.entries.insert(participant, bet);
        Ok(())
    }

    /// View snapshot of a participant's bet, if any
    pub fn view(&self, market_id: MarketId, participant: Principal) -> Option<BetView> {
        self.entries.get(&participant).map(|bet| BetView {
            market_id,
            participant,
            choice: bet.choice,
            amount: bet.amount,
        })
    }

    /// Number of bets stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the book holds no bets
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oraculum_fhe::Cipher;

    fn bet(handle: u64, amount: u64) -> Bet {
        Bet {
            choice: Cipher::from_raw(handle),
            amount,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut book = BetBook::new();
        let alice = Principal::from_label("alice");

        book.insert(0, alice, bet(10, 100)).unwrap();

        assert!(book.contains(&alice));
        assert_eq!(book.get(&alice).unwrap().amount, 100);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_duplicate_bet_rejected() {
        let mut book = BetBook::new();
        let alice = Principal::from_label("alice");

        book.insert(3, alice, bet(10, 100)).unwrap();
        let err = book.insert(3, alice, bet(11, 50)).unwrap_err();

        assert_eq!(
            err,
            MarketError::DuplicateBet {
                market_id: 3,
                participant: alice
            }
        );
        // First bet is untouched
        assert_eq!(book.get(&alice).unwrap().amount, 100);
    }

    #[test]
    fn test_view_snapshot() {
        let mut book = BetBook::new();
        let bob = Principal::from_label("bob");
        book.insert(1, bob, bet(7, 25)).unwrap();

        let view = book.view(1, bob).unwrap();
        assert_eq!(view.market_id, 1);
        assert_eq!(view.amount, 25);
        assert_eq!(view.choice.id(), 7);

        assert!(book.view(1, Principal::from_label("carol")).is_none());
    }
}
