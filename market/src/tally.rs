//! Encrypted tally engine
//!
//! A [`TallyBoard`] owns one encrypted counter per outcome and updates
//! them obliviously: every bet drives the same eq/select/add chain over
//! every counter, so neither access patterns nor per-update cost reveal
//! which outcome was chosen.

use crate::errors::MarketResult;
use oraculum_fhe::{CipherU32, CipherVault, HandleId, Principal};
use tracing::debug;

/// Per-outcome encrypted counters for one market
pub struct TallyBoard {
    counters: Vec<CipherU32>,
    /// The ledger's own standing decrypt identity, re-granted on every
    /// replacement handle
    authority: Principal,
}

impl TallyBoard {
    /// Initialize one zero counter per outcome, granted to the authority
    pub fn bootstrap(
        vault: &dyn CipherVault,
        authority: Principal,
        outcome_count: usize,
    ) -> MarketResult<Self> {
        let mut counters = Vec::with_capacity(outcome_count);
        for _ in 0..outcome_count {
            let zero = vault.encrypt_u32(0)?;
            vault.grant(zero.id(), authority)?;
            counters.push(zero);
        }
        Ok(Self {
            counters,
            authority,
        })
    }

    /// Obliviously add one to the counter the encrypted choice selects
    ///
    /// For every outcome index i: `matched = eq(choice, enc(i))`,
    /// `delta = select(matched, enc(1), enc(0))`, `counter' = add(counter,
    /// delta)`. All branches run unconditionally; a choice outside
    /// `0..outcome_count` matches no branch and increments nothing.
    ///
    /// The replacement handles are committed only after every vault call
    /// has succeeded, so a backend failure leaves the board unchanged.
    pub fn oblivious_increment(
        &mut self,
        vault: &dyn CipherVault,
        choice: &CipherU32,
    ) -> MarketResult<()> {
        let one = vault.encrypt_u32(1)?;
        let zero = vault.encrypt_u32(0)?;

        let mut next = Vec::with_capacity(self.counters.len());
        for (index, counter) in self.counters.iter().enumerate() {
            let needle = vault.encrypt_u32(index as u32)?;
            let matched = vault.eq(choice, &needle)?;
            let delta = vault.select(&matched, &one, &zero)?;
            let bumped = vault.add(counter, &delta)?;
            // Fresh handle, fresh (empty) grant set: restore the ledger's
            // standing grant before the handle becomes current.
            vault.grant(bumped.id(), self.authority)?;
            next.push(bumped);
        }

        debug!(outcomes = self.counters.len(), "tally board advanced");
        self.counters = next;
        Ok(())
    }

    /// Current counter handles, in outcome order
    pub fn handles(&self) -> &[CipherU32] {
        &self.counters
    }

    /// Arena ids of the current counters, in outcome order
    pub fn handle_ids(&self) -> Vec<HandleId> {
        self.counters.iter().map(|c| c.id()).collect()
    }

    /// Number of outcome counters
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Whether the board has no counters (never true for a valid market)
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oraculum_fhe::PlainVault;

    fn decrypt_all(vault: &PlainVault, board: &TallyBoard, reader: Principal) -> Vec<u32> {
        let credential = vault.issue_credential(reader);
        board
            .handles()
            .iter()
            .map(|c| vault.decrypt_u32(c, reader, &credential).unwrap())
            .collect()
    }

    #[test]
    fn test_bootstrap_zeroes() {
        let vault = PlainVault::new();
        let authority = Principal::from_label("authority");

        let board = TallyBoard::bootstrap(&vault, authority, 3).unwrap();

        assert_eq!(board.len(), 3);
        assert_eq!(decrypt_all(&vault, &board, authority), vec![0, 0, 0]);
    }

    #[test]
    fn test_increment_bumps_exactly_the_chosen_slot() {
        let vault = PlainVault::new();
        let authority = Principal::from_label("authority");
        let mut board = TallyBoard::bootstrap(&vault, authority, 3).unwrap();

        let choice = vault.encrypt_u32(1).unwrap();
        board.oblivious_increment(&vault, &choice).unwrap();

        assert_eq!(decrypt_all(&vault, &board, authority), vec![0, 1, 0]);
    }

    #[test]
    fn test_increment_replaces_every_handle() {
        let vault = PlainVault::new();
        let authority = Principal::from_label("authority");
        let mut board = TallyBoard::bootstrap(&vault, authority, 2).unwrap();
        let before = board.handle_ids();

        let choice = vault.encrypt_u32(0).unwrap();
        board.oblivious_increment(&vault, &choice).unwrap();

        let after = board.handle_ids();
        for id in &before {
            assert!(!after.contains(id), "stale handle survived an update");
        }
    }

    #[test]
    fn test_authority_regranted_on_new_handles() {
        let vault = PlainVault::new();
        let authority = Principal::from_label("authority");
        let mut board = TallyBoard::bootstrap(&vault, authority, 2).unwrap();

        let choice = vault.encrypt_u32(0).unwrap();
        board.oblivious_increment(&vault, &choice).unwrap();

        for handle in board.handles() {
            assert!(vault.is_granted(handle.id(), authority));
        }
    }

    #[test]
    fn test_out_of_range_choice_is_absorbed() {
        let vault = PlainVault::new();
        let authority = Principal::from_label("authority");
        let mut board = TallyBoard::bootstrap(&vault, authority, 4).unwrap();

        let choice = vault.encrypt_u32(17).unwrap();
        board.oblivious_increment(&vault, &choice).unwrap();

        assert_eq!(decrypt_all(&vault, &board, authority), vec![0, 0, 0, 0]);
    }
}
