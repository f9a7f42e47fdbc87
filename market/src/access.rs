//! Access control manager
//!
//! Issues decrypt capabilities over tally and bet ciphertexts. Grants
//! are monotonic: they attach to the ciphertext instance named at grant
//! time and are never revoked. Because a bet replaces every tally
//! handle, tally access must be re-granted after any subsequent bet.

use crate::errors::{MarketError, MarketResult};
use crate::registry::Market;
use oraculum_fhe::{CipherVault, Principal};
use tracing::debug;

/// Grant `principal` decrypt access on every current tally ciphertext
pub fn grant_tally_access(
    vault: &dyn CipherVault,
    market: &Market,
    principal: Principal,
) -> MarketResult<()> {
    for handle in market.tallies.handles() {
        vault.grant(handle.id(), principal)?;
    }
    debug!(market_id = market.id, %principal, "tally access granted");
    Ok(())
}

/// Grant `principal` decrypt access on their own choice ciphertext only
pub fn grant_bet_access(
    vault: &dyn CipherVault,
    market: &Market,
    principal: Principal,
) -> MarketResult<()> {
    let bet = market
        .bets
        .get(&principal)
        .ok_or(MarketError::BetNotFound {
            market_id: market.id,
            participant: principal,
        })?;
    vault.grant(bet.choice.id(), principal)?;
    debug!(market_id = market.id, %principal, "bet access granted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bets::{Bet, BetBook};
    use crate::tally::TallyBoard;
    use crate::types::MarketStatus;
    use oraculum_fhe::PlainVault;

    fn sample_market(vault: &PlainVault) -> Market {
        let authority = Principal::from_label("authority");
        Market {
            id: 0,
            title: "Weather".into(),
            outcomes: vec!["Sunny".into(), "Rainy".into()],
            status: MarketStatus::Active,
            total_stake: 0,
            participant_count: 0,
            result: None,
            creator: Principal::from_label("creator"),
            tallies: TallyBoard::bootstrap(vault, authority, 2).unwrap(),
            bets: BetBook::new(),
        }
    }

    #[test]
    fn test_tally_access_covers_every_counter() {
        let vault = PlainVault::new();
        let market = sample_market(&vault);
        let alice = Principal::from_label("alice");

        grant_tally_access(&vault, &market, alice).unwrap();

        for handle in market.tallies.handles() {
            assert!(vault.is_granted(handle.id(), alice));
        }
    }

    #[test]
    fn test_tally_access_is_idempotent() {
        let vault = PlainVault::new();
        let market = sample_market(&vault);
        let alice = Principal::from_label("alice");

        grant_tally_access(&vault, &market, alice).unwrap();
        grant_tally_access(&vault, &market, alice).unwrap();

        let credential = vault.issue_credential(alice);
        for handle in market.tallies.handles() {
            assert_eq!(vault.decrypt_u32(handle, alice, &credential).unwrap(), 0);
        }
    }

    #[test]
    fn test_bet_access_is_own_choice_only() {
        let vault = PlainVault::new();
        let mut market = sample_market(&vault);
        let alice = Principal::from_label("alice");
        let bob = Principal::from_label("bob");

        let alice_choice = vault.encrypt_u32(0).unwrap();
        let bob_choice = vault.encrypt_u32(1).unwrap();
        market
            .bets
            .insert(0, alice, Bet { choice: alice_choice, amount: 5 })
            .unwrap();
        market
            .bets
            .insert(0, bob, Bet { choice: bob_choice, amount: 5 })
            .unwrap();

        grant_bet_access(&vault, &market, alice).unwrap();

        assert!(vault.is_granted(alice_choice.id(), alice));
        assert!(!vault.is_granted(bob_choice.id(), alice));
    }

    #[test]
    fn test_bet_access_requires_a_bet() {
        let vault = PlainVault::new();
        let market = sample_market(&vault);
        let stranger = Principal::from_label("stranger");

        let err = grant_bet_access(&vault, &market, stranger).unwrap_err();
        assert!(matches!(err, MarketError::BetNotFound { .. }));
    }
}
