//! Market operation processor
//!
//! [`PredictionLedger`] is the public state-transition surface. Every
//! operation validates against the registry and bet book, drives the
//! tally engine and access control, and appends exactly one event on
//! success. An operation either fully applies or fails with no state
//! change: all validation and all vault calls complete before the first
//! field of a market is mutated.
//!
//! Operations on one market are serialized by that market's mutex;
//! operations on distinct markets run concurrently. Vault calls are made
//! while holding only the one market's lock.

use crate::access;
use crate::bets::Bet;
use crate::errors::{MarketError, MarketResult};
use crate::events::{Event, EventLog, EventRecord};
use crate::registry::MarketRegistry;
use crate::types::{BetView, MarketId, MarketStatus, MarketView};
use crate::LedgerConfig;
use oraculum_fhe::{CipherU32, CipherVault, Principal};
use std::sync::Arc;
use tracing::{debug, info};

/// The encrypted prediction market ledger
pub struct PredictionLedger {
    config: LedgerConfig,
    vault: Arc<dyn CipherVault>,
    registry: MarketRegistry,
    events: EventLog,
    /// The ledger's own decrypt identity, kept granted on every live
    /// tally handle
    authority: Principal,
}

impl PredictionLedger {
    /// Create a ledger with default configuration
    pub fn new(vault: Arc<dyn CipherVault>) -> Self {
        Self::with_config(vault, LedgerConfig::default())
    }

    /// Create a ledger with explicit configuration
    pub fn with_config(vault: Arc<dyn CipherVault>, config: LedgerConfig) -> Self {
        Self {
            config,
            vault,
            registry: MarketRegistry::new(),
            events: EventLog::new(),
            authority: Principal::from_label("oraculum.ledger.authority"),
        }
    }

    /// The ledger's standing decrypt identity
    pub fn authority(&self) -> Principal {
        self.authority
    }

    /// The vault this ledger drives
    pub fn vault(&self) -> &Arc<dyn CipherVault> {
        &self.vault
    }

    /// Register a market with 2–4 named outcomes
    ///
    /// Counters start at `encrypt(0)`, one per outcome, in outcome order.
    pub fn create_market(
        &self,
        creator: Principal,
        title: impl Into<String>,
        outcomes: Vec<String>,
    ) -> MarketResult<MarketId> {
        let title = title.into();
        debug!(%creator, outcomes = outcomes.len(), "create_market");

        let market_id = self.registry.create(
            &self.config,
            self.vault.as_ref(),
            self.authority,
            creator,
            title.clone(),
            outcomes,
        )?;

        self.events.append(Event::MarketCreated {
            market_id,
            creator,
            title,
        });
        info!(market_id, %creator, "market created");
        Ok(market_id)
    }

    /// Stake a public amount against an encrypted outcome choice
    ///
    /// One bet per participant per market. The encrypted choice is
    /// trusted to decrypt in range; an out-of-range choice is absorbed
    /// by the tally update rather than rejected (no counter moves).
    pub fn place_bet(
        &self,
        market_id: MarketId,
        participant: Principal,
        encrypted_choice: CipherU32,
        amount: u64,
    ) -> MarketResult<()> {
        debug!(market_id, %participant, amount, "place_bet");
        let slot = self.registry.get(market_id)?;
        let mut market = slot.lock();

        if market.is_closed() {
            return Err(MarketError::MarketClosed(market_id));
        }
        if amount == 0 {
            return Err(MarketError::ZeroStake);
        }
        if market.bets.contains(&participant) {
            return Err(MarketError::DuplicateBet {
                market_id,
                participant,
            });
        }

        // Every vault call happens here; the board commits its new
        // handles only if the whole chain succeeded.
        market
            .tallies
            .oblivious_increment(self.vault.as_ref(), &encrypted_choice)?;

        // Past this point nothing can fail.
        market
            .bets
            .insert(
                market_id,
                participant,
                Bet {
                    choice: encrypted_choice,
                    amount,
                },
            )
            .expect("duplicate checked above");
        market.total_stake = market.total_stake.saturating_add(amount);
        market.participant_count += 1;

        // Append under the market lock so the log order matches the
        // per-market operation order.
        self.events.append(Event::BetPlaced {
            market_id,
            participant,
            amount,
        });
        drop(market);
        info!(market_id, %participant, amount, "bet placed");
        Ok(())
    }

    /// Grant a principal decrypt access to the market's current tallies
    ///
    /// Grants attach to the current ciphertext instances; any later bet
    /// replaces them, so this must be re-invoked to read fresh counters.
    pub fn grant_tally_access(
        &self,
        market_id: MarketId,
        principal: Principal,
    ) -> MarketResult<()> {
        let slot = self.registry.get(market_id)?;
        let market = slot.lock();
        access::grant_tally_access(self.vault.as_ref(), &market, principal)?;
        self.events.append(Event::OptionCountAccessGranted {
            market_id,
            principal,
        });
        drop(market);
        info!(market_id, %principal, "tally access granted");
        Ok(())
    }

    /// Grant a participant decrypt access to their own bet choice
    pub fn grant_bet_access(&self, market_id: MarketId, principal: Principal) -> MarketResult<()> {
        let slot = self.registry.get(market_id)?;
        let market = slot.lock();
        access::grant_bet_access(self.vault.as_ref(), &market, principal)?;
        self.events.append(Event::BetAccessGranted {
            market_id,
            principal,
        });
        drop(market);
        info!(market_id, %principal, "bet access granted");
        Ok(())
    }

    /// Close a market with a declared winning outcome, irreversibly
    ///
    /// Deliberately permissionless: any principal may close any active
    /// market with any in-range outcome index. The ledger records the
    /// declaration; it does not judge it.
    pub fn close_market(
        &self,
        closer: Principal,
        market_id: MarketId,
        winning_outcome: u8,
    ) -> MarketResult<()> {
        debug!(market_id, winning_outcome, %closer, "close_market");
        let slot = self.registry.get(market_id)?;
        let mut market = slot.lock();

        if market.is_closed() {
            return Err(MarketError::MarketClosed(market_id));
        }
        if usize::from(winning_outcome) >= market.outcome_count() {
            return Err(MarketError::WinnerOutOfRange {
                index: winning_outcome,
                outcome_count: market.outcome_count(),
            });
        }

        market.status = MarketStatus::Closed;
        market.result = Some(winning_outcome);
        self.events.append(Event::PredictionClosed {
            market_id,
            winning_outcome,
            closer,
        });
        drop(market);
        info!(market_id, winning_outcome, "market closed");
        Ok(())
    }

    /// Public metadata of one market
    pub fn get_market(&self, market_id: MarketId) -> MarketResult<MarketView> {
        self.registry.view(market_id)
    }

    /// Public metadata of every market, in id order
    pub fn list_markets(&self) -> Vec<MarketView> {
        self.registry.list()
    }

    /// Number of markets ever created
    pub fn market_count(&self) -> u64 {
        self.registry.count()
    }

    /// Current tally ciphertext handles, in outcome order
    ///
    /// Pure read; decryption authority is checked by the vault at
    /// decrypt time, not here.
    pub fn get_tallies(&self, market_id: MarketId) -> MarketResult<Vec<CipherU32>> {
        let slot = self.registry.get(market_id)?;
        let market = slot.lock();
        Ok(market.tallies.handles().to_vec())
    }

    /// A participant's bet in a market, if either exists
    pub fn get_bet(&self, market_id: MarketId, participant: Principal) -> Option<BetView> {
        let slot = self.registry.get(market_id).ok()?;
        let market = slot.lock();
        market.bets.view(market_id, participant)
    }

    /// Snapshot of the event log, in emission order
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.snapshot()
    }

    /// Events with sequence number >= `seq`
    pub fn events_since(&self, seq: u64) -> Vec<EventRecord> {
        self.events.since(seq)
    }
}
