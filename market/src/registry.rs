//! Market registry
//!
//! Owns the append-only sequence of markets. Each market sits behind its
//! own mutex so operations on distinct markets never contend; the outer
//! registry lock is held only long enough to resolve an id to its slot.

use crate::bets::BetBook;
use crate::errors::{MarketError, MarketResult};
use crate::tally::TallyBoard;
use crate::types::{MarketId, MarketStatus, MarketView};
use crate::LedgerConfig;
use oraculum_fhe::{CipherVault, Principal};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::debug;

/// Full mutable state of one market
///
/// Everything an operation on this market touches lives here, so holding
/// the market's mutex makes the operation atomic.
pub struct Market {
    /// Market identifier (position in the registry)
    pub id: MarketId,
    /// Market question
    pub title: String,
    /// Named outcomes; order fixed at creation
    pub outcomes: Vec<String>,
    /// Lifecycle state
    pub status: MarketStatus,
    /// Sum of stakes placed
    pub total_stake: u64,
    /// Number of distinct bettors
    pub participant_count: u64,
    /// Winning outcome index, set exactly once at close
    pub result: Option<u8>,
    /// Registering principal
    pub creator: Principal,
    /// Encrypted per-outcome counters
    pub tallies: TallyBoard,
    /// Bets keyed by participant
    pub bets: BetBook,
}

impl Market {
    /// Number of declared outcomes
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the market has been closed
    pub fn is_closed(&self) -> bool {
        self.status == MarketStatus::Closed
    }

    /// Read-only snapshot of the public metadata
    pub fn view(&self) -> MarketView {
        MarketView {
            id: self.id,
            title: self.title.clone(),
            outcomes: self.outcomes.clone(),
            status: self.status,
            total_stake: self.total_stake,
            participant_count: self.participant_count,
            result: self.result,
            creator: self.creator,
            tally_handles: self.tallies.handle_ids(),
        }
    }
}

/// Append-only registry of all markets
#[derive(Default)]
pub struct MarketRegistry {
    markets: RwLock<Vec<Arc<Mutex<Market>>>>,
}

impl MarketRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate inputs, initialize encrypted counters, and append a new
    /// market in the `Active` state
    ///
    /// The counters are encrypted before the registry lock is taken, so
    /// a slow vault never blocks operations on existing markets.
    pub fn create(
        &self,
        config: &LedgerConfig,
        vault: &dyn CipherVault,
        authority: Principal,
        creator: Principal,
        title: String,
        outcomes: Vec<String>,
    ) -> MarketResult<MarketId> {
        if title.is_empty() {
            return Err(MarketError::EmptyTitle);
        }
        if outcomes.len() < config.min_outcomes || outcomes.len() > config.max_outcomes {
            return Err(MarketError::OutcomeCountOutOfRange {
                got: outcomes.len(),
                min: config.min_outcomes,
                max: config.max_outcomes,
            });
        }
        if let Some(index) = outcomes.iter().position(|label| label.is_empty()) {
            return Err(MarketError::EmptyOutcomeLabel { index });
        }

        let tallies = TallyBoard::bootstrap(vault, authority, outcomes.len())?;
        let mut market = Market {
            id: 0,
            title,
            outcomes,
            status: MarketStatus::Active,
            total_stake: 0,
            participant_count: 0,
            result: None,
            creator,
            tallies,
            bets: BetBook::new(),
        };

        let mut markets = self.markets.write();
        let id = markets.len() as MarketId;
        market.id = id;
        debug!(market_id = id, outcomes = market.outcome_count(), "market registered");
        markets.push(Arc::new(Mutex::new(market)));
        Ok(id)
    }

    /// Resolve an id to its market slot
    pub fn get(&self, market_id: MarketId) -> MarketResult<Arc<Mutex<Market>>> {
        self.markets
            .read()
            .get(market_id as usize)
            .cloned()
            .ok_or(MarketError::MarketNotFound(market_id))
    }

    /// Snapshot one market's public metadata
    pub fn view(&self, market_id: MarketId) -> MarketResult<MarketView> {
        Ok(self.get(market_id)?.lock().view())
    }

    /// Snapshot every market, in id order
    pub fn list(&self) -> Vec<MarketView> {
        let slots: Vec<_> = self.markets.read().iter().cloned().collect();
        slots.iter().map(|slot| slot.lock().view()).collect()
    }

    /// Number of markets ever created
    pub fn count(&self) -> u64 {
        self.markets.read().len() as u64
    }
}
