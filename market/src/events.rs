//! Ordered, append-only event log
//!
//! One event per successful mutating operation. Events carry identifiers
//! and public amounts only, never a plaintext choice or tally value.

use crate::types::MarketId;
use oraculum_fhe::Principal;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Events emitted by the ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A market was registered
    MarketCreated {
        market_id: MarketId,
        creator: Principal,
        title: String,
    },
    /// A bet was stored and tallied
    BetPlaced {
        market_id: MarketId,
        participant: Principal,
        amount: u64,
    },
    /// A principal was granted decrypt access to the current tallies
    OptionCountAccessGranted {
        market_id: MarketId,
        principal: Principal,
    },
    /// A principal was granted decrypt access to their own choice
    BetAccessGranted {
        market_id: MarketId,
        principal: Principal,
    },
    /// A market was closed with a declared winning outcome
    PredictionClosed {
        market_id: MarketId,
        winning_outcome: u8,
        closer: Principal,
    },
}

/// An event together with its position in the log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 0-based, gap-free sequence number
    pub seq: u64,
    /// The emitted event
    pub event: Event,
}

/// Append-only event log
#[derive(Default)]
pub struct EventLog {
    entries: Mutex<Vec<EventRecord>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number
    pub fn append(&self, event: Event) -> u64 {
        let mut entries = self.entries.lock();
        let seq = entries.len() as u64;
        entries.push(EventRecord { seq, event });
        seq
    }

    /// Snapshot of the full log, in emission order
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.entries.lock().clone()
    }

    /// Events with sequence number >= `seq`, for incremental consumers
    pub fn since(&self, seq: u64) -> Vec<EventRecord> {
        let entries = self.entries.lock();
        entries
            .iter()
            .skip(seq as usize)
            .cloned()
            .collect()
    }

    /// Number of events emitted so far
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no event has been emitted yet
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
