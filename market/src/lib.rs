//! ORACULUM Prediction Market Engine
//!
//! Encrypted-state ledger for permissionless prediction markets: public
//! stakes against confidential outcome choices, with per-outcome tallies
//! that stay encrypted through every update.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     PredictionLedger                          │
//! │                  (operation processor)                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌──────────┐  ┌────────────┐  ┌──────────┐ │
//! │  │  Market    │  │   Bet    │  │   Tally    │  │  Access  │ │
//! │  │  Registry  │  │   Book   │  │   Board    │  │  Control │ │
//! │  └─────┬──────┘  └────┬─────┘  └─────┬──────┘  └────┬─────┘ │
//! │        └───────────────┴──────┬──────┴───────────────┘       │
//! │                               ▼                              │
//! │                 ┌───────────────────────────┐                │
//! │                 │  CipherVault (external)   │                │
//! │                 │  encrypt / eq / select /  │                │
//! │                 │  add / grant / decrypt    │                │
//! │                 └───────────────────────────┘                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Features
//!
//! - **Oblivious tallies**: every bet touches every counter, so no access
//!   pattern reveals which outcome was chosen
//! - **Capability-gated reads**: tallies and choices decrypt only for
//!   explicitly granted principals
//! - **Per-market serialization**: operations on one market are atomic
//!   and ordered; distinct markets proceed concurrently
//! - **Append-only events**: one ordered event per successful mutation,
//!   never carrying plaintext choices or tallies

pub mod access;
pub mod bets;
pub mod errors;
pub mod events;
pub mod processor;
pub mod registry;
pub mod tally;
pub mod types;

pub use bets::{Bet, BetBook};
pub use errors::{ErrorKind, MarketError, MarketResult};
pub use events::{Event, EventLog, EventRecord};
pub use processor::PredictionLedger;
pub use registry::{Market, MarketRegistry};
pub use tally::TallyBoard;
pub use types::{BetView, MarketId, MarketStatus, MarketView};

/// Ledger configuration
#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// Fewest outcomes a market may declare
    pub min_outcomes: usize,
    /// Most outcomes a market may declare (bounds per-bet tally cost)
    pub max_outcomes: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            min_outcomes: 2,
            max_outcomes: 4,
        }
    }
}

impl LedgerConfig {
    /// Override the allowed outcome-count range
    pub fn with_outcome_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_outcomes = min;
        self.max_outcomes = max;
        self
    }
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::{ErrorKind, MarketError, MarketResult};
    pub use crate::events::{Event, EventRecord};
    pub use crate::processor::PredictionLedger;
    pub use crate::types::{BetView, MarketId, MarketStatus, MarketView};
    pub use crate::LedgerConfig;
}
