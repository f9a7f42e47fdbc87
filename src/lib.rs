//! ORACULUM: Confidential Prediction Market Ledger
//!
//! This is the root crate that re-exports the ORACULUM components for
//! integration testing and provides unified access to the engine.
//!
//! ## Architecture Overview
//!
//! ORACULUM keeps a prediction market's per-outcome tallies encrypted at
//! all times. Stakes are public; outcome choices are not. Every bet
//! drives the same homomorphic update over every counter, so nothing
//! observable reveals which outcome was chosen, and decryption is gated
//! behind explicit, auditable capability grants.
//!
//! ## Crate Organization
//!
//! - `oraculum-fhe`: the homomorphic value capability boundary:
//!   ciphertext handles, the vault trait, the plaintext simulator, and
//!   the TFHE-rs backend adapter (feature `tfhe`)
//! - `oraculum-market`: the engine: market registry, bet ledger,
//!   encrypted tally engine, access control, operation processor

pub use oraculum_fhe as fhe;
pub use oraculum_market as market;

/// ORACULUM protocol version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for convenient imports
pub mod prelude {
    pub use oraculum_fhe::{
        Cipher, CipherBool, CipherU32, CipherVault, Credential, HandleId, PlainVault, Principal,
        VaultError, VaultResult,
    };
    pub use oraculum_market::prelude::*;
}
