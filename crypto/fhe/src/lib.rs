//! ORACULUM Homomorphic Value Capability
//!
//! The boundary between the ledger engine and whatever actually performs
//! encrypted arithmetic. The engine never sees plaintext choices or
//! tallies; it holds opaque [`Cipher<T>`] handles and drives them through
//! the [`CipherVault`] operations.
//!
//! # Key Features:
//! - Typed, opaque ciphertext handles (`CipherU32`, `CipherBool`)
//! - The capability operation set: encrypt, eq, select, add, grant, decrypt
//! - Per-handle decrypt grants (additive, never revoked)
//! - Plaintext-simulating vault for tests and local development
//! - Real TFHE-rs backend adapter behind the `tfhe` feature
//!
//! # Architecture:
//! - [`CipherVault`]: the capability trait consumed by the ledger
//! - [`PlainVault`]: arena of plaintext values + grant sets (simulator)
//! - `TfheVault`: same arena bookkeeping over TFHE-rs ciphertexts
//!
//! Every homomorphic result is a *fresh* handle with an empty grant set.
//! Access control therefore attaches to handle instances, not to logical
//! slots; callers who replace a handle must re-grant on the replacement.

pub mod errors;
pub mod handle;
pub mod identity;
pub mod plain;
pub mod vault;

#[cfg(feature = "tfhe")]
pub mod tfhe_backend;

pub use errors::{VaultError, VaultResult};
pub use handle::{Cipher, CipherBool, CipherU32, HandleId};
pub use identity::{Credential, Principal};
pub use plain::PlainVault;
pub use vault::CipherVault;

#[cfg(feature = "tfhe")]
pub use tfhe_backend::{FheConfig, TfheVault};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_surface_roundtrip() {
        let vault = PlainVault::new();
        let alice = Principal::from_label("alice");
        let credential = vault.issue_credential(alice);

        let ct = vault.encrypt_u32(7).unwrap();
        vault.grant(ct.id(), alice).unwrap();

        assert_eq!(vault.decrypt_u32(&ct, alice, &credential).unwrap(), 7);
    }
}
