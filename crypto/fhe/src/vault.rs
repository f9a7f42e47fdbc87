//! The cipher vault capability trait
//!
//! [`CipherVault`] is the complete operation set the ledger engine is
//! allowed to ask of its homomorphic backend. Implementations keep the
//! actual ciphertexts (and any key material) to themselves; callers see
//! only handles.
//!
//! Operations are synchronous but potentially slow on a real backend, so
//! callers should avoid invoking them while holding locks over unrelated
//! state.

use crate::errors::VaultResult;
use crate::handle::{CipherBool, CipherU32, HandleId};
use crate::identity::{Credential, Principal};

/// Homomorphic value capability consumed by the ledger
///
/// Grant semantics: grants attach to the handle *instance* named in the
/// call, are additive, and are never revoked. A handle produced by
/// `eq`/`select`/`add`/`encrypt_u32` starts with an empty grant set.
pub trait CipherVault: Send + Sync {
    /// Encrypt a plaintext u32 into a fresh ciphertext
    fn encrypt_u32(&self, value: u32) -> VaultResult<CipherU32>;

    /// Homomorphic equality test; the result stays encrypted
    fn eq(&self, lhs: &CipherU32, rhs: &CipherU32) -> VaultResult<CipherBool>;

    /// Homomorphic conditional: `if_true` where `cond` holds, else `if_false`
    fn select(
        &self,
        cond: &CipherBool,
        if_true: &CipherU32,
        if_false: &CipherU32,
    ) -> VaultResult<CipherU32>;

    /// Homomorphic addition
    fn add(&self, lhs: &CipherU32, rhs: &CipherU32) -> VaultResult<CipherU32>;

    /// Authorize `principal` to decrypt the ciphertext named by `handle`
    ///
    /// Idempotent; granting an already-granted principal is a no-op.
    fn grant(&self, handle: HandleId, principal: Principal) -> VaultResult<()>;

    /// Decrypt on behalf of a granted principal
    ///
    /// Fails with `InvalidCredential` when the credential does not
    /// authenticate the principal, and `AccessDenied` when the principal
    /// holds no grant on this handle.
    fn decrypt_u32(
        &self,
        cipher: &CipherU32,
        principal: Principal,
        credential: &Credential,
    ) -> VaultResult<u32>;

    /// Issue the decrypt credential for a principal
    ///
    /// In a deployed system this is the wallet-side key ceremony; here it
    /// is part of the capability surface so tests can exercise the
    /// denied/authorized paths.
    fn issue_credential(&self, principal: Principal) -> Credential;

    /// Whether `principal` currently holds a grant on `handle`
    fn is_granted(&self, handle: HandleId, principal: Principal) -> bool;
}
