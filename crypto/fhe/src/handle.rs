//! Opaque ciphertext handles
//!
//! A [`Cipher<T>`] names an encrypted value living inside a vault. It
//! carries no key material and no ciphertext bytes; it is only an arena
//! id tagged with the plaintext type it stands for. Handles are cheap to
//! copy and safe to serialize into views and events.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Arena identifier of a ciphertext inside its vault
pub type HandleId = u64;

/// Opaque handle to an encrypted value of plaintext type `T`
///
/// Two handles compare equal only when they name the same ciphertext
/// instance. Homomorphic operations never reuse a handle: each result is
/// a new instance with an empty grant set.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Cipher<T> {
    id: HandleId,
    #[serde(skip)]
    _plaintext: PhantomData<fn() -> T>,
}

/// Handle to an encrypted 32-bit unsigned integer
pub type CipherU32 = Cipher<u32>;

/// Handle to an encrypted boolean
pub type CipherBool = Cipher<bool>;

impl<T> Cipher<T> {
    /// Wrap a raw arena id. Intended for vault implementations; the
    /// ledger itself never fabricates handles.
    pub fn from_raw(id: HandleId) -> Self {
        Self {
            id,
            _plaintext: PhantomData,
        }
    }

    /// The arena id this handle names
    pub fn id(&self) -> HandleId {
        self.id
    }
}

impl<T> Clone for Cipher<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cipher<T> {}

impl<T> PartialEq for Cipher<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Cipher<T> {}

impl<T> std::hash::Hash for Cipher<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> std::fmt::Debug for Cipher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher").field("id", &self.id).finish()
    }
}
