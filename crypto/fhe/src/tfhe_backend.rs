//! Real backend adapter over TFHE-rs
//!
//! Same arena and grant bookkeeping as the simulator, with the values
//! held as genuine TFHE-rs ciphertexts. The vault owns the client key;
//! nothing outside this module can reach plaintext without going through
//! `decrypt_u32` and its grant check.

use crate::errors::{VaultError, VaultResult};
use crate::handle::{Cipher, CipherBool, CipherU32, HandleId};
use crate::identity::{Credential, Principal};
use crate::vault::CipherVault;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tfhe::prelude::*;
use tfhe::{generate_keys, ClientKey, ConfigBuilder, FheBool, FheUint32, ServerKey};

/// Backend configuration
#[derive(Clone, Debug)]
pub struct FheConfig {
    /// Security parameter (bits)
    pub security_bits: u32,
}

impl Default for FheConfig {
    fn default() -> Self {
        Self { security_bits: 128 }
    }
}

/// Stored ciphertext, tagged by plaintext type
#[derive(Clone)]
enum StoredCipher {
    U32(FheUint32),
    Bool(FheBool),
}

struct Slot {
    value: StoredCipher,
    grants: HashSet<Principal>,
}

#[derive(Default)]
struct Arena {
    next_handle: HandleId,
    slots: HashMap<HandleId, Slot>,
}

impl Arena {
    fn insert(&mut self, value: StoredCipher) -> HandleId {
        let id = self.next_handle;
        self.next_handle += 1;
        self.slots.insert(
            id,
            Slot {
                value,
                grants: HashSet::new(),
            },
        );
        id
    }

    fn u32_value(&self, handle: HandleId) -> VaultResult<FheUint32> {
        match self.slots.get(&handle) {
            Some(Slot {
                value: StoredCipher::U32(ct),
                ..
            }) => Ok(ct.clone()),
            Some(_) => Err(VaultError::TypeMismatch(handle)),
            None => Err(VaultError::UnknownHandle(handle)),
        }
    }

    fn bool_value(&self, handle: HandleId) -> VaultResult<FheBool> {
        match self.slots.get(&handle) {
            Some(Slot {
                value: StoredCipher::Bool(ct),
                ..
            }) => Ok(ct.clone()),
            Some(_) => Err(VaultError::TypeMismatch(handle)),
            None => Err(VaultError::UnknownHandle(handle)),
        }
    }
}

/// Cipher vault backed by TFHE-rs
///
/// Key generation is slow (tens of seconds); construct once and share.
pub struct TfheVault {
    arena: Mutex<Arena>,
    client_key: ClientKey,
    server_key: ServerKey,
}

impl TfheVault {
    /// Generate keys and create an empty vault
    pub fn new(_config: &FheConfig) -> VaultResult<Self> {
        let tfhe_config = ConfigBuilder::default().build();
        let (client_key, server_key) = generate_keys(tfhe_config);
        tfhe::set_server_key(server_key.clone());

        Ok(Self {
            arena: Mutex::new(Arena::default()),
            client_key,
            server_key,
        })
    }

    /// Number of live ciphertext handles
    pub fn handle_count(&self) -> usize {
        self.arena.lock().slots.len()
    }

    // TFHE-rs keeps the server key in thread-local storage; re-install it
    // so homomorphic ops work from whichever thread called us.
    fn install_server_key(&self) {
        tfhe::set_server_key(self.server_key.clone());
    }

    fn expected_credential(principal: Principal) -> Credential {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"oraculum.tfhe.credential");
        hasher.update(principal.as_bytes());
        Credential::from_bytes(*hasher.finalize().as_bytes())
    }
}

impl CipherVault for TfheVault {
    fn encrypt_u32(&self, value: u32) -> VaultResult<CipherU32> {
        let ct = FheUint32::try_encrypt(value, &self.client_key)
            .map_err(|e| VaultError::BackendFailure(e.to_string()))?;
        let id = self.arena.lock().insert(StoredCipher::U32(ct));
        Ok(Cipher::from_raw(id))
    }

    fn eq(&self, lhs: &CipherU32, rhs: &CipherU32) -> VaultResult<CipherBool> {
        self.install_server_key();
        let (l, r) = {
            let arena = self.arena.lock();
            (arena.u32_value(lhs.id())?, arena.u32_value(rhs.id())?)
        };
        let result = l.eq(&r);
        let id = self.arena.lock().insert(StoredCipher::Bool(result));
        Ok(Cipher::from_raw(id))
    }

    fn select(
        &self,
        cond: &CipherBool,
        if_true: &CipherU32,
        if_false: &CipherU32,
    ) -> VaultResult<CipherU32> {
        self.install_server_key();
        let (c, t, f) = {
            let arena = self.arena.lock();
            (
                arena.bool_value(cond.id())?,
                arena.u32_value(if_true.id())?,
                arena.u32_value(if_false.id())?,
            )
        };
        let result = c.if_then_else(&t, &f);
        let id = self.arena.lock().insert(StoredCipher::U32(result));
        Ok(Cipher::from_raw(id))
    }

    fn add(&self, lhs: &CipherU32, rhs: &CipherU32) -> VaultResult<CipherU32> {
        self.install_server_key();
        let (l, r) = {
            let arena = self.arena.lock();
            (arena.u32_value(lhs.id())?, arena.u32_value(rhs.id())?)
        };
        let result = &l + &r;
        let id = self.arena.lock().insert(StoredCipher::U32(result));
        Ok(Cipher::from_raw(id))
    }

    fn grant(&self, handle: HandleId, principal: Principal) -> VaultResult<()> {
        let mut arena = self.arena.lock();
        let slot = arena
            .slots
            .get_mut(&handle)
            .ok_or(VaultError::UnknownHandle(handle))?;
        slot.grants.insert(principal);
        Ok(())
    }

    fn decrypt_u32(
        &self,
        cipher: &CipherU32,
        principal: Principal,
        credential: &Credential,
    ) -> VaultResult<u32> {
        if *credential != Self::expected_credential(principal) {
            return Err(VaultError::InvalidCredential);
        }

        let ct = {
            let arena = self.arena.lock();
            let slot = arena
                .slots
                .get(&cipher.id())
                .ok_or(VaultError::UnknownHandle(cipher.id()))?;
            if !slot.grants.contains(&principal) {
                return Err(VaultError::AccessDenied(cipher.id()));
            }
            match &slot.value {
                StoredCipher::U32(ct) => ct.clone(),
                StoredCipher::Bool(_) => return Err(VaultError::TypeMismatch(cipher.id())),
            }
        };

        let value: u32 = ct.decrypt(&self.client_key);
        Ok(value)
    }

    fn issue_credential(&self, principal: Principal) -> Credential {
        Self::expected_credential(principal)
    }

    fn is_granted(&self, handle: HandleId, principal: Principal) -> bool {
        self.arena
            .lock()
            .slots
            .get(&handle)
            .map(|slot| slot.grants.contains(&principal))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Key generation dominates these tests; keep them few and share one
    // vault per test.

    #[test]
    #[ignore = "slow: real TFHE-rs key generation"]
    fn test_tfhe_encrypt_decrypt_roundtrip() {
        let vault = TfheVault::new(&FheConfig::default()).unwrap();
        let user = Principal::from_label("user");
        let credential = vault.issue_credential(user);

        let ct = vault.encrypt_u32(12345).unwrap();
        vault.grant(ct.id(), user).unwrap();

        assert_eq!(vault.decrypt_u32(&ct, user, &credential).unwrap(), 12345);
    }

    #[test]
    #[ignore = "slow: real TFHE-rs key generation"]
    fn test_tfhe_eq_select_add_chain() {
        let vault = TfheVault::new(&FheConfig::default()).unwrap();
        let user = Principal::from_label("user");
        let credential = vault.issue_credential(user);

        let x = vault.encrypt_u32(1).unwrap();
        let needle = vault.encrypt_u32(1).unwrap();
        let one = vault.encrypt_u32(1).unwrap();
        let zero = vault.encrypt_u32(0).unwrap();
        let counter = vault.encrypt_u32(41).unwrap();

        let matched = vault.eq(&x, &needle).unwrap();
        let delta = vault.select(&matched, &one, &zero).unwrap();
        let bumped = vault.add(&counter, &delta).unwrap();

        vault.grant(bumped.id(), user).unwrap();
        assert_eq!(vault.decrypt_u32(&bumped, user, &credential).unwrap(), 42);
    }
}
