//! Plaintext-simulating vault
//!
//! [`PlainVault`] implements the full capability surface over plaintext
//! values. It is faithful where it matters to the ledger: handle
//! identity, fresh handles for every operation result, per-handle grant
//! sets, and credential-checked decryption. Only the cryptography is
//! simulated.

use crate::errors::{VaultError, VaultResult};
use crate::handle::{Cipher, CipherBool, CipherU32, HandleId};
use crate::identity::{Credential, Principal};
use crate::vault::CipherVault;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Plaintext stand-in for a stored ciphertext
#[derive(Clone, Copy, Debug, PartialEq)]
enum PlainValue {
    U32(u32),
    Bool(bool),
}

struct Slot {
    value: PlainValue,
    grants: HashSet<Principal>,
}

#[derive(Default)]
struct Arena {
    next_handle: HandleId,
    slots: HashMap<HandleId, Slot>,
}

impl Arena {
    fn insert(&mut self, value: PlainValue) -> HandleId {
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

    fn value(&self, handle: HandleId) -> VaultResult<PlainValue> {
        self.slots
            .get(&handle)
            .map(|slot| slot.value)
            .ok_or(VaultError::UnknownHandle(handle))
    }

    fn u32_value(&self, handle: HandleId) -> VaultResult<u32> {
        match self.value(handle)? {
            PlainValue::U32(v) => Ok(v),
            PlainValue::Bool(_) => Err(VaultError::TypeMismatch(handle)),
        }
    }

    fn bool_value(&self, handle: HandleId) -> VaultResult<bool> {
        match self.value(handle)? {
            PlainValue::Bool(v) => Ok(v),
            PlainValue::U32(_) => Err(VaultError::TypeMismatch(handle)),
        }
    }
}

/// In-memory plaintext vault for tests and local development
pub struct PlainVault {
    arena: Mutex<Arena>,
}

impl PlainVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self {
            arena: Mutex::new(Arena::default()),
        }
    }

    /// Number of live ciphertext handles
    pub fn handle_count(&self) -> usize {
        self.arena.lock().slots.len()
    }

    fn expected_credential(principal: Principal) -> Credential {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"oraculum.plain.credential");
        hasher.update(principal.as_bytes());
        Credential::from_bytes(*hasher.finalize().as_bytes())
    }
}

impl Default for PlainVault {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherVault for PlainVault {
    fn encrypt_u32(&self, value: u32) -> VaultResult<CipherU32> {
        let id = self.arena.lock().insert(PlainValue::U32(value));
        Ok(Cipher::from_raw(id))
    }

    fn eq(&self, lhs: &CipherU32, rhs: &CipherU32) -> VaultResult<CipherBool> {
        let mut arena = self.arena.lock();
        let l = arena.u32_value(lhs.id())?;
        let r = arena.u32_value(rhs.id())?;
        let id = arena.insert(PlainValue::Bool(l == r));
        Ok(Cipher::from_raw(id))
    }

    fn select(
        &self,
        cond: &CipherBool,
        if_true: &CipherU32,
        if_false: &CipherU32,
    ) -> VaultResult<CipherU32> {
        let mut arena = self.arena.lock();
        let c = arena.bool_value(cond.id())?;
        let t = arena.u32_value(if_true.id())?;
        let f = arena.u32_value(if_false.id())?;
        let id = arena.insert(PlainValue::U32(if c { t } else { f }));
        Ok(Cipher::from_raw(id))
    }

    fn add(&self, lhs: &CipherU32, rhs: &CipherU32) -> VaultResult<CipherU32> {
        let mut arena = self.arena.lock();
        let l = arena.u32_value(lhs.id())?;
        let r = arena.u32_value(rhs.id())?;
        let id = arena.insert(PlainValue::U32(l.wrapping_add(r)));
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

        let arena = self.arena.lock();
        let slot = arena
            .slots
            .get(&cipher.id())
            .ok_or(VaultError::UnknownHandle(cipher.id()))?;
        if !slot.grants.contains(&principal) {
            return Err(VaultError::AccessDenied(cipher.id()));
        }

        match slot.value {
            PlainValue::U32(v) => Ok(v),
            PlainValue::Bool(_) => Err(VaultError::TypeMismatch(cipher.id())),
        }
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

    fn vault_and_user() -> (PlainVault, Principal, Credential) {
        let vault = PlainVault::new();
        let user = Principal::from_label("user");
        let credential = vault.issue_credential(user);
        (vault, user, credential)
    }

    #[test]
    fn test_operations_allocate_fresh_handles() {
        let (vault, _, _) = vault_and_user();

        let a = vault.encrypt_u32(1).unwrap();
        let b = vault.encrypt_u32(2).unwrap();
        let sum = vault.add(&a, &b).unwrap();

        assert_ne!(sum.id(), a.id());
        assert_ne!(sum.id(), b.id());
        assert_eq!(vault.handle_count(), 3);
    }

    #[test]
    fn test_eq_and_select() {
        let (vault, user, credential) = vault_and_user();

        let x = vault.encrypt_u32(2).unwrap();
        let needle = vault.encrypt_u32(2).unwrap();
        let one = vault.encrypt_u32(1).unwrap();
        let zero = vault.encrypt_u32(0).unwrap();

        let matched = vault.eq(&x, &needle).unwrap();
        let delta = vault.select(&matched, &one, &zero).unwrap();

        vault.grant(delta.id(), user).unwrap();
        assert_eq!(vault.decrypt_u32(&delta, user, &credential).unwrap(), 1);
    }

    #[test]
    fn test_decrypt_requires_grant() {
        let (vault, user, credential) = vault_and_user();

        let ct = vault.encrypt_u32(5).unwrap();
        assert_eq!(
            vault.decrypt_u32(&ct, user, &credential),
            Err(VaultError::AccessDenied(ct.id()))
        );

        vault.grant(ct.id(), user).unwrap();
        assert_eq!(vault.decrypt_u32(&ct, user, &credential).unwrap(), 5);
    }

    #[test]
    fn test_decrypt_rejects_foreign_credential() {
        let (vault, user, _) = vault_and_user();
        let stranger_credential = vault.issue_credential(Principal::from_label("stranger"));

        let ct = vault.encrypt_u32(5).unwrap();
        vault.grant(ct.id(), user).unwrap();

        assert_eq!(
            vault.decrypt_u32(&ct, user, &stranger_credential),
            Err(VaultError::InvalidCredential)
        );
    }

    #[test]
    fn test_grants_do_not_carry_to_results() {
        let (vault, user, credential) = vault_and_user();

        let a = vault.encrypt_u32(1).unwrap();
        vault.grant(a.id(), user).unwrap();

        let sum = vault.add(&a, &a).unwrap();
        assert!(!vault.is_granted(sum.id(), user));
        assert_eq!(
            vault.decrypt_u32(&sum, user, &credential),
            Err(VaultError::AccessDenied(sum.id()))
        );
    }

    #[test]
    fn test_grant_is_idempotent() {
        let (vault, user, _) = vault_and_user();

        let ct = vault.encrypt_u32(9).unwrap();
        vault.grant(ct.id(), user).unwrap();
        vault.grant(ct.id(), user).unwrap();

        assert!(vault.is_granted(ct.id(), user));
    }

    #[test]
    fn test_type_confusion_is_rejected() {
        let (vault, user, credential) = vault_and_user();

        let a = vault.encrypt_u32(1).unwrap();
        let b = vault.encrypt_u32(1).unwrap();
        let flag = vault.eq(&a, &b).unwrap();

        // A bool handle smuggled into a u32 position
        let bogus = CipherU32::from_raw(flag.id());
        vault.grant(flag.id(), user).unwrap();
        assert_eq!(
            vault.decrypt_u32(&bogus, user, &credential),
            Err(VaultError::TypeMismatch(flag.id()))
        );
    }
}
