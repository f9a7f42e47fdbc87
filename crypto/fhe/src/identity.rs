//! Principal and credential types
//!
//! A [`Principal`] is an authenticated account identity supplied by the
//! host environment. A [`Credential`] is the opaque proof a principal
//! presents at decrypt time; the vault issues and verifies it, the
//! ledger never inspects it.

use serde::{Deserialize, Serialize};

/// Authenticated caller identity (32-byte account address)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal([u8; 32]);

impl Principal {
    /// Wrap a raw 32-byte account address
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive a principal deterministically from a human-readable label
    pub fn from_label(label: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"oraculum.principal");
        hasher.update(label.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// The underlying address bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Principal({})", hex::encode(&self.0[..8]))
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

/// Opaque decrypt credential issued by a vault
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credential([u8; 32]);

impl Credential {
    /// Wrap raw credential bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The underlying credential bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print credential material
        f.debug_struct("Credential").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_derivation_is_deterministic() {
        assert_eq!(Principal::from_label("alice"), Principal::from_label("alice"));
        assert_ne!(Principal::from_label("alice"), Principal::from_label("bob"));
    }

    #[test]
    fn test_debug_truncates_address() {
        let p = Principal::from_label("alice");
        let rendered = format!("{:?}", p);
        assert!(rendered.starts_with("Principal("));
        assert_eq!(rendered.len(), "Principal()".len() + 16);
    }
}
