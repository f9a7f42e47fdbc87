//! Vault error types

use crate::handle::HandleId;
use thiserror::Error;

/// Errors surfaced by a cipher vault implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// Handle does not name a live ciphertext in this vault
    #[error("unknown ciphertext handle {0}")]
    UnknownHandle(HandleId),

    /// Handle exists but holds a value of a different encrypted type
    #[error("ciphertext handle {0} holds a value of another type")]
    TypeMismatch(HandleId),

    /// Decrypt attempted by a principal without a grant on this handle
    #[error("principal is not granted on ciphertext handle {0}")]
    AccessDenied(HandleId),

    /// Credential does not authenticate the presenting principal
    #[error("credential does not match the presenting principal")]
    InvalidCredential,

    /// Failure inside the backing cryptographic engine
    #[error("backend failure: {0}")]
    BackendFailure(String),
}

/// Result type for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
