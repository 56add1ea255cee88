// common/src/auth/identity.rs
use serde::Serialize;
use std::fmt;

/// Wallet identity of a caller whose signature has been verified.
///
/// Only [`SignatureVerifier`](super::SignatureVerifier) can build one, so
/// holding a value means the signature check passed for this request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallerIdentity {
    wallet_address: String,
}

impl CallerIdentity {
    pub(crate) fn new(wallet_address: String) -> Self {
        Self { wallet_address }
    }

    /// Base58 public key exactly as the caller sent it
    pub fn wallet_address(&self) -> &str {
        &self.wallet_address
    }

    pub fn into_wallet_address(self) -> String {
        self.wallet_address
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wallet_address)
    }
}
