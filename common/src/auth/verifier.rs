// common/src/auth/verifier.rs
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::credentials::WalletCredentials;
use super::error::AuthError;
use super::identity::CallerIdentity;

/// Detached Ed25519 signature check over the caller's message.
///
/// Pure and stateless: the result depends only on the three credentials,
/// so one verifier can be shared across workers without locking.
#[derive(Debug, Clone, Copy)]
pub struct SignatureVerifier {
    check: fn(&WalletCredentials) -> Result<CallerIdentity, AuthError>,
}

impl SignatureVerifier {
    pub fn new() -> Self {
        Self {
            check: verify_detached,
        }
    }

    /// Verifier running `check` in place of the detached Ed25519 check.
    ///
    /// Identities can only be minted inside this crate, so a replacement
    /// check can reject or panic but never admit a caller on its own.
    pub fn with_check(check: fn(&WalletCredentials) -> Result<CallerIdentity, AuthError>) -> Self {
        Self { check }
    }

    /// Verify `credentials` and produce the caller's identity.
    ///
    /// Decoding problems are `MalformedCredentials`, a well-formed but wrong
    /// signature is `InvalidSignature`, and a panic inside the crypto code is
    /// contained and reported as `InternalVerificationError`.
    pub fn verify(&self, credentials: &WalletCredentials) -> Result<CallerIdentity, AuthError> {
        let check = self.check;
        panic::catch_unwind(AssertUnwindSafe(|| check(credentials))).unwrap_or_else(
            |payload| {
                Err(AuthError::InternalVerificationError(panic_message(payload.as_ref())))
            },
        )
    }
}

impl Default for SignatureVerifier {
    fn default() -> Self {
        Self::new()
    }
}

fn verify_detached(credentials: &WalletCredentials) -> Result<CallerIdentity, AuthError> {
    let decoded = credentials.decode()?;

    // verify_strict also refuses small-order keys that would accept forged signatures
    decoded
        .verifying_key
        .verify_strict(credentials.message().as_bytes(), &decoded.signature)
        .map_err(|_| AuthError::InvalidSignature)?;

    Ok(CallerIdentity::new(credentials.public_key().to_owned()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "verification panicked".to_string()
    }
}
